//! Simulated identity-registry lookup.
//!
//! Half of the lookups "find" an existing patient and return a ten-digit
//! identifier; the other half mark the identifier as pending creation. The
//! coin is an injected RNG so tests can seed it.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::models::Uip;

/// Smallest value that no longer fits in ten digits.
const UIP_SPACE: u64 = 10_000_000_000;

pub struct IdentifierAssigner {
    rng: Box<dyn RngCore + Send>,
}

impl IdentifierAssigner {
    pub fn new(rng: Box<dyn RngCore + Send>) -> Self {
        Self { rng }
    }

    /// Reproducible assigner for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn from_entropy() -> Self {
        Self::new(Box::new(StdRng::from_entropy()))
    }

    pub fn assign(&mut self) -> Uip {
        let uip = if self.rng.gen_bool(0.5) {
            Uip::Existing(format!("{:010}", self.rng.gen_range(0..UIP_SPACE)))
        } else {
            Uip::Pending
        };
        debug!(%uip, "identifier assigned");
        uip
    }
}

impl std::fmt::Debug for IdentifierAssigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierAssigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousand_assignments_split_roughly_in_half() {
        let mut assigner = IdentifierAssigner::seeded(42);
        let mut pending = 0;

        for _ in 0..1000 {
            match assigner.assign() {
                Uip::Pending => pending += 1,
                Uip::Existing(value) => {
                    assert_eq!(value.len(), 10, "{value}");
                    assert!(value.chars().all(|c| c.is_ascii_digit()), "{value}");
                }
                Uip::Unassigned => panic!("assigner must always decide"),
            }
        }

        // 1000 fair flips: 4 standard deviations is about +-63.
        assert!((437..=563).contains(&pending), "pending = {pending}");
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let mut a = IdentifierAssigner::seeded(7);
        let mut b = IdentifierAssigner::seeded(7);

        for _ in 0..20 {
            assert_eq!(a.assign(), b.assign());
        }
    }

    #[test]
    fn existing_identifiers_pass_validation() {
        let mut assigner = IdentifierAssigner::seeded(3);

        for _ in 0..100 {
            if let Uip::Existing(value) = assigner.assign() {
                assert!(Uip::existing(&value).is_ok());
            }
        }
    }
}
