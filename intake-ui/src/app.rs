//! Wiring between settings, catalog backends and sessions.

use std::sync::Arc;

use anyhow::Context;
use intake_core::{CatalogConfig, CatalogRegistry, Latency, NoLatency, SearchRecord, TimerLatency};
use tracing::{debug, info};

use crate::config::Settings;
use crate::session::{LostFoundSession, RegistrationSession};

/// Registry with every catalog backend compiled into the binary.
pub fn build_registry() -> CatalogRegistry {
    intake_data::default_registry()
}

/// Opens the configured catalog and reads all of its records.
pub async fn load_catalog(
    registry: &CatalogRegistry,
    config: &CatalogConfig,
) -> anyhow::Result<Vec<SearchRecord>> {
    debug!(backend = %config.backend, location = %config.location, "opening catalog");
    let source = registry.create(config).await?;
    let records = source
        .records()
        .await
        .with_context(|| format!("reading catalog from the '{}' backend", config.backend))?;
    info!(records = records.len(), backend = %config.backend, "catalog loaded");
    Ok(records)
}

/// Real timers unless `instant` is set, in which case simulated requests
/// complete immediately.
pub fn latency(instant: bool) -> Arc<dyn Latency> {
    if instant {
        Arc::new(NoLatency)
    } else {
        Arc::new(TimerLatency)
    }
}

pub async fn lost_found_session(
    settings: &Settings,
    instant: bool,
) -> anyhow::Result<LostFoundSession> {
    let registry = build_registry();
    let catalog = load_catalog(&registry, &settings.catalog).await?;
    Ok(LostFoundSession::new(
        catalog,
        settings.lost_found_options(latency(instant)),
    ))
}

pub fn registration_session(settings: &Settings, instant: bool) -> RegistrationSession {
    RegistrationSession::new(settings.registration_options(latency(instant)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn default_settings_use_the_builtin_catalog() {
        let records = load_catalog(&build_registry(), &CatalogConfig::default())
            .await
            .unwrap();

        assert_eq!(records, intake_data::demo_records());
    }

    #[tokio::test]
    async fn unknown_backend_is_reported() {
        let config = CatalogConfig {
            backend: "postgres".to_string(),
            location: String::new(),
        };

        let err = load_catalog(&build_registry(), &config).await.unwrap_err();

        assert!(err.to_string().contains("postgres"));
    }

    #[tokio::test]
    async fn sessions_follow_settings() {
        let settings = Settings {
            entry_screen: "search".to_string(),
            rng_seed: Some(3),
            ..Default::default()
        };

        let session = lost_found_session(&settings, true).await.unwrap();
        assert_eq!(session.screen(), intake_core::Screen::Search);

        let registration = registration_session(&settings, true);
        assert_eq!(registration.route(), intake_core::Route::PatientForm);
    }
}
