use std::fmt;

use serde::{Deserialize, Serialize};

/// Metro stations a lost item can be reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Station {
    Pushkinskaya,
    Krasnopresnenskaya,
    Kurskaya,
    Tverskaya,
    Sukharevskaya,
}

impl Station {
    pub fn all() -> &'static [Station] {
        &[
            Station::Pushkinskaya,
            Station::Krasnopresnenskaya,
            Station::Kurskaya,
            Station::Tverskaya,
            Station::Sukharevskaya,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pushkinskaya => "Пушкинская",
            Self::Krasnopresnenskaya => "Краснопресненская",
            Self::Kurskaya => "Курская",
            Self::Tverskaya => "Тверская",
            Self::Sukharevskaya => "Сухаревская",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Пушкинская" => Some(Self::Pushkinskaya),
            "Краснопресненская" => Some(Self::Krasnopresnenskaya),
            "Курская" => Some(Self::Kurskaya),
            "Тверская" => Some(Self::Tverskaya),
            "Сухаревская" => Some(Self::Sukharevskaya),
            _ => None,
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
