use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

static UIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unset,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unset => "",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "" => Some(Self::Unset),
            _ => None,
        }
    }
}

/// Identity documents the kiosk can scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Passport,
    Oms,
    Snils,
}

impl DocumentKind {
    pub fn all() -> &'static [DocumentKind] {
        &[DocumentKind::Passport, DocumentKind::Oms, DocumentKind::Snils]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::Oms => "oms",
            Self::Snils => "snils",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passport" => Some(Self::Passport),
            "oms" => Some(Self::Oms),
            "snils" => Some(Self::Snils),
            _ => None,
        }
    }
}

/// Opaque reference to a scanned document.
///
/// Scanning is simulated, so the handle is only a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHandle(pub String);

impl DocumentHandle {
    /// Handle produced by the simulated scanner for `kind`.
    pub fn simulated(kind: DocumentKind) -> Self {
        Self(format!("{}_scan.jpg", kind.as_str()))
    }
}

/// Unique patient identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Uip {
    /// No lookup has been made yet.
    #[default]
    Unassigned,
    /// A registry record already exists; always ten digits.
    Existing(String),
    /// A new identifier will be issued server side.
    Pending,
}

impl Uip {
    pub const PENDING_SENTINEL: &'static str = "pending";

    /// Wraps an existing identifier, checking it is ten digits.
    pub fn existing(value: &str) -> Result<Self, ValidationError> {
        if UIP_PATTERN.is_match(value) {
            Ok(Self::Existing(value.to_string()))
        } else {
            Err(ValidationError::InvalidValue {
                field: "uip",
                value: value.to_string(),
            })
        }
    }

    pub fn is_assigned(&self) -> bool {
        !matches!(self, Self::Unassigned)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unassigned => "",
            Self::Existing(value) => value,
            Self::Pending => Self::PENDING_SENTINEL,
        }
    }
}

impl fmt::Display for Uip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field update coming from the registration screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientField {
    Fio(String),
    Gender(Gender),
    BirthDate(Option<NaiveDate>),
    Phone(String),
    ManualEntry(bool),
}

impl PatientField {
    pub fn parse(name: &str, value: &str) -> Result<Self, ValidationError> {
        let invalid = |field: &'static str| ValidationError::InvalidValue {
            field,
            value: value.to_string(),
        };

        match name {
            "fio" => Ok(Self::Fio(value.to_string())),
            "gender" => Gender::parse(value)
                .map(Self::Gender)
                .ok_or_else(|| invalid("gender")),
            "birthDate" | "birth_date" => {
                if value.trim().is_empty() {
                    return Ok(Self::BirthDate(None));
                }
                NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                    .map(|date| Self::BirthDate(Some(date)))
                    .map_err(|_| invalid("birth_date"))
            }
            "phone" => Ok(Self::Phone(value.to_string())),
            "manualEntry" | "manual_entry" => match value.trim() {
                "true" | "on" | "1" => Ok(Self::ManualEntry(true)),
                "false" | "off" | "0" | "" => Ok(Self::ManualEntry(false)),
                _ => Err(invalid("manual_entry")),
            },
            other => Err(ValidationError::UnknownField(other.to_string())),
        }
    }
}

/// In-progress patient registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientForm {
    pub fio: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    pub passport_scan: Option<DocumentHandle>,
    pub oms_scan: Option<DocumentHandle>,
    pub snils_scan: Option<DocumentHandle>,
    pub manual_entry: bool,
    pub uip: Uip,
    pub is_unknown: bool,
}

impl PatientForm {
    /// Returns a copy of the form with one field replaced.
    pub fn set_field(&self, field: PatientField) -> Self {
        match field {
            PatientField::Fio(fio) => Self {
                fio,
                ..self.clone()
            },
            PatientField::Gender(gender) => Self {
                gender,
                ..self.clone()
            },
            PatientField::BirthDate(birth_date) => Self {
                birth_date,
                ..self.clone()
            },
            PatientField::Phone(phone) => Self {
                phone,
                ..self.clone()
            },
            PatientField::ManualEntry(manual_entry) => Self {
                manual_entry,
                ..self.clone()
            },
        }
    }

    /// Returns a copy of the form with `kind` scanned.
    pub fn with_scan(&self, kind: DocumentKind) -> Self {
        let handle = Some(DocumentHandle::simulated(kind));
        match kind {
            DocumentKind::Passport => Self {
                passport_scan: handle,
                ..self.clone()
            },
            DocumentKind::Oms => Self {
                oms_scan: handle,
                ..self.clone()
            },
            DocumentKind::Snils => Self {
                snils_scan: handle,
                ..self.clone()
            },
        }
    }

    pub fn with_uip(&self, uip: Uip) -> Self {
        Self {
            uip,
            ..self.clone()
        }
    }

    /// Marks the patient as unidentified.
    pub fn as_unknown(&self) -> Self {
        Self {
            is_unknown: true,
            ..self.clone()
        }
    }

    /// Leaves the unknown-patient branch. The "Next" gate applies again and
    /// the identifier the branch assigned is dropped.
    pub fn as_known(&self) -> Self {
        Self {
            is_unknown: false,
            uip: Uip::Unassigned,
            ..self.clone()
        }
    }

    pub fn scan(&self, kind: DocumentKind) -> Option<&DocumentHandle> {
        match kind {
            DocumentKind::Passport => self.passport_scan.as_ref(),
            DocumentKind::Oms => self.oms_scan.as_ref(),
            DocumentKind::Snils => self.snils_scan.as_ref(),
        }
    }

    /// The "Next" gate on the patient form: a name, or manual entry.
    pub fn can_advance(&self) -> bool {
        self.check_advance().is_ok()
    }

    pub fn check_advance(&self) -> Result<(), ValidationError> {
        if self.is_unknown || self.manual_entry || !self.fio.trim().is_empty() {
            Ok(())
        } else {
            Err(ValidationError::NameOrManualEntryRequired)
        }
    }
}
