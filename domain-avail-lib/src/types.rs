//! Core data types for domain availability checking.
//!
//! Registration records are loosely structured: any field may be missing,
//! and status or date fields may be a single value or a list depending on
//! the registry. This module models that shape explicitly so the classifier
//! works on typed optional fields.

use crate::error::DomainAvailError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// A record field that registries report either as a scalar or as a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// The canonical value: the scalar itself, or the first list element.
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.first(),
        }
    }

    /// An empty list carries no information.
    pub fn is_empty(&self) -> bool {
        match self {
            OneOrMany::One(_) => false,
            OneOrMany::Many(values) => values.is_empty(),
        }
    }

    /// Iterate over every value in reported order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value).iter(),
            OneOrMany::Many(values) => values.iter(),
        }
    }

    /// Collapse collected values: none -> `None`, one -> `One`, more -> `Many`.
    pub fn from_vec(mut values: Vec<T>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(OneOrMany::One),
            _ => Some(OneOrMany::Many(values)),
        }
    }
}

/// Formats tried, in order, after RFC 3339.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d", "%d.%m.%Y", "%Y/%m/%d"];

/// A registration date as reported by a registry.
///
/// Values that match a known format become structured dates; anything else
/// is kept verbatim so nothing is lost.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordDate {
    Parsed(NaiveDateTime),
    Raw(String),
}

impl RecordDate {
    /// Parse a registry date string, falling back to the raw text.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return RecordDate::Parsed(dt.naive_utc());
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return RecordDate::Parsed(dt);
            }
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                    return RecordDate::Parsed(dt);
                }
            }
        }

        RecordDate::Raw(trimmed.to_string())
    }

    fn is_blank(&self) -> bool {
        matches!(self, RecordDate::Raw(text) if text.is_empty())
    }

    /// Year of a structured date; raw text has no reliable year.
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        match self {
            RecordDate::Parsed(dt) => Some(dt.year()),
            RecordDate::Raw(_) => None,
        }
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordDate::Parsed(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            RecordDate::Raw(text) => write!(f, "{}", text),
        }
    }
}

impl Serialize for RecordDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(RecordDate::parse(&text))
    }
}

/// Registration record returned by a lookup collaborator.
///
/// Every field is optional. Field names accept both snake_case and the
/// camelCase spelling some WHOIS libraries emit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhoisRecord {
    /// Sponsoring registrar name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,

    /// Domain status codes (e.g., "clientTransferProhibited")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OneOrMany<String>>,

    /// When the domain was first registered
    #[serde(alias = "creationDate", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<OneOrMany<RecordDate>>,

    /// When the domain registration expires
    #[serde(alias = "expirationDate", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<OneOrMany<RecordDate>>,
}

impl WhoisRecord {
    /// Registrar name, when present and not blank.
    pub fn registrar_name(&self) -> Option<&str> {
        self.registrar
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// A status field with at least one value.
    pub fn has_status(&self) -> bool {
        field_present(&self.status, |s| s.is_empty())
    }

    /// A creation date field with at least one value.
    pub fn has_creation_date(&self) -> bool {
        field_present(&self.creation_date, RecordDate::is_blank)
    }

    /// An expiration date field with at least one value.
    pub fn has_expiration_date(&self) -> bool {
        field_present(&self.expiration_date, RecordDate::is_blank)
    }

    /// True when no field carries a usable value.
    pub fn is_empty(&self) -> bool {
        self.registrar_name().is_none()
            && !self.has_status()
            && !self.has_creation_date()
            && !self.has_expiration_date()
    }
}

/// A scalar counts when it is not blank; a list counts when it is non-empty.
fn field_present<T>(field: &Option<OneOrMany<T>>, blank: impl Fn(&T) -> bool) -> bool {
    match field {
        None => false,
        Some(OneOrMany::One(value)) => !blank(value),
        Some(OneOrMany::Many(values)) => !values.is_empty(),
    }
}

/// What a lookup collaborator produces for one domain.
///
/// `Ok(None)` means the collaborator returned nothing at all.
pub type LookupOutcome = Result<Option<WhoisRecord>, DomainAvailError>;

/// Classifier output for one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    /// Four-digit year, or empty when unknown
    pub creation_year: String,
}

impl Availability {
    pub fn available() -> Self {
        Self {
            available: true,
            creation_year: String::new(),
        }
    }

    pub fn taken(creation_year: String) -> Self {
        Self {
            available: false,
            creation_year,
        }
    }
}

/// Final verdict for one queried domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainVerdict {
    /// Normalized domain name
    pub domain: String,

    /// Whether the domain looks unregistered
    pub is_available: bool,

    /// Display price such as "$10"; empty when no estimate applies
    pub minimum_cost: String,

    /// Year of first registration; empty when unknown
    pub creation_year: String,
}

impl DomainVerdict {
    /// Verdict for a domain whose lookup could not be trusted.
    pub fn taken<D: Into<String>>(domain: D) -> Self {
        Self {
            domain: domain.into(),
            is_available: false,
            minimum_cost: String::new(),
            creation_year: String::new(),
        }
    }
}

/// Configuration options for a batch run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Timeout for each individual lookup
    /// Default: 10 seconds
    pub timeout: Duration,

    /// Maximum number of lookups in flight
    /// Default: 1 (strictly sequential), Range: 1-100
    pub concurrency: usize,

    /// Program used for WHOIS queries
    /// Default: "whois"
    pub whois_command: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            concurrency: 1,
            whois_command: "whois".to_string(),
        }
    }
}

impl CheckConfig {
    /// Set the number of lookups in flight.
    ///
    /// Clamped to 1-100 to prevent resource exhaustion.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Set custom timeout for lookups.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a different WHOIS program.
    pub fn with_whois_command<C: Into<String>>(mut self, command: C) -> Self {
        self.whois_command = command.into();
        self
    }
}
