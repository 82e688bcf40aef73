//! Availability classification over loosely populated registration records.
//!
//! Registries fill records inconsistently, so the decision is an ordered
//! cascade: the first rule that matches wins.
//!
//! 1. No record at all: available.
//! 2. Lookup failed with a "no match" style message: available.
//! 3. Any other lookup failure: taken. A failed lookup never claims a
//!    domain is free.
//! 4. A status value containing an active status token: taken.
//! 5. A registrar: taken.
//! 6. A creation date: taken.
//! 7. An expiration date: taken.
//! 8. Otherwise: available.

use crate::types::{Availability, LookupOutcome, OneOrMany, RecordDate, WhoisRecord};

/// Status tokens that mean the domain is registered.
const ACTIVE_STATUSES: [&str; 4] = [
    "ok",
    "active",
    "clienttransferprohibited",
    "clientdeleteprohibited",
];

/// Classify the outcome of one lookup.
pub fn classify(outcome: &LookupOutcome) -> Availability {
    let record = match outcome {
        Ok(None) => return Availability::available(),
        Ok(Some(record)) => record,
        Err(e) if e.indicates_available() => return Availability::available(),
        Err(_) => return Availability::taken(String::new()),
    };

    if record.has_status() && has_active_status(record.status.as_ref()) {
        return Availability::taken(creation_year(record));
    }

    if record.registrar_name().is_some()
        || record.has_creation_date()
        || record.has_expiration_date()
    {
        return Availability::taken(creation_year(record));
    }

    Availability::available()
}

fn has_active_status(status: Option<&OneOrMany<String>>) -> bool {
    let joined = status
        .map(|s| {
            s.iter()
                .map(|token| token.to_lowercase())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();

    ACTIVE_STATUSES.iter().any(|token| joined.contains(token))
}

/// Year the domain was first registered, or empty when unknown.
///
/// Uses the first creation date. A structured date gives its year; raw text
/// gives its first four characters when it has at least four.
pub fn creation_year(record: &WhoisRecord) -> String {
    match record.creation_date.as_ref().and_then(OneOrMany::first) {
        Some(date @ RecordDate::Parsed(_)) => {
            date.year().map(|year| year.to_string()).unwrap_or_default()
        }
        Some(RecordDate::Raw(text)) if text.chars().count() >= 4 => text.chars().take(4).collect(),
        _ => String::new(),
    }
}
