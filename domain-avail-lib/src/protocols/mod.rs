//! Record lookup collaborators.
//!
//! The batch runner only knows the [`RecordLookup`] trait. The WHOIS client
//! is the production implementation; tests plug in in-memory fixtures.

use crate::types::LookupOutcome;
use async_trait::async_trait;

/// WHOIS protocol implementation
pub mod whois;

pub use whois::{parse_whois_response, WhoisClient};

/// Source of registration records for a domain.
///
/// Implementations return `Ok(Some(record))` for a parsed record, `Ok(None)`
/// when there is nothing to report, and an error whose message tells a
/// "no match" answer apart from a failed lookup.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    /// Look up the registration record for an already normalized domain.
    async fn lookup(&self, domain: &str) -> LookupOutcome;
}
