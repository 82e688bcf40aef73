//! Ordering and summary of batch results.

use crate::pricing::price_value;
use crate::types::DomainVerdict;

/// Sorts unpriced and taken domains after every priced available one.
const UNPRICED: u32 = u32::MAX;

/// Sort key: available first, then cheapest, then lowercase name.
pub fn sort_key(verdict: &DomainVerdict) -> (u8, u32, String) {
    let priority = if verdict.is_available { 0 } else { 1 };
    let price = if verdict.is_available {
        price_value(&verdict.minimum_cost).unwrap_or(UNPRICED)
    } else {
        UNPRICED
    };
    (priority, price, verdict.domain.to_lowercase())
}

/// Sort verdicts into display order.
pub fn sort_verdicts(verdicts: &mut [DomainVerdict]) {
    verdicts.sort_by_cached_key(sort_key);
}

/// Counts and name lists for the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Domains the user typed
    pub provided: usize,
    /// Domains checked after expansion
    pub checked: usize,
    /// Number of available verdicts
    pub available: usize,
    /// Available names in processing order
    pub available_domains: Vec<String>,
    /// Taken names in processing order
    pub taken_domains: Vec<String>,
}

impl BatchSummary {
    /// Build a summary from verdicts in the order they were produced.
    pub fn new(provided: usize, verdicts: &[DomainVerdict]) -> Self {
        let (available, taken): (Vec<&DomainVerdict>, Vec<&DomainVerdict>) =
            verdicts.iter().partition(|v| v.is_available);

        Self {
            provided,
            checked: verdicts.len(),
            available: available.len(),
            available_domains: available.iter().map(|v| v.domain.clone()).collect(),
            taken_domains: taken.iter().map(|v| v.domain.clone()).collect(),
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Summary: {} domains provided, {} checked, {} available",
            self.provided, self.checked, self.available
        )
    }
}
