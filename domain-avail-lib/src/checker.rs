//! Batch runner.
//!
//! This module provides the `DomainChecker` that turns raw user inputs into
//! verdicts: normalize, look up, classify, price. Every input produces
//! exactly one verdict; lookup failures are absorbed, never propagated.

use crate::classify::classify;
use crate::pricing::minimum_cost;
use crate::progress::ProgressReporter;
use crate::protocols::{RecordLookup, WhoisClient};
use crate::types::{CheckConfig, DomainVerdict};
use crate::utils::{extract_tld, normalize_domain};
use futures::stream::{self, StreamExt};

/// Coordinates lookups and classification for a batch of domains.
///
/// # Example
///
/// ```rust,no_run
/// use domain_avail_lib::{DomainChecker, NoProgress};
///
/// #[tokio::main]
/// async fn main() {
///     let checker = DomainChecker::new();
///     let domains = vec!["example.com".to_string()];
///     for verdict in checker.check_domains(&domains, &mut NoProgress).await {
///         println!("{}: {}", verdict.domain, verdict.is_available);
///     }
/// }
/// ```
pub struct DomainChecker<L = WhoisClient> {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Source of registration records
    lookup: L,
}

impl DomainChecker<WhoisClient> {
    /// Create a checker using the system WHOIS command and default settings.
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker using the system WHOIS command.
    pub fn with_config(config: CheckConfig) -> Self {
        let lookup = WhoisClient::with_config(&config);
        Self { config, lookup }
    }
}

impl Default for DomainChecker<WhoisClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: RecordLookup> DomainChecker<L> {
    /// Create a checker around any lookup collaborator.
    pub fn with_lookup(lookup: L, config: CheckConfig) -> Self {
        Self { config, lookup }
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Produce the verdict for one raw input.
    pub async fn check_domain(&self, raw: &str) -> DomainVerdict {
        let domain = normalize_domain(raw);
        let outcome = self.lookup.lookup(&domain).await;

        if let Err(e) = &outcome {
            if e.indicates_available() {
                tracing::debug!(domain = %domain, "registry reports no record");
            } else {
                tracing::debug!(
                    domain = %domain,
                    tld = extract_tld(&domain).unwrap_or("-"),
                    retryable = e.is_retryable(),
                    "lookup failed, treating as taken: {}",
                    e
                );
            }
        }

        let availability = classify(&outcome);
        tracing::debug!(
            domain = %domain,
            available = availability.available,
            year = %availability.creation_year,
            "classified"
        );

        DomainVerdict {
            minimum_cost: minimum_cost(&domain, availability.available).to_string(),
            is_available: availability.available,
            creation_year: availability.creation_year,
            domain,
        }
    }

    /// Check every domain, reporting progress after each verdict.
    ///
    /// With concurrency 1 domains are checked one at a time in input order.
    /// Higher concurrency runs that many lookups at once and returns verdicts
    /// in completion order; callers sort afterwards either way.
    pub async fn check_domains(
        &self,
        domains: &[String],
        progress: &mut dyn ProgressReporter,
    ) -> Vec<DomainVerdict> {
        let total = domains.len();
        let mut verdicts = Vec::with_capacity(total);
        progress.on_start(total);

        let mut results = stream::iter(domains.iter().map(|domain| self.check_domain(domain)))
            .buffer_unordered(self.config.concurrency.max(1));

        while let Some(verdict) = results.next().await {
            progress.on_item(verdicts.len() + 1, total, &verdict.domain);
            verdicts.push(verdict);
        }

        progress.on_finish();
        verdicts
    }
}
