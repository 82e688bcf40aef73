//! # Domain Avail Library
//!
//! Reports whether domains are registered, with a flat minimum registration
//! price for the ones that look free.
//!
//! Registration records are fetched by a [`RecordLookup`] collaborator (the
//! system `whois` command by default) and classified with an ordered
//! heuristic over whatever fields the registry filled in. Lookup failures
//! never abort a batch: they become "taken" verdicts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_avail_lib::{expand_domain_inputs, sort_verdicts, DomainChecker, NoProgress};
//!
//! #[tokio::main]
//! async fn main() {
//!     let inputs = vec!["example.com".to_string()];
//!     let domains = expand_domain_inputs(&inputs);
//!
//!     let checker = DomainChecker::new();
//!     let mut verdicts = checker.check_domains(&domains, &mut NoProgress).await;
//!     sort_verdicts(&mut verdicts);
//!
//!     for verdict in verdicts.iter().filter(|v| v.is_available) {
//!         println!("{} {}", verdict.domain, verdict.minimum_cost);
//!     }
//! }
//! ```

// Re-export main public API types and functions
// This makes them available as domain_avail_lib::TypeName
pub use checker::DomainChecker;
pub use classify::{classify, creation_year};
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
};
pub use error::DomainAvailError;
pub use pricing::{minimum_cost, price_value};
pub use progress::{NoProgress, ProgressReporter};
pub use protocols::{parse_whois_response, RecordLookup, WhoisClient};
pub use report::{sort_key, sort_verdicts, BatchSummary};
pub use types::{
    Availability, CheckConfig, DomainVerdict, LookupOutcome, OneOrMany, RecordDate, WhoisRecord,
};
pub use utils::{expand_domain_inputs, extract_tld, normalize_domain};

// Internal modules - these are not part of the public API
mod checker;
mod classify;
mod config;
mod error;
mod pricing;
mod progress;
mod protocols;
mod report;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainAvailError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
