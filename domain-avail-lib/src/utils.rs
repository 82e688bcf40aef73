//! Utility functions for domain input processing.
//!
//! Normalization is best-effort and never fails: whatever the user typed is
//! turned into something the lookup can be attempted with.

/// Normalize a user-supplied domain string.
///
/// Lowercases, trims, drops an `http://` or `https://` prefix (everything up
/// to and including the first `//`) and then a leading `www.`.
///
/// # Examples
///
/// ```rust
/// use domain_avail_lib::normalize_domain;
///
/// assert_eq!(normalize_domain("HTTP://WWW.Example.com"), "example.com");
/// ```
pub fn normalize_domain(raw: &str) -> String {
    let mut domain = raw.to_lowercase().trim().to_string();

    if domain.starts_with("http://") || domain.starts_with("https://") {
        if let Some((_, rest)) = domain.split_once("//") {
            domain = rest.to_string();
        }
    }

    if let Some(rest) = domain.strip_prefix("www.") {
        domain = rest.to_string();
    }

    domain
}

/// Expand user inputs with `.ai` and `.io` siblings of every `.com` entry.
///
/// Each `.com` entry is immediately followed by its siblings; everything
/// else passes through unchanged. The suffix test is made on the raw input,
/// so the base name keeps whatever prefix the user typed.
///
/// # Arguments
///
/// * `domains` - Input domain names, in the order given
///
/// # Returns
///
/// Vector of domains ready for checking, duplicates preserved.
pub fn expand_domain_inputs(domains: &[String]) -> Vec<String> {
    let mut results = Vec::with_capacity(domains.len() * 3);

    for domain in domains {
        results.push(domain.clone());
        if let Some(base_name) = domain.strip_suffix(".com") {
            results.push(format!("{}.ai", base_name));
            results.push(format!("{}.io", base_name));
        }
    }

    results
}

/// Extract the last label of a domain, if it has one.
pub fn extract_tld(domain: &str) -> Option<&str> {
    domain
        .rsplit_once('.')
        .map(|(_, tld)| tld)
        .filter(|tld| !tld.is_empty())
}
