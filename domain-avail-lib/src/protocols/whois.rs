//! WHOIS lookups through the system `whois` command.
//!
//! The command handles server selection and registrar referrals. This module
//! runs it, recognises "no match" and rate limit answers, and parses the
//! `Key: Value` lines of everything else into a [`WhoisRecord`].

use crate::error::{DomainAvailError, NO_MATCH_PATTERNS};
use crate::protocols::RecordLookup;
use crate::types::{CheckConfig, LookupOutcome, OneOrMany, RecordDate, WhoisRecord};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;
use tokio::process::Command;

lazy_static! {
    /// `Key: Value` line; the key stops at the first colon.
    static ref FIELD_LINE: Regex =
        Regex::new(r"^\s*([A-Za-z][A-Za-z0-9 ._/\-]*?)\s*:\s*(.*?)\s*$")
            .expect("field line pattern is valid");
}

const REGISTRAR_KEYS: [&str; 3] = ["registrar", "sponsoring registrar", "registrar name"];
const STATUS_KEYS: [&str; 2] = ["domain status", "status"];
const CREATION_KEYS: [&str; 6] = [
    "creation date",
    "created",
    "created on",
    "registered on",
    "registration time",
    "domain registration date",
];
const EXPIRATION_KEYS: [&str; 7] = [
    "registry expiry date",
    "registrar registration expiration date",
    "expiration date",
    "expiry date",
    "expires",
    "expires on",
    "paid-till",
];

const RATE_LIMIT_PATTERNS: [&str; 6] = [
    "rate limit exceeded",
    "too many requests",
    "quota exceeded",
    "limit exceeded",
    "throttled",
    "rate-limited",
];

/// WHOIS client backed by the system's `whois` program.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    /// Program to run
    command: String,
    /// Timeout for one query, including referrals
    timeout: Duration,
}

impl WhoisClient {
    /// Create a new WHOIS client with default settings.
    pub fn new() -> Self {
        Self::with_config(&CheckConfig::default())
    }

    /// Create a WHOIS client from batch configuration.
    pub fn with_config(config: &CheckConfig) -> Self {
        Self {
            command: config.whois_command.clone(),
            timeout: config.timeout,
        }
    }

    /// Create a new WHOIS client with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::new()
        }
    }

    /// Run the query and interpret the raw response.
    async fn query(&self, domain: &str) -> LookupOutcome {
        let mut command = Command::new(&self.command);
        if domain.starts_with('-') {
            command.arg("--");
        }
        command.arg(domain).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| DomainAvailError::timeout("WHOIS query", self.timeout))?
            .map_err(|e| {
                DomainAvailError::whois(
                    domain,
                    format!(
                        "Failed to execute {} command: {}. Make sure 'whois' is installed.",
                        self.command, e
                    ),
                )
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if is_rate_limited(&stdout) {
            return Err(DomainAvailError::rate_limited(
                "whois",
                format!("query for {} was rate limited", domain),
            ));
        }

        if stdout.trim().is_empty() {
            if output.status.success() {
                return Ok(None);
            }
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainAvailError::whois(
                domain,
                format!("whois exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        // A registered field outweighs any "not found" line from a referral
        let record = parse_whois_response(&stdout);
        if record.is_empty() {
            if let Some(line) = find_no_match_line(&stdout) {
                return Err(DomainAvailError::whois(domain, line));
            }
        }

        Ok(Some(record))
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> LookupOutcome {
        tracing::debug!(domain, command = %self.command, "running whois");
        self.query(domain).await
    }
}

/// Parse a WHOIS text response into a registration record.
///
/// Keys are matched case-insensitively. Repeated keys accumulate in order,
/// which is how referral output (registry block, then registrar block)
/// ends up as a list with the registry value first.
pub fn parse_whois_response(text: &str) -> WhoisRecord {
    let mut registrar = None;
    let mut status = Vec::new();
    let mut created = Vec::new();
    let mut expires = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('%') || trimmed.starts_with('#') || trimmed.starts_with(">>>") {
            continue;
        }

        let Some(caps) = FIELD_LINE.captures(line) else {
            continue;
        };
        let key = caps[1].to_lowercase();
        let value = caps[2].trim();
        if value.is_empty() {
            continue;
        }

        let key = key.as_str();
        if REGISTRAR_KEYS.contains(&key) {
            registrar.get_or_insert_with(|| value.to_string());
        } else if STATUS_KEYS.contains(&key) {
            status.push(value.to_string());
        } else if CREATION_KEYS.contains(&key) {
            created.push(RecordDate::parse(value));
        } else if EXPIRATION_KEYS.contains(&key) {
            expires.push(RecordDate::parse(value));
        }
    }

    WhoisRecord {
        registrar,
        status: OneOrMany::from_vec(status),
        creation_date: OneOrMany::from_vec(created),
        expiration_date: OneOrMany::from_vec(expires),
    }
}

/// First response line carrying a "no match" phrase.
fn find_no_match_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| {
            let lower = line.to_lowercase();
            NO_MATCH_PATTERNS.iter().any(|pattern| lower.contains(pattern))
        })
        .map(String::from)
}

/// Check if the WHOIS output indicates rate limiting.
fn is_rate_limited(output: &str) -> bool {
    let output_lower = output.to_lowercase();
    RATE_LIMIT_PATTERNS
        .iter()
        .any(|pattern| output_lower.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTERED_COM: &str = "   Domain Name: GOOGLE.COM
   Registry Domain ID: 2138514_DOMAIN_COM-VRSN
   Registrar WHOIS Server: whois.markmonitor.com
   Registrar URL: http://www.markmonitor.com
   Updated Date: 2019-09-09T15:39:04Z
   Creation Date: 1997-09-15T04:00:00Z
   Registry Expiry Date: 2028-09-14T04:00:00Z
   Registrar: MarkMonitor Inc.
   Registrar IANA ID: 292
   Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited
   Domain Status: clientTransferProhibited https://icann.org/epp#clientTransferProhibited
>>> Last update of whois database: 2024-01-01T00:00:00Z <<<
";

    #[test]
    fn test_parse_registered_response() {
        let record = parse_whois_response(REGISTERED_COM);

        assert_eq!(record.registrar.as_deref(), Some("MarkMonitor Inc."));
        let status = record.status.unwrap();
        assert_eq!(status.iter().count(), 2);
        assert!(status.first().unwrap().starts_with("clientDeleteProhibited"));

        let created = record.creation_date.unwrap();
        assert_eq!(created.first().and_then(RecordDate::year), Some(1997));
        let expires = record.expiration_date.unwrap();
        assert_eq!(expires.first().and_then(RecordDate::year), Some(2028));
    }

    #[test]
    fn test_parse_keeps_first_registrar_and_all_dates() {
        let text = "Registrar: Registry View\nCreation Date: 2001-01-01\n\
                    Registrar: Registrar View\nCreation Date: 2001-01-02\n";
        let record = parse_whois_response(text);

        assert_eq!(record.registrar.as_deref(), Some("Registry View"));
        assert!(matches!(record.creation_date, Some(OneOrMany::Many(ref v)) if v.len() == 2));
    }

    #[test]
    fn test_parse_other_registry_formats() {
        let text = "% Comment line\ndomain:       example.ru\nstate:        REGISTERED\n\
                    created:      2004-05-06T20:00:00Z\npaid-till:    2025-05-06T21:00:00Z\n";
        let record = parse_whois_response(text);

        assert!(record.registrar.is_none());
        assert_eq!(
            record.creation_date.as_ref().and_then(OneOrMany::first).and_then(RecordDate::year),
            Some(2004)
        );
        assert!(record.expiration_date.is_some());
    }

    #[test]
    fn test_parse_ignores_blank_values_and_noise() {
        let text = "Registrar:\nNOTICE: bulk queries are not permitted\nStatus:   \n";
        let record = parse_whois_response(text);
        assert!(record.is_empty());
    }

    #[test]
    fn test_find_no_match_line() {
        let text = "\nNo match for \"EXAMPLE-NOT-REGISTERED.COM\".\n>>> Last update <<<\n";
        assert_eq!(
            find_no_match_line(text),
            Some("No match for \"EXAMPLE-NOT-REGISTERED.COM\".".to_string())
        );

        assert_eq!(find_no_match_line(REGISTERED_COM), None);
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(is_rate_limited("Rate limit exceeded. Try again later."));
        assert!(is_rate_limited("Too many requests from your IP."));
        assert!(!is_rate_limited("Normal whois response"));
    }

    #[test]
    fn test_whois_client_creation() {
        let client = WhoisClient::new();
        assert_eq!(client.timeout, Duration::from_secs(10));
        assert_eq!(client.command, "whois");

        let custom_client = WhoisClient::with_timeout(Duration::from_secs(3));
        assert_eq!(custom_client.timeout, Duration::from_secs(3));
    }

    /// Client whose "whois" is `sh`, so the looked-up name is a script path.
    #[cfg(unix)]
    fn script_client(timeout: Duration) -> WhoisClient {
        let config = CheckConfig::default()
            .with_whois_command("sh")
            .with_timeout(timeout);
        WhoisClient::with_config(&config)
    }

    #[cfg(unix)]
    fn write_script(dir: &tempfile::TempDir, body: &str) -> String {
        let path = dir.path().join("whois.sh");
        std::fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_registered_fields_win_over_not_found_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = write_script(
            &dir,
            "echo 'Registrar: MarkMonitor Inc.'\n\
             echo 'Creation Date: 1997-09-15T04:00:00Z'\n\
             echo 'Domain Status: clientTransferProhibited'\n\
             echo 'Domain not found.'\n",
        );

        let record = script_client(Duration::from_secs(5))
            .lookup(&script)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.registrar_name(), Some("MarkMonitor Inc."));
        assert!(record.has_status());
        assert!(record.has_creation_date());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_no_match_only_response_is_available_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = write_script(&dir, "echo ''\necho 'No match for \"FREE.COM\".'\n");

        let err = script_client(Duration::from_secs(5))
            .lookup(&script)
            .await
            .unwrap_err();
        assert!(err.indicates_available());
        assert_eq!(err.to_string(), format!("WHOIS error for '{}': No match for \"FREE.COM\".", script));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_empty_output_with_success_is_no_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = write_script(&dir, "exit 0\n");

        let outcome = script_client(Duration::from_secs(5)).lookup(&script).await;
        assert!(matches!(outcome, Ok(None)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_empty_output_with_failure_carries_stderr() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = write_script(&dir, "echo 'connect: Network is unreachable' >&2\nexit 2\n");

        let err = script_client(Duration::from_secs(5))
            .lookup(&script)
            .await
            .unwrap_err();
        match &err {
            DomainAvailError::WhoisError { message, .. } => {
                assert!(message.contains("connect: Network is unreachable"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!err.indicates_available());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_rate_limited_response() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = write_script(&dir, "echo 'Rate limit exceeded. Try again later.'\n");

        let err = script_client(Duration::from_secs(5))
            .lookup(&script)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainAvailError::RateLimited { .. }));
        assert!(err.is_retryable());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_command_times_out() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = write_script(&dir, "sleep 5\n");

        let err = script_client(Duration::from_millis(200))
            .lookup(&script)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainAvailError::Timeout { .. }));
        assert!(!err.indicates_available());
    }

    #[tokio::test]
    async fn test_missing_command_is_generic_failure() {
        let config = CheckConfig::default().with_whois_command("/nonexistent/whois-binary");
        let client = WhoisClient::with_config(&config);

        let err = client.lookup("example.com").await.unwrap_err();
        assert!(matches!(err, DomainAvailError::WhoisError { .. }));
        assert!(!err.indicates_available());
    }
}
