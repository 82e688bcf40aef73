//! Domain Availability CLI Application
//!
//! Checks a batch of domain names against WHOIS and prints the available
//! ones, cheapest first. The lookup, classification and ordering logic lives
//! in domain-avail-lib; this binary handles arguments, configuration layering,
//! logging and terminal output.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domain_avail_lib::{
    expand_domain_inputs, load_env_config, parse_timeout_string, sort_verdicts, BatchSummary,
    CheckConfig, ConfigManager, DomainChecker, EnvConfig, FileConfig, NoProgress,
    ProgressReporter,
};
use std::process;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-avail
#[derive(Parser, Debug)]
#[command(name = "domain-avail")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Sai Dutt G.V <gvs46@protonmail.com>")]
#[command(about = "Check domain availability using WHOIS")]
#[command(
    long_about = "Check domain availability using WHOIS.\n\nEvery .com name is also checked as .ai and .io. Available domains are listed cheapest first."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domain names to check
    #[arg(value_name = "DOMAINS", required = true, num_args = 1..)]
    pub domains: Vec<String>,

    /// List available and taken domain names after the summary
    #[arg(short = 'v', long = "verbose", help_heading = "Output Format")]
    pub verbose: bool,

    /// Output all results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Max concurrent lookups (default: 1, max: 100)
    #[arg(short = 'c', long = "concurrency", value_name = "N", help_heading = "Performance")]
    pub concurrency: Option<usize>,

    /// Timeout per lookup, e.g. "5s", "2m" (default: 10s)
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// WHOIS program to run instead of `whois`
    #[arg(long = "whois-command", value_name = "PATH", help_heading = "Protocol")]
    pub whois_command: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show debug logging on stderr
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,
}

/// Settings resolved from every configuration layer.
#[derive(Debug, Clone)]
struct Settings {
    check: CheckConfig,
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(args.debug);

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    tracing::debug!("domain-avail v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber.
///
/// `--debug` forces debug level; otherwise RUST_LOG applies, falling back to warn.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if args.domains.is_empty() {
        return Err("You must specify at least one domain name".to_string());
    }

    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 || concurrency > 100 {
            return Err("Concurrency must be between 1 and 100".to_string());
        }
    }

    if let Some(timeout) = &args.timeout {
        if parse_timeout_string(timeout).is_none() {
            return Err(format!(
                "Invalid timeout '{}', use format like '5s', '30s', '2m'",
                timeout
            ));
        }
    }

    if let Some(command) = &args.whois_command {
        if command.trim().is_empty() {
            return Err("WHOIS command cannot be empty".to_string());
        }
    }

    Ok(())
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = build_settings(&args)?;
    let domains = expand_domain_inputs(&args.domains);

    tracing::debug!(
        "Checking {} domains (concurrency {}, timeout {:?}, whois '{}')",
        domains.len(),
        settings.check.concurrency,
        settings.check.timeout,
        settings.check.whois_command
    );

    let checker = DomainChecker::with_config(settings.check);

    if args.json {
        let mut verdicts = checker.check_domains(&domains, &mut NoProgress).await;
        sort_verdicts(&mut verdicts);
        println!("{}", serde_json::to_string_pretty(&verdicts)?);
        return Ok(());
    }

    ui::print_header();

    let mut progress: Box<dyn ProgressReporter> = match ui::TerminalProgress::for_stdout() {
        Some(reporter) => Box::new(reporter),
        None => Box::new(NoProgress),
    };
    let mut verdicts = checker.check_domains(&domains, progress.as_mut()).await;

    // Listings follow processing order, the table follows sort order
    let summary = BatchSummary::new(args.domains.len(), &verdicts);
    sort_verdicts(&mut verdicts);

    ui::print_results(&verdicts);
    ui::print_footer(&summary, settings.verbose);

    Ok(())
}

/// Build settings with precedence CLI > environment > config file > defaults.
///
/// An explicit config file (`--config`, then DA_CONFIG) must load; otherwise
/// discovered files are used and unreadable ones are skipped.
fn build_settings(args: &Args) -> Result<Settings, Box<dyn std::error::Error>> {
    let env_config = load_env_config();
    let config_manager = ConfigManager::new();

    let explicit_path = args.config.as_ref().or(env_config.config.as_ref());
    let file_config = match explicit_path {
        Some(path) => {
            tracing::debug!("Using explicit config file: {}", path);
            config_manager
                .load_file(path)
                .map_err(|e| format!("Failed to load config file '{}': {}", path, e))?
        }
        None => config_manager.discover_and_load(),
    };

    Ok(resolve_settings(args, file_config, env_config))
}

/// Layer file, environment and CLI values over the defaults.
fn resolve_settings(args: &Args, file_config: FileConfig, env_config: EnvConfig) -> Settings {
    let mut config = CheckConfig::default();
    let mut verbose = false;

    // Step 1: config file
    if let Some(defaults) = file_config.defaults {
        if let Some(timeout) = defaults.timeout.as_deref().and_then(parse_timeout_string) {
            config = config.with_timeout(timeout);
        }
        if let Some(concurrency) = defaults.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(file_verbose) = defaults.verbose {
            verbose = file_verbose;
        }
        if let Some(command) = defaults.whois_command {
            config = config.with_whois_command(command);
        }
    }

    // Step 2: DA_* environment variables
    if let Some(timeout) = env_config.timeout {
        config = config.with_timeout(timeout);
    }
    if let Some(concurrency) = env_config.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(env_verbose) = env_config.verbose {
        verbose = env_verbose;
    }
    if let Some(command) = env_config.whois_command {
        config = config.with_whois_command(command);
    }

    // Step 3: CLI arguments (highest precedence)
    if let Some(timeout) = args.timeout.as_deref().and_then(parse_timeout_string) {
        config = config.with_timeout(timeout);
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    // A flag can only switch verbose on; its absence keeps lower layers
    if args.verbose {
        verbose = true;
    }
    if let Some(command) = &args.whois_command {
        config = config.with_whois_command(command.clone());
    }

    Settings {
        check: config,
        verbose,
    }
}
