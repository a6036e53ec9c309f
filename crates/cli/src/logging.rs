//! Logging setup
//!
//! `RUST_LOG` takes precedence when set. Otherwise the level comes from the
//! command line, defaulting to `warn` so that progress lines and reports on
//! stdout are not interleaved with log noise. Logs always go to stderr.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

const CRATES: &[&str] = &[
    "taskcluster",
    "taskcluster_cli_common",
    "taskcluster_cli_client",
    "taskcluster_cli_status",
    "taskcluster_cli_generator",
];

/// Pick the level from the explicit level, then `--verbose`, then `--quiet`
pub fn resolve_level(log_level: Option<&str>, verbose: bool, quiet: bool) -> Level {
    if let Some(level) = log_level {
        parse_level(level)
    } else if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    }
}

pub fn init(level: Level) {
    INIT.call_once(|| {
        let filter = if env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            let mut filter = EnvFilter::new("warn");
            for krate in CRATES {
                if let Ok(directive) = format!("{}={}", krate, level).parse() {
                    filter = filter.add_directive(directive);
                }
            }
            filter
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::WARN
        }
    }
}
