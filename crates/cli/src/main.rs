//! Taskcluster CLI
//!
//! Command-line interface for checking Taskcluster service status and
//! generating static API definitions from the service manifest.

mod logging;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskcluster_cli_client::HttpFetcher;
use taskcluster_cli_common::{ReportMode, Settings};
use taskcluster_cli_generator::{ApiGenerator, GenerateOptions};
use taskcluster_cli_status::{build_report, CacheStore, ReportLine, StatusContext};

#[derive(Parser)]
#[command(name = "taskcluster")]
#[command(version, about = "Query Taskcluster service status and generate API definitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.taskcluster-cli/config.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Service manifest URL
    #[arg(long, global = true)]
    manifest_url: Option<String>,

    /// Endpoint cache file
    #[arg(long, global = true)]
    cache_file: Option<PathBuf>,

    /// Maximum concurrent requests per stage
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Timeout in seconds for a whole refresh, poll or generation run
    #[arg(long, global = true)]
    cycle_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the current running status of Taskcluster services
    #[command(
        long_about = "When called without arguments, reports the current running status of all \
        known Taskcluster services.\n\nBy specifying one or more services as arguments, you can \
        limit the services included in the status report.",
        after_help = "EXAMPLES:\n  \
        # Status of every service\n  \
        taskcluster status\n\n  \
        # Only the queue and auth services\n  \
        taskcluster status queue auth"
    )]
    Status {
        /// Services to query (all known services if omitted)
        services: Vec<String>,

        /// Refresh the endpoint cache before polling
        #[arg(long)]
        refresh: bool,

        /// Do not report services that answer as not alive
        #[arg(long)]
        silent_down: bool,
    },

    /// List known services and their health-check URLs
    Services {
        /// Refresh the endpoint cache first
        #[arg(long)]
        refresh: bool,
    },

    /// Inspect or clear the endpoint cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Generate Rust API definitions from the service manifest
    #[command(after_help = "EXAMPLES:\n  \
        # Write to a file\n  \
        taskcluster generate-apis --output src/apis/generated.rs\n\n  \
        # Print to stdout\n  \
        taskcluster generate-apis --output -")]
    GenerateApis {
        /// Output file, or "-" for stdout
        #[arg(short, long)]
        output: PathBuf,

        /// Name of the generated services table
        #[arg(long, default_value = "SERVICES")]
        services_var: String,

        /// Name of the generated schemas table
        #[arg(long, default_value = "SCHEMAS")]
        schemas_var: String,

        /// Module path providing the Service and Entry types
        #[arg(long, default_value = "taskcluster_cli_generator::definitions")]
        definitions_path: String,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show the cached endpoints and their age
    Show,
    /// Delete the cache file
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(logging::resolve_level(
        cli.log_level.as_deref(),
        cli.verbose,
        cli.quiet,
    ));

    let settings = load_settings(&cli)?;

    match cli.command {
        Commands::Status {
            ref services,
            refresh,
            silent_down,
        } => {
            let mode = if silent_down {
                ReportMode::SilentDown
            } else {
                settings.report_mode
            };
            status_command(settings, services, refresh, mode).await?;
        }
        Commands::Services { refresh } => {
            services_command(settings, refresh).await?;
        }
        Commands::Cache { ref action } => match action {
            CacheAction::Show => cache_show_command(settings)?,
            CacheAction::Clear => cache_clear_command(settings)?,
        },
        Commands::GenerateApis {
            ref output,
            ref services_var,
            ref schemas_var,
            ref definitions_path,
        } => {
            let options = GenerateOptions {
                services_var: services_var.clone(),
                schemas_var: schemas_var.clone(),
                definitions_path: definitions_path.clone(),
            };
            generate_apis_command(settings, options, output, cli.verbose).await?;
        }
    }

    Ok(())
}

/// Defaults, then config file, then command-line overrides
fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings =
        Settings::resolve(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(url) = &cli.manifest_url {
        settings.manifest_url = url.clone();
    }
    if let Some(path) = &cli.cache_file {
        settings.cache_path = path.clone();
    }
    if let Some(concurrency) = cli.concurrency {
        settings.concurrency = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        settings.request_timeout_secs = timeout;
    }
    if let Some(timeout) = cli.cycle_timeout {
        settings.cycle_timeout_secs = timeout;
    }

    settings.validate().context("Invalid configuration")?;
    Ok(settings)
}

fn status_context(settings: Settings) -> Result<StatusContext> {
    let fetcher =
        HttpFetcher::new(settings.request_timeout()).context("Failed to create HTTP client")?;
    Ok(StatusContext::new(settings, Arc::new(fetcher)))
}

async fn status_command(
    settings: Settings,
    services: &[String],
    refresh: bool,
    mode: ReportMode,
) -> Result<()> {
    let context = status_context(settings)?;
    let endpoints = context
        .endpoints(refresh)
        .await
        .context("Failed to discover service endpoints")?;

    let statuses = context
        .poll(&endpoints, services)
        .await
        .context("Failed to query service status")?;

    let report = build_report(&statuses, mode);
    let mut down = 0;
    for line in &report {
        match line {
            ReportLine::Alive {
                service,
                uptime_seconds,
            } => {
                println!(
                    "  {:<16} {} {}",
                    service,
                    "Alive".green(),
                    format!("(up {:.0}s)", uptime_seconds).dimmed()
                );
            }
            ReportLine::Down { service } => {
                down += 1;
                println!("  {:<16} {}", service, "Down".red().bold());
            }
        }
    }

    if down > 0 {
        anyhow::bail!("{} of {} service(s) down", down, statuses.len());
    }

    Ok(())
}

async fn services_command(settings: Settings, refresh: bool) -> Result<()> {
    let context = status_context(settings)?;
    let endpoints = context
        .endpoints(refresh)
        .await
        .context("Failed to discover service endpoints")?;

    println!("{}", "Known services:".bold());
    for (service, url) in &endpoints {
        println!("  • {:<16} {}", service.cyan(), url);
    }
    println!("\n{} {} services", "✓".green(), endpoints.len());

    Ok(())
}

fn cache_show_command(settings: Settings) -> Result<()> {
    let cache = CacheStore::new(settings.cache_path.clone());

    println!("{} Cache file: {}", "→".cyan(), cache.path().display());
    let record = match cache.load().context("Failed to read cache")? {
        Some(record) => record,
        None => {
            println!("{} No cache file", "⚠".yellow());
            return Ok(());
        }
    };

    let age = record.age_at(Utc::now());
    let state = if record.is_expired(settings.cache_max_age()) {
        "expired".yellow()
    } else {
        "fresh".green()
    };
    println!(
        "  Last updated: {} ({}s ago, {})",
        record.last_updated.to_rfc3339(),
        age.as_secs(),
        state
    );
    for (service, url) in &record.endpoints {
        println!("  • {:<16} {}", service.cyan(), url);
    }

    Ok(())
}

fn cache_clear_command(settings: Settings) -> Result<()> {
    let cache = CacheStore::new(settings.cache_path);
    let path = cache.path().display().to_string();
    if cache.clear().context("Failed to clear cache")? {
        println!("{} Removed {}", "✓".green(), path);
    } else {
        println!("{} No cache file at {}", "⚠".yellow(), path);
    }
    Ok(())
}

async fn generate_apis_command(
    settings: Settings,
    options: GenerateOptions,
    output: &Path,
    verbose: bool,
) -> Result<()> {
    let to_stdout = output == Path::new("-");
    if !to_stdout {
        println!(
            "{} Generating API definitions from: {}",
            "→".cyan(),
            settings.manifest_url
        );
    }
    if verbose && !to_stdout {
        println!("  Services binding: {}", options.services_var);
        println!("  Schemas binding: {}", options.schemas_var);
        println!("  Definitions: {}", options.definitions_path);
        println!("  Concurrency: {}", settings.concurrency);
    }

    let fetcher =
        HttpFetcher::new(settings.request_timeout()).context("Failed to create HTTP client")?;
    let generator = ApiGenerator::new(settings, Arc::new(fetcher), options)
        .context("Failed to create generator")?;

    if to_stdout {
        let source = generator
            .generate()
            .await
            .context("Failed to generate API definitions")?;
        print!("{}", source);
        return Ok(());
    }

    generator
        .generate_to_file(output)
        .await
        .context("Failed to generate API definitions")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("  📄 {}", output.display());

    Ok(())
}
