//! uiprobe CLI - headless browser probes for UI verification
//!
//! Usage:
//!   uiprobe basic                 Navigate, settle, capture a screenshot
//!   uiprobe console               Same, streaming console output to stdout
//!   uiprobe interactive [TARGET]  Wait for the app, click a target, capture
//!   uiprobe init                  Write a default uiprobe.toml

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use uiprobe_browser::locator::TargetRole;
use uiprobe_browser::probe::{
    run_basic_probe, run_console_probe, run_interactive_probe, ProbeReport, ProbeSettings,
};
use uiprobe_core::{ProbeStatus, UiprobeConfig};

#[derive(Parser)]
#[command(name = "uiprobe")]
#[command(author, version, about = "Headless browser probes for UI verification")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (defaults to uiprobe.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate to the target, settle and capture a screenshot
    Basic {
        /// CSS selector to await before the settle delay
        #[arg(long, value_name = "SELECTOR")]
        wait_selector: Option<String>,

        #[command(flatten)]
        probe: ProbeArgs,
    },

    /// Capture a screenshot while streaming console output to stdout
    Console {
        #[command(flatten)]
        probe: ProbeArgs,
    },

    /// Wait for the app to render, click a target element, capture the result
    Interactive {
        /// Accessible name of the element to click
        #[arg(default_value = "Dump")]
        target: String,

        /// Role of the target element
        #[arg(long, default_value = "link")]
        role: CliRole,

        /// Text that marks the application as rendered (overrides the config)
        #[arg(long, value_name = "TEXT")]
        sentinel: Option<String>,

        #[command(flatten)]
        probe: ProbeArgs,
    },

    /// Write a default configuration file
    Init {
        /// Path for the configuration file
        #[arg(default_value = "uiprobe.toml")]
        path: PathBuf,
    },
}

/// Flags shared by every probe; each one overrides its config value
#[derive(Args)]
struct ProbeArgs {
    /// Target URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Directory screenshots are written to
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Navigation and element wait timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Settle delay before capture, in milliseconds
    #[arg(long, value_name = "MS")]
    settle_ms: Option<u64>,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Disable the Chromium sandbox (needed inside most containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

/// CLI-friendly role enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliRole {
    Link,
    Button,
}

impl From<CliRole> for TargetRole {
    fn from(role: CliRole) -> Self {
        match role {
            CliRole::Link => TargetRole::Link,
            CliRole::Button => TargetRole::Button,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Basic {
            wait_selector,
            probe,
        } => cmd_basic(cli.config, probe, wait_selector).await,
        Commands::Console { probe } => cmd_console(cli.config, probe).await,
        Commands::Interactive {
            target,
            role,
            sentinel,
            probe,
        } => cmd_interactive(cli.config, probe, target, role, sentinel).await,
        Commands::Init { path } => cmd_init(path).await,
    }
}

async fn cmd_basic(
    config_path: Option<PathBuf>,
    args: ProbeArgs,
    wait_selector: Option<String>,
) -> Result<()> {
    let (_, settings) = load_settings(config_path, &args)?;
    let report = run_basic_probe(&settings, wait_selector.as_deref()).await;
    print_report(&report, args.json)
}

async fn cmd_console(config_path: Option<PathBuf>, args: ProbeArgs) -> Result<()> {
    let (_, settings) = load_settings(config_path, &args)?;
    let report = run_console_probe(&settings).await;
    print_report(&report, args.json)
}

async fn cmd_interactive(
    config_path: Option<PathBuf>,
    args: ProbeArgs,
    target: String,
    role: CliRole,
    sentinel: Option<String>,
) -> Result<()> {
    let (config, settings) = load_settings(config_path, &args)?;
    let sentinel = sentinel.unwrap_or(config.sentinel_text);
    let report = run_interactive_probe(&settings, &sentinel, role.into(), &target).await;
    print_report(&report, args.json)
}

async fn cmd_init(path: PathBuf) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    info!("Writing default configuration to {:?}", path);
    UiprobeConfig::write_default(&path).context("Failed to write configuration")?;

    println!("Wrote default configuration to {}", path.display());
    println!("Edit target_url and sentinel_text to match your application");

    Ok(())
}

/// Load the config file and apply flag overrides on top
fn load_settings(
    config_path: Option<PathBuf>,
    args: &ProbeArgs,
) -> Result<(UiprobeConfig, ProbeSettings)> {
    let path = config_path.unwrap_or_else(UiprobeConfig::default_path);
    let config = UiprobeConfig::load_or_default(&path)?;
    let mut settings = ProbeSettings::from_config(&config);

    if let Some(url) = &args.url {
        settings.url = url.clone();
    }
    if let Some(dir) = &args.out_dir {
        settings.artifact_dir = dir.clone();
    }
    if let Some(secs) = args.timeout {
        settings.navigation_timeout = Duration::from_secs(secs);
    }
    if let Some(ms) = args.settle_ms {
        settings.settle = Duration::from_millis(ms);
    }
    if args.headed {
        settings.headless = false;
    }
    if args.no_sandbox {
        settings.sandbox = false;
    }

    Ok((config, settings))
}

/// Render a probe report for the operator
///
/// Failed runs always render a line starting with "Error"; a sentinel or
/// target that never appeared renders as "not found".
fn render_report(report: &ProbeReport) -> String {
    let mut lines = vec![format!("{} probe against {}", report.kind, report.url)];

    if let Some(title) = &report.title {
        lines.push(format!("Title: {}", title));
    }
    if let Some(screenshot) = &report.screenshot {
        lines.push(format!("Screenshot saved: {}", screenshot.path.display()));
    }

    match report.status {
        ProbeStatus::Completed => {
            if report.clicked {
                lines.push("Target clicked".to_string());
            }
            lines.push("Status: completed".to_string());
        }
        ProbeStatus::TargetMissing => {
            lines.push("Status: target not found (see screenshot)".to_string());
        }
        ProbeStatus::Failed => {
            lines.push(format!(
                "Error: {}",
                report.failure.as_deref().unwrap_or("unknown")
            ));
        }
    }

    lines.join("\n")
}

/// Print a probe report to stdout
///
/// Probe outcomes are reported, not raised: the process exits 0 whether the
/// probe completed, found nothing to click, or failed outright.
fn print_report(report: &ProbeReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}", render_report(report));
    Ok(())
}
