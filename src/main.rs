//! parkit-permit - request a Park It Right visitor permit from two JSON files.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing::{error, info, warn};

use parkit_permit::{BrowserConfig, PermitConfig, RunOptions};

#[derive(Parser)]
#[command(name = "parkit-permit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Resident JSON file
    #[arg(short = 'r', value_name = "PATH")]
    resident: Option<PathBuf>,

    /// Visitor JSON file
    #[arg(short = 'v', value_name = "PATH")]
    visitor: Option<PathBuf>,

    /// Run Chromium without a window
    #[arg(long)]
    headless: bool,

    /// Chromium/Chrome executable to launch
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<String>,

    /// Directory the screenshot is written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Validate the input files and stop before opening a browser
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let (resident_path, visitor_path) = match (cli.resident, cli.visitor) {
        (None, _) => {
            warn!("Resident file -r is required");
            Cli::command().print_help()?;
            return Ok(());
        }
        (_, None) => {
            warn!("Visitor file -v is required");
            Cli::command().print_help()?;
            return Ok(());
        }
        (Some(r), Some(v)) => (r, v),
    };

    let browser = BrowserConfig {
        headless: cli.headless,
        chrome_path: cli.chrome_path,
        ..BrowserConfig::default()
    };
    let permit = PermitConfig {
        output_dir: cli.output_dir,
        ..PermitConfig::default()
    };

    let options = RunOptions {
        resident_path,
        visitor_path,
        browser,
        permit,
        dry_run: cli.dry_run,
    };

    match parkit_permit::run(options).await {
        Ok(Some(path)) => info!("registration saved to {}", path.display()),
        Ok(None) => info!("input files are valid"),
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
