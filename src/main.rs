use anyhow::{Result, bail};
use clap::Parser;
use jobprobe::http::{MAX_ATTEMPTS, RETRY_DELAY_MS};
use jobprobe::suite::{self, SuiteConfig};

/// jobprobe - career-listing API contract checker
///
/// Probes a job-position resource over HTTP, validates the JSON contract, and
/// always re-runs the same assertions against built-in fixtures so the
/// validation logic is proven even when the endpoint is unreachable.
///
/// Examples:
///   jobprobe check                 # probe the configured endpoint
///   jobprobe fixtures              # offline fixtures only
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the careers API (also via JOBPROBE_BASE_URL)
    #[arg(long, env = "JOBPROBE_BASE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Resource path of the position under validation (also via JOBPROBE_RESOURCE)
    #[arg(long, env = "JOBPROBE_RESOURCE", value_name = "PATH", global = true)]
    resource: Option<String>,

    /// User agent sent with every probe
    #[arg(long, value_name = "STRING", global = true)]
    user_agent: Option<String>,

    /// Maximum number of attempts per probe
    #[arg(long, value_name = "N", default_value_t = MAX_ATTEMPTS, global = true)]
    max_attempts: usize,

    /// Base backoff delay between attempts in milliseconds
    #[arg(long, value_name = "MS", default_value_t = RETRY_DELAY_MS, global = true)]
    retry_delay_ms: u64,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Probe the live endpoint, then run the offline fixtures
    Check,

    /// Run only the offline fixture cases
    Fixtures,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = SuiteConfig::new(
        cli.base_url,
        cli.resource,
        cli.user_agent,
        cli.max_attempts,
        cli.retry_delay_ms,
    );

    let report = match cli.command {
        Commands::Check => suite::run(&config).await?,
        Commands::Fixtures => suite::run_fixtures_only(),
    };

    report.print();

    if report.has_failures() {
        bail!("{} case(s) failed", report.failed());
    }
    Ok(())
}
