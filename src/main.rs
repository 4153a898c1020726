use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use relwatch::notify::select_notifier;
use relwatch::{ClaudeClassifier, Config, FileLedger, GitHubClient, ReleaseMonitor, Scheduler};

#[derive(Parser, Debug)]
#[command(name = "relwatch")]
#[command(version = "0.1.0")]
#[command(about = "Monitor a GitHub project's releases and alert on breaking changes")]
struct Args {
    /// Run a single check cycle and exit
    #[arg(long)]
    once: bool,

    /// Repository to watch (owner/name), overrides WATCH_REPO
    #[arg(short, long)]
    repo: Option<String>,

    /// Polling interval in seconds, overrides CHECK_INTERVAL
    #[arg(short, long)]
    interval: Option<u64>,

    /// Number of recent releases to fetch per cycle
    #[arg(long)]
    limit: Option<u32>,

    /// Path to the seen-releases ledger file
    #[arg(long)]
    ledger: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("relwatch=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(repo) = args.repo {
        config.repo = repo;
    }
    if let Some(interval) = args.interval {
        anyhow::ensure!(interval > 0, "--interval must be a positive number of seconds");
        config.check_interval_secs = interval;
    }
    if let Some(limit) = args.limit {
        config.fetch_limit = limit;
    }
    if let Some(ledger) = args.ledger {
        config.ledger_path = ledger;
    }

    let github = GitHubClient::new(&config.github_token, &config.repo)?;
    let classifier = ClaudeClassifier::new(
        config.anthropic_api_key.clone(),
        config.claude_model.clone(),
    );
    let notifier = select_notifier(config.slack_webhook_url.as_deref());
    tracing::info!("Notification mode: {}", notifier.name());

    let ledger = FileLedger::load(&config.ledger_path);
    tracing::info!(
        "Watching {} ({} releases already seen)",
        config.repo,
        ledger.len()
    );

    let mut monitor = ReleaseMonitor::new(
        github,
        classifier,
        notifier,
        Box::new(ledger),
        config.fetch_limit,
    );

    if args.once {
        monitor.run_once().await;
        return Ok(());
    }

    let scheduler = Scheduler::new(Duration::from_secs(config.check_interval_secs));
    scheduler
        .run(&mut monitor, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    Ok(())
}
