use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_sentiment_core::models::bucket::Granularity;
use news_sentiment_core::models::catalog::TickerCatalog;
use news_sentiment_core::models::chart::ChartView;
use news_sentiment_core::models::settings::{DataSource, Settings};
use news_sentiment_core::services::export_service::ExportFormat;
use news_sentiment_core::services::fetch_service::LoadOutcome;
use news_sentiment_core::SentimentDashboard;

mod render;

#[derive(Parser, Debug)]
#[command(name = "sentiment", version, about = "Daily news sentiment per ticker")]
struct Cli {
    /// Settings file (JSON); flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a ticker and render one view
    Show(ShowArgs),
    /// List catalog tickers whose sentiment is behind
    Stale {
        /// Path to tickers_last_updated.json
        catalog: PathBuf,
        /// Minimum lag in days
        #[arg(long, default_value_t = 2)]
        min_gap_days: i64,
        /// Reference date (defaults to today, UTC)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Exchange code, e.g. NASDAQ
    #[arg(short, long)]
    exchange: String,
    /// Ticker symbol, e.g. AAPL
    #[arg(short, long)]
    ticker: String,
    /// remote | static
    #[arg(long)]
    source: Option<DataSource>,
    /// Sentiment API base URL
    #[arg(long)]
    base_url: Option<String>,
    /// Directory with {ticker}.csv files
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// table | bar | stream | calendar | donut | sparkline
    #[arg(long, default_value = "table")]
    view: ChartView,
    /// day | month | year
    #[arg(long, default_value = "month")]
    granularity: Granularity,
    /// Also write the rows as csv | json
    #[arg(long)]
    export: Option<ExportFormat>,
    /// Export target; defaults to {ticker}_sentiment.{ext}
    #[arg(long, requires = "export")]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Show(args) => show(cli.config, args).await,
        Command::Stale {
            catalog,
            min_gap_days,
            today,
        } => stale(&catalog, min_gap_days, today),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn load_settings(config: Option<PathBuf>, args: &ShowArgs) -> Result<Settings> {
    let mut settings = match config {
        Some(path) => Settings::load_from_file(&path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(source) = args.source {
        settings.source = source;
    }
    if let Some(url) = &args.base_url {
        settings.api_base_url = url.clone();
    }
    if let Some(dir) = &args.data_dir {
        settings.data_dir = dir.clone();
    }
    // One-shot invocation: nothing to coalesce.
    settings.debounce_ms = 0;
    Ok(settings)
}

async fn show(config: Option<PathBuf>, args: ShowArgs) -> Result<()> {
    let settings = load_settings(config, &args)?;
    info!(source = %settings.source, "loading sentiment");
    let dashboard = SentimentDashboard::new(settings)?;

    let outcome = dashboard.select(&args.exchange, &args.ticker).await;
    println!("{}", dashboard.status());
    if outcome == LoadOutcome::InvalidSelection {
        bail!("both --exchange and --ticker are required");
    }

    let data = dashboard.chart(args.view, args.granularity);
    print!("{}", render::render(&data));

    if let Some(format) = args.export {
        let text = dashboard.export(format)?;
        let path = match args.out {
            Some(path) => path,
            None => PathBuf::from(
                dashboard
                    .export_file_name(format)
                    .unwrap_or_else(|| format!("sentiment.{}", format.extension())),
            ),
        };
        std::fs::write(&path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "export written");
    }

    Ok(())
}

fn stale(catalog: &Path, min_gap_days: i64, today: Option<NaiveDate>) -> Result<()> {
    let text = std::fs::read_to_string(catalog)
        .with_context(|| format!("failed to read {}", catalog.display()))?;
    let catalog = TickerCatalog::from_json(&text)?;
    let today = today.unwrap_or_else(|| Utc::now().date_naive());

    let stale = catalog.stale(today, min_gap_days);
    if stale.is_empty() {
        println!("All {} tickers are up to date.", catalog.entries().len());
        return Ok(());
    }
    for entry in stale {
        if let Some(last) = entry.last_updated {
            let lag = (today - last).num_days();
            println!("{:<10} last updated {last} ({lag} days)", entry.ticker);
        }
    }
    Ok(())
}
