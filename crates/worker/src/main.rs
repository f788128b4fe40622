use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finsight_core::analysis::stock::StockAnalysisTask;
use finsight_core::analysis::watchlist::{self, PredictionState, WatchlistEntry};
use finsight_core::analysis::{AnalysisTask, Analyst};
use finsight_core::llm::gemini::GeminiClient;

#[derive(Debug, Parser)]
#[command(name = "finsight_worker")]
struct Args {
    /// Watchlist entry as SYMBOL or SYMBOL:SHARES. Repeatable; defaults to
    /// a small demo watchlist when omitted.
    #[arg(long = "stock")]
    stocks: Vec<String>,

    /// Render the prompts and exit without calling the model provider.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = finsight_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let entries = resolve_watchlist(&args.stocks)?;

    if args.dry_run {
        for entry in &entries {
            let task = StockAnalysisTask::new(entry.symbol.clone(), entry.shares_owned);
            let prompt = task.render_prompt();
            tracing::info!(
                symbol = %entry.symbol,
                prompt_len = prompt.len(),
                dry_run = true,
                "rendered stock analysis prompt"
            );
        }
        return Ok(());
    }

    let generator = GeminiClient::from_settings(&settings)?;
    let analyst = Analyst::new(generator);

    let predictions = watchlist::load_predictions(&analyst, &entries).await;

    let mut pending = 0usize;
    for prediction in &predictions {
        match prediction.state {
            PredictionState::Ready(recommendation) => {
                tracing::info!(symbol = %prediction.symbol, ?recommendation, "prediction ready");
            }
            PredictionState::Pending => {
                pending += 1;
                tracing::warn!(symbol = %prediction.symbol, "prediction pending; retry manually");
            }
        }
    }

    if !predictions.is_empty() && pending == predictions.len() {
        let err = anyhow::anyhow!("all {pending} watchlist predictions failed");
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "watchlist load produced no usable predictions");
    }

    tracing::info!(
        total = predictions.len(),
        pending,
        "watchlist load complete"
    );

    // Partial failures are per-item placeholders, not a process failure.
    Ok(())
}

fn resolve_watchlist(stocks: &[String]) -> anyhow::Result<Vec<WatchlistEntry>> {
    if stocks.is_empty() {
        return Ok(default_watchlist());
    }
    stocks.iter().map(|s| parse_entry(s)).collect()
}

fn default_watchlist() -> Vec<WatchlistEntry> {
    vec![
        WatchlistEntry::new("AAPL", 10.0),
        WatchlistEntry::new("GOOGL", 5.0),
        WatchlistEntry::new("MSFT", 8.0),
    ]
}

fn parse_entry(spec: &str) -> anyhow::Result<WatchlistEntry> {
    let spec = spec.trim();
    anyhow::ensure!(!spec.is_empty(), "watchlist entry must be non-empty");

    match spec.split_once(':') {
        Some((symbol, shares)) => {
            let symbol = symbol.trim();
            anyhow::ensure!(!symbol.is_empty(), "watchlist symbol must be non-empty");
            let shares: f64 = shares
                .trim()
                .parse()
                .with_context(|| format!("invalid share count in `{spec}`"))?;
            anyhow::ensure!(shares >= 0.0, "share count must be non-negative in `{spec}`");
            Ok(WatchlistEntry::new(symbol, shares))
        }
        None => Ok(WatchlistEntry::new(spec, 1.0)),
    }
}

fn init_sentry(settings: &finsight_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
