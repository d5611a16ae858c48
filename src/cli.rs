//! CLI definition and dispatch.

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use crate::adapters::console_report_adapter::ConsoleReportAdapter;
use crate::adapters::fear_greed_adapter::{FearGreedAdapter, DEFAULT_API_URL};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_store_adapter::FileStoreAdapter;
use crate::adapters::upbit_adapter::{page_cursor, UpbitAdapter, DEFAULT_BASE_URL, MAX_PAGE_SIZE};
use crate::domain::analysis::{
    analyze, AnalysisResult, DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW,
};
use crate::domain::candle::Candle;
use crate::domain::error::FearcrossError;
use crate::domain::sentiment::SentimentReading;
use crate::domain::signal::SignalStrength;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;
use crate::ports::sentiment_port::SentimentPort;
use crate::ports::store_port::StorePort;

#[derive(Parser, Debug)]
#[command(name = "fearcross", about = "Crossover + fear/greed trading signal analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Fetch candles live from the Upbit API
    Api,
    /// Load candles from the partition store
    Store,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one signal analysis and print the report
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        market: Option<String>,
        #[arg(short, long, value_enum, default_value = "api")]
        source: Source,
    },
    /// Seed the partition store with historical candles
    Collect {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        daily_count: Option<usize>,
        #[arg(long)]
        minute_days: Option<usize>,
    },
    /// Store the latest 5-minute candle and today's sentiment reading
    Snapshot {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Store-backed analysis with a strong-signal callout (cron-friendly)
    Alarm {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Start the web dashboard
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            market,
            source,
        } => run_analyze(&config, market.as_deref(), source),
        Command::Collect {
            config,
            daily_count,
            minute_days,
        } => run_collect(&config, daily_count, minute_days),
        Command::Snapshot { config } => run_snapshot(&config),
        Command::Alarm { config } => run_alarm(&config),
        Command::Serve { config } => run_serve(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FearcrossError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Analysis parameters resolved from config with CLI overrides applied.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub market: String,
    pub short_window: usize,
    pub long_window: usize,
    /// Daily candles requested for a live analysis or collection run.
    pub daily_count: usize,
    /// Store partitions walked back from today for a store-backed run.
    pub store_days: usize,
}

pub fn build_settings(config: &dyn ConfigPort, market_override: Option<&str>) -> AnalysisSettings {
    let market = market_override
        .map(str::to_string)
        .or_else(|| config.get_string("market", "name"))
        .unwrap_or_else(|| "KRW-BTC".to_string());

    AnalysisSettings {
        market,
        short_window: config.get_int("analysis", "short_window", DEFAULT_SHORT_WINDOW as i64)
            as usize,
        long_window: config.get_int("analysis", "long_window", DEFAULT_LONG_WINDOW as i64)
            as usize,
        daily_count: config.get_int("market", "daily_count", 200) as usize,
        store_days: config.get_int("store", "days", 200) as usize,
    }
}

fn market_adapter(config: &dyn ConfigPort) -> UpbitAdapter {
    let base_url = config
        .get_string("market", "base_url")
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    UpbitAdapter::new(base_url)
}

fn sentiment_adapter(config: &dyn ConfigPort) -> FearGreedAdapter {
    let api_url = config
        .get_string("sentiment", "api_url")
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    FearGreedAdapter::new(api_url)
}

fn store_adapter(config: &dyn ConfigPort) -> FileStoreAdapter {
    let base_path = config
        .get_string("store", "base_path")
        .unwrap_or_else(|| "data".to_string());
    FileStoreAdapter::new(base_path)
}

/// Fetches the latest sentiment record, degrading to the unknown reading on
/// any collaborator failure. Never fatal.
pub fn sentiment_or_unknown(port: &dyn SentimentPort) -> SentimentReading {
    match port.fetch_latest() {
        Ok(raw) => SentimentReading::normalize(raw),
        Err(e) => {
            eprintln!("warning: sentiment fetch failed ({e}); continuing without it");
            SentimentReading::unknown()
        }
    }
}

/// Live-API analysis: one daily-candle fetch joined with the live sentiment
/// reading. A failed candle fetch becomes an empty input, which the pipeline
/// reports as "cannot analyze".
pub fn run_api_analysis(
    market_port: &dyn MarketDataPort,
    sentiment_port: &dyn SentimentPort,
    settings: &AnalysisSettings,
) -> Result<AnalysisResult, FearcrossError> {
    eprintln!(
        "Fetching {} daily candles for {}",
        settings.daily_count, settings.market
    );
    let batch = match market_port.fetch_daily(&settings.market, settings.daily_count) {
        Ok(candles) => candles,
        Err(e) => {
            eprintln!("warning: daily candle fetch failed ({e})");
            Vec::new()
        }
    };

    let sentiment = sentiment_or_unknown(sentiment_port);

    analyze(
        vec![batch],
        sentiment,
        &settings.market,
        "api",
        settings.short_window,
        settings.long_window,
    )
}

/// Walks the last `days` daily partitions newest-first. Missing partitions
/// are skipped silently; unreadable ones are logged and skipped.
pub fn collect_store_batches(store: &dyn StorePort, days: usize) -> Vec<Vec<Candle>> {
    let today = Local::now().date_naive();
    let mut batches = Vec::new();

    for i in 0..days {
        let date = today - chrono::Duration::days(i as i64);
        match store.read_daily(date) {
            Ok(Some(candle)) => batches.push(vec![candle]),
            Ok(None) => {}
            Err(e) => eprintln!("warning: failed to read partition for {date}: {e}"),
        }
    }

    batches
}

/// Today's stored sentiment, falling back to the live API when the partition
/// is absent or unreadable.
pub fn store_sentiment(
    store: &dyn StorePort,
    live: &dyn SentimentPort,
) -> SentimentReading {
    let today = Local::now().date_naive();
    match store.read_sentiment(today) {
        Ok(Some(raw)) => SentimentReading::normalize(Some(raw)),
        Ok(None) => {
            eprintln!("No sentiment partition for today; falling back to the live API");
            sentiment_or_unknown(live)
        }
        Err(e) => {
            eprintln!("warning: sentiment partition read failed ({e}); falling back to the live API");
            sentiment_or_unknown(live)
        }
    }
}

/// Fetches `count` daily candles and writes one store partition per candle.
/// Individual write failures are logged and skipped; returns the number of
/// partitions written.
pub fn collect_daily(
    market_port: &dyn MarketDataPort,
    store: &dyn StorePort,
    market: &str,
    count: usize,
) -> Result<usize, FearcrossError> {
    eprintln!("Collecting {} daily candles for {}", count, market);
    let candles = market_port.fetch_daily(market, count)?;

    let mut written = 0usize;
    for candle in &candles {
        match store.write_daily(candle) {
            Ok(()) => written += 1,
            Err(e) => eprintln!("warning: failed to store {}: {e}", candle.timestamp.date()),
        }
    }
    eprintln!("  {written}/{} daily partitions written", candles.len());
    Ok(written)
}

/// Pages 5-minute candles backwards from now via the `to` cursor, writing
/// each into its minute partition. Stops early on an empty page or a fetch
/// failure; returns the number of partitions written.
pub fn collect_minutes(
    market_port: &dyn MarketDataPort,
    store: &dyn StorePort,
    market: &str,
    minute_days: usize,
    delay: Duration,
) -> usize {
    let total_pages = (minute_days * 24 * 12) / MAX_PAGE_SIZE + 1;
    eprintln!(
        "Collecting {} days of 5-minute candles ({} pages)",
        minute_days, total_pages
    );

    let mut cursor: Option<String> = None;
    let mut written = 0usize;
    for page_no in 0..total_pages {
        let page = match market_port.fetch_minutes(market, 5, MAX_PAGE_SIZE, cursor.as_deref()) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("warning: minute fetch failed on page {}: {e}", page_no + 1);
                break;
            }
        };
        if page.is_empty() {
            break;
        }

        cursor = page_cursor(&page);
        for candle in &page {
            match store.write_minute(candle) {
                Ok(()) => written += 1,
                Err(e) => eprintln!("warning: failed to store {}: {e}", candle.timestamp),
            }
        }
        eprintln!("  page {}/{} ({} candles stored)", page_no + 1, total_pages, written);

        thread::sleep(delay);
    }
    eprintln!("Collection complete: {written} 5-minute partitions written");

    written
}

/// Stores the latest 5-minute candle and today's sentiment reading. Fetch
/// failures are logged and skipped; a store write failure is fatal.
pub fn take_snapshot(
    market_port: &dyn MarketDataPort,
    sentiment_port: &dyn SentimentPort,
    store: &dyn StorePort,
    market: &str,
) -> Result<(), FearcrossError> {
    match market_port.fetch_minutes(market, 5, 1, None) {
        Ok(page) => match page.first() {
            Some(candle) => {
                store.write_minute(candle)?;
                eprintln!("Stored 5-minute candle for {}", candle.timestamp);
            }
            None => eprintln!("warning: no 5-minute candle returned"),
        },
        Err(e) => eprintln!("warning: 5-minute candle fetch failed ({e})"),
    }

    match sentiment_port.fetch_latest() {
        Ok(Some(raw)) => {
            let today = Local::now().date_naive();
            store.write_sentiment(&raw, today)?;
            eprintln!("Stored sentiment reading for {today}");
        }
        Ok(None) => eprintln!("warning: sentiment source returned no record"),
        Err(e) => eprintln!("warning: sentiment fetch failed ({e})"),
    }

    Ok(())
}

/// Store-backed analysis over the configured partition window.
pub fn run_store_analysis(
    store: &dyn StorePort,
    sentiment_port: &dyn SentimentPort,
    settings: &AnalysisSettings,
) -> Result<AnalysisResult, FearcrossError> {
    eprintln!(
        "Loading up to {} daily partitions for {}",
        settings.store_days, settings.market
    );
    let batches = collect_store_batches(store, settings.store_days);
    eprintln!("  {} partitions loaded", batches.len());

    let sentiment = store_sentiment(store, sentiment_port);

    analyze(
        batches,
        sentiment,
        &settings.market,
        "store",
        settings.short_window,
        settings.long_window,
    )
}

fn run_analyze(config_path: &PathBuf, market: Option<&str>, source: Source) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let settings = build_settings(&config, market);
    let sentiment_port = sentiment_adapter(&config);

    let result = match source {
        Source::Api => {
            let market_port = market_adapter(&config);
            run_api_analysis(&market_port, &sentiment_port, &settings)
        }
        Source::Store => {
            let store = store_adapter(&config);
            run_store_analysis(&store, &sentiment_port, &settings)
        }
    };

    let result = match result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: data collection failed: {e}");
            return (&e).into();
        }
    };

    match ConsoleReportAdapter.write(&result) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_collect(
    config_path: &PathBuf,
    daily_count: Option<usize>,
    minute_days: Option<usize>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let market_port = market_adapter(&config);
    let store = store_adapter(&config);
    let market = build_settings(&config, None).market;

    let daily_count = daily_count
        .unwrap_or_else(|| config.get_int("market", "collect_daily_count", 365) as usize);
    let minute_days = minute_days
        .unwrap_or_else(|| config.get_int("market", "collect_minute_days", 30) as usize);
    let delay = Duration::from_millis(config.get_int("market", "request_delay_ms", 100) as u64);

    if let Err(e) = collect_daily(&market_port, &store, &market, daily_count) {
        eprintln!("error: daily candle fetch failed: {e}");
        return (&e).into();
    }
    collect_minutes(&market_port, &store, &market, minute_days, delay);

    ExitCode::SUCCESS
}

fn run_snapshot(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let market_port = market_adapter(&config);
    let sentiment_port = sentiment_adapter(&config);
    let store = store_adapter(&config);
    let market = build_settings(&config, None).market;

    match take_snapshot(&market_port, &sentiment_port, &store, &market) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_alarm(config_path: &PathBuf) -> ExitCode {
    eprintln!(
        "Signal alarm run started at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let settings = build_settings(&config, None);
    let sentiment_port = sentiment_adapter(&config);
    let store = store_adapter(&config);

    let result = match run_store_analysis(&store, &sentiment_port, &settings) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: data collection failed: {e}");
            return (&e).into();
        }
    };

    if let Err(e) = ConsoleReportAdapter.write(&result) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    if result.signal.strength == SignalStrength::Strong {
        println!("\n!!! Strong signal detected: {}", result.signal.label);
        if let Some(rationale) = &result.signal.rationale {
            println!("    {rationale}");
        }
    }

    eprintln!(
        "Signal alarm run finished at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    ExitCode::SUCCESS
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState};
        use std::net::SocketAddr;
        use std::sync::Arc;

        eprintln!("Loading config from {}", config_path.display());
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };
        let settings = build_settings(&config, None);

        let addr: SocketAddr = config
            .get_string("web", "listen")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .unwrap_or_else(|_| "127.0.0.1:3000".parse().unwrap());

        eprintln!("Starting web dashboard on {}", addr);

        let state = AppState {
            market_port: Arc::new(market_adapter(&config)),
            sentiment_port: Arc::new(sentiment_adapter(&config)),
            store: Arc::new(store_adapter(&config)),
            settings,
        };
        let router = build_router(state);

        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async {
                let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
                axum::serve(listener, router).await.unwrap();
            });

        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
