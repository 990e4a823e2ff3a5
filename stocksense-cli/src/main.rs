//! StockSense CLI: analyze one symbol or scan a universe.
//!
//! Commands:
//! - `analyze`: technical signal + news sentiment + final decision for one symbol
//! - `scan`: analyze a universe in parallel and rank the BUY / SELL calls
//! - `config`: print the default configuration as TOML

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stocksense_core::data::Period;
use stocksense_runner::{
    scan, Analysis, Analyzer, GoogleNewsRss, HeadlineSource, LexiconScorer, LoadOptions,
    NewsAnalyzer, ProviderChain, ScanReport, StockSenseConfig, YahooNews,
};

#[derive(Parser)]
#[command(
    name = "stocksense",
    about = "StockSense: BUY/HOLD/SELL signals from technicals and news sentiment"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single symbol (e.g. TCS.NS).
    Analyze {
        symbol: String,

        #[command(flatten)]
        common: CommonArgs,

        /// Print the full analysis as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Analyze every symbol in a universe and rank the calls.
    Scan {
        /// Symbols to scan. Defaults to the configured universe (NIFTY 50).
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,

        /// Entries shown in each ranking. Defaults to the configured top_n.
        #[arg(long)]
        top: Option<usize>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Print the default configuration as TOML.
    Config,
}

#[derive(Args)]
struct CommonArgs {
    /// History to fetch: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y.
    #[arg(long)]
    period: Option<Period>,

    /// Last date of the price window (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of <SYMBOL>.csv price files, tried before Yahoo Finance.
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Offline mode: no network access for prices or news.
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// Use synthetic prices when real data is unavailable.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Skip news sentiment (treated as NEUTRAL).
    #[arg(long, default_value_t = false)]
    no_news: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbol,
            common,
            json,
        } => run_analyze(&symbol, &common, json),
        Commands::Scan {
            symbols,
            top,
            common,
        } => run_scan(symbols, top, &common),
        Commands::Config => {
            print!("{}", StockSenseConfig::default().to_toml()?);
            Ok(())
        }
    }
}

fn load_config(common: &CommonArgs) -> Result<StockSenseConfig> {
    let mut config = match &common.config {
        Some(path) => StockSenseConfig::from_file(path)?,
        None => StockSenseConfig::default(),
    };
    if let Some(period) = common.period {
        config.data.period = period;
    }
    if common.no_news || common.offline {
        config.news.enabled = false;
    }
    Ok(config)
}

fn build_analyzer(common: &CommonArgs, config: &StockSenseConfig) -> Result<Analyzer> {
    let prices = ProviderChain::from_options(&LoadOptions {
        csv_dir: common.csv_dir.clone(),
        offline: common.offline,
        synthetic: common.synthetic,
    })?;

    let mut sources: Vec<Box<dyn HeadlineSource>> = Vec::new();
    if config.news.enabled {
        sources.push(Box::new(YahooNews::new()?));
        sources.push(Box::new(GoogleNewsRss::new()?));
    }
    let news = NewsAnalyzer::new(sources, Box::new(LexiconScorer::new()), config.news.clone());

    let analyzer = Analyzer::new(Box::new(prices), news, config);
    Ok(match &common.end {
        Some(end) => analyzer.with_end_date(
            NaiveDate::parse_from_str(end, "%Y-%m-%d")
                .with_context(|| format!("invalid --end date '{end}'"))?,
        ),
        None => analyzer,
    })
}

fn run_analyze(symbol: &str, common: &CommonArgs, json: bool) -> Result<()> {
    let config = load_config(common)?;
    let analyzer = build_analyzer(common, &config)?;
    let analysis = analyzer
        .analyze(symbol)
        .with_context(|| format!("analysis failed for {symbol}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        write_analysis(&mut io::stdout().lock(), &analysis)?;
    }
    Ok(())
}

fn run_scan(symbols: Vec<String>, top: Option<usize>, common: &CommonArgs) -> Result<()> {
    let config = load_config(common)?;
    let analyzer = build_analyzer(common, &config)?;
    let universe = if symbols.is_empty() {
        config.scan.universe.clone()
    } else {
        symbols
    };
    let report = scan(&analyzer, &universe, top.unwrap_or(config.scan.top_n));
    write_scan(&mut io::stdout().lock(), &report)?;
    Ok(())
}

fn write_analysis(out: &mut impl Write, a: &Analysis) -> io::Result<()> {
    let d = &a.decision;
    writeln!(out, "\n=== StockSense: {} ===", a.symbol)?;
    writeln!(out, "Bars analysed:    {} ({:?})", a.bars, a.source)?;
    writeln!(
        out,
        "Technical Signal: {} (confidence {:.2})",
        d.technical_label, d.technical_confidence
    )?;
    writeln!(
        out,
        "News Signal:      {} (avg score {:.3}, {:?})",
        d.news_label, a.news.avg_score, a.news.status
    )?;
    writeln!(out, "FINAL DECISION:   {}", d.final_action)?;

    if !a.folds.is_empty() {
        writeln!(out, "\nWalk-forward folds:")?;
        for f in &a.folds {
            writeln!(
                out,
                "  fold {}  train {:>5}  validate {:>4}  accuracy {:.2}",
                f.fold_index + 1,
                f.train_rows,
                f.validation_rows,
                f.validation_accuracy
            )?;
        }
    }

    writeln!(out, "\nReasons:")?;
    for r in a.reasons() {
        writeln!(out, "  - {r}")?;
    }

    writeln!(out, "\nTop News Headlines:")?;
    if a.news.headlines.is_empty() {
        writeln!(out, "  No headlines available.")?;
    }
    for (i, h) in a.news.headlines.iter().enumerate() {
        writeln!(out, "  {}. {h}", i + 1)?;
    }
    Ok(())
}

/// Failures are already logged by the scan itself; only a count is printed.
fn write_scan(out: &mut impl Write, report: &ScanReport) -> io::Result<()> {
    writeln!(out, "\n=== Scan results ===")?;
    for e in &report.entries {
        writeln!(out, "{:15}  {:5}  confidence {:.2}", e.symbol, e.action, e.confidence)?;
    }
    if !report.failures.is_empty() {
        writeln!(out, "{} symbol(s) skipped", report.failures.len())?;
    }

    writeln!(out, "\n=== Top BUY ===")?;
    if report.top_buys.is_empty() {
        writeln!(out, "No strong BUY signals today.")?;
    }
    for (i, e) in report.top_buys.iter().enumerate() {
        writeln!(out, "{}. {:15}  BUY   confidence {:.2}", i + 1, e.symbol, e.confidence)?;
    }

    writeln!(out, "\n=== Top SELL ===")?;
    if report.top_sells.is_empty() {
        writeln!(out, "No strong SELL signals today.")?;
    }
    for (i, e) in report.top_sells.iter().enumerate() {
        writeln!(out, "{}. {:15}  SELL  confidence {:.2}", i + 1, e.symbol, e.confidence)?;
    }
    Ok(())
}
