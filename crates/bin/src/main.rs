//! quarters CLI binary.
//!
//! Prints a company's quarterly income statement rebuilt from SEC XBRL
//! company facts.

mod cli;
mod render;

use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, Format, GlobalArgs};
use quarters::{EdgarConfig, NoopCache, PeriodQuery, QuarterlyPipeline, Scale, Symbol};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let pipeline = build_pipeline(&cli.global)?;

    match cli.command {
        Some(Commands::Snapshot { ticker }) => snapshot(&pipeline, &ticker).await,
        Some(Commands::Lookup {
            ticker,
            concept,
            period,
            offset,
            alternatives,
        }) => {
            let query = alternatives.into_iter().fold(
                PeriodQuery::new(concept)
                    .with_period_type(period.into())
                    .with_offset(offset),
                |query, tag| query.with_alternative(tag),
            );
            lookup(&pipeline, &ticker, &query).await
        }
        None => {
            let ticker = cli.ticker.context("a ticker is required")?;
            statement(&pipeline, &ticker, cli.scale.into(), cli.format).await
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_pipeline(args: &GlobalArgs) -> Result<QuarterlyPipeline> {
    let mut config = EdgarConfig::default()
        .with_min_interval(Duration::from_millis(args.rate_limit_ms))
        .with_timeout(Duration::from_secs(args.timeout_secs));
    match &args.email {
        Some(email) => config = config.with_contact_email(email),
        None => warn!("No contact email set; the SEC may reject requests (use --email)"),
    }

    let pipeline = QuarterlyPipeline::edgar(config).context("failed to create SEC client")?;
    Ok(if args.no_cache {
        pipeline.with_cache(Arc::new(NoopCache::new()))
    } else {
        pipeline
    })
}

async fn statement(
    pipeline: &QuarterlyPipeline,
    ticker: &str,
    scale: Scale,
    format: Format,
) -> Result<()> {
    let symbol = Symbol::new(ticker);
    let statement = pipeline
        .run(&symbol)
        .await
        .with_context(|| format!("failed to build quarterly statement for {symbol}"))?;

    let Some(company) = &statement.company else {
        eprintln!("Could not find company info for {symbol}");
        return Ok(());
    };

    match format {
        Format::Json => println!("{}", statement.table.to_json(scale)?),
        Format::Csv => print!("{}", statement.table.to_csv(scale)?),
        Format::Text => {
            println!("\nQuarterly Income Statement for {symbol} ({}):", company.name);
            println!("{}", render::rule('-'));
            if statement.is_empty() {
                println!("No quarterly data found");
                return Ok(());
            }
            print!("{}", statement.table.render_text(scale));

            if let Some(summary) = statement.latest_summary() {
                println!();
                print!("{}", render::summary(&summary, scale));
            }
        }
    }
    Ok(())
}

async fn snapshot(pipeline: &QuarterlyPipeline, ticker: &str) -> Result<()> {
    let symbol = Symbol::new(ticker);
    println!("\nFetching company info for {symbol}...");

    match pipeline.snapshot(&symbol).await? {
        Some((company, snapshot)) if !snapshot.is_empty() => {
            print!("{}", render::snapshot(&company, &snapshot));
        }
        Some(_) => println!("\nNo financial data found"),
        None => println!("\nCould not find company info for {symbol}"),
    }
    Ok(())
}

async fn lookup(pipeline: &QuarterlyPipeline, ticker: &str, query: &PeriodQuery) -> Result<()> {
    let symbol = Symbol::new(ticker);
    let Some((company, found)) = pipeline.lookup(&symbol, query).await? else {
        eprintln!("Could not find company info for {symbol}");
        return Ok(());
    };

    match found {
        Some(value) => print!("{}", render::lookup(&company, &query.concept, &value)),
        None => println!(
            "No {} value for {} at offset {}",
            query.period_type.form(),
            query.concept,
            query.offset
        ),
    }
    Ok(())
}
