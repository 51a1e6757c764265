//! sig-reduce - reduce a page of candidate interpretations
//!
//! Reads a page of systems (glyph descriptors and known relations) as JSON,
//! reduces every system in parallel and prints the surviving interpretations.

use anyhow::Context;
use clap::Parser;
use sig_reducer::{PageReducer, ReductionOutput};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod output;
mod page;

use output::SystemResult;
use page::PageInput;

/// sig-reduce application
#[derive(Parser)]
#[command(name = "sig-reduce")]
#[command(about = "Reduce candidate symbol interpretations to a consistent set", long_about = None)]
#[command(version)]
struct Cli {
    /// Page file (JSON)
    page: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long, env = "SIG_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = config::load(cli.config.as_deref()).context("loading configuration")?;
    let page = PageInput::load(&cli.page)
        .with_context(|| format!("loading page {}", cli.page.display()))?;
    let mut systems = page.build(&config)?;

    let reports = PageReducer::default().reduce_all(&mut systems);

    let results: Vec<SystemResult> = systems
        .iter()
        .zip(reports)
        .map(|(sig, report)| {
            let reduced =
                report.and_then(|report| Ok((report, ReductionOutput::from_graph(sig)?)));
            match reduced {
                Ok((report, output)) => SystemResult {
                    system: sig.system(),
                    report: Some(report),
                    output: Some(output),
                    error: None,
                },
                Err(e) => SystemResult {
                    system: sig.system(),
                    report: None,
                    output: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();

    if cli.json {
        output::print_json(&results)?;
    } else {
        output::print_text(&results);
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} systems failed to reduce", failed, results.len());
    }
    Ok(())
}
