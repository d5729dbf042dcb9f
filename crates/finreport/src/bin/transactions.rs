use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use finreport::{SpecTransactionReportOptions, generate_transaction_report};

/// Build the fixed transaction listing workbook.
#[derive(Debug, Parser)]
#[command(name = "finreport-transactions", version)]
struct Args {
    /// Output workbook; its parent directory is created when missing.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    /// Log at debug level.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut options = SpecTransactionReportOptions::default();
    if let Some(path_file_out) = args.output {
        options.path_file_out = path_file_out;
    }

    let report = generate_transaction_report(&options).with_context(|| {
        format!(
            "failed to generate transaction report at {}",
            options.path_file_out.display()
        )
    })?;

    println!(
        "Transaction report generated successfully at: {}",
        report.path_file_out.display()
    );
    Ok(())
}
