use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use finreport::{SpecFinancialReportOptions, generate_financial_report};

/// Build the audit workbook (ledger plus assessment sheets) from a JSON document.
#[derive(Debug, Parser)]
#[command(name = "finreport-financial", version)]
struct Args {
    /// Input JSON document.
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,
    /// Output workbook.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    /// Keep builder column widths instead of normalizing them.
    #[arg(long)]
    no_autofit: bool,
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

    let mut options = SpecFinancialReportOptions::default();
    if let Some(path_file_in) = args.input {
        options.path_file_in = path_file_in;
    }
    if let Some(path_file_out) = args.output {
        options.path_file_out = path_file_out;
    }
    if args.no_autofit {
        options.policy_autofit = None;
    }

    let report = generate_financial_report(&options).with_context(|| {
        format!(
            "failed to generate financial report from {}",
            options.path_file_in.display()
        )
    })?;

    println!(
        "Excel file generated successfully at: {}",
        report.path_file_out.display()
    );
    Ok(())
}
