//! sheet2ledger CLI
//!
//! `convert` turns the purchases/payments exports into a ledger file;
//! `report` runs the external ledger binary for a monthly budget table and
//! per-person balances.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: set to `debug` or `warn` to control logging verbosity

use clap::{Args, Parser, Subcommand};
use log::warn;
use sheet2ledger::{Pipeline, ReportSettings, Result, RowOptions};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "sheet2ledger", version, about = "Shared-expense sheets to ledger postings")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Convert the CSV exports into a ledger file
    Convert(ConvertArgs),

    /// Print the monthly budget table and per-person balances
    Report(ReportArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Purchases export
    #[arg(short = 'p', long, default_value = "purchases.csv")]
    purchases: PathBuf,

    /// Payments export
    #[arg(short = 'P', long, default_value = "payments.csv")]
    payments: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Ledger header file prepended verbatim; skipped with a warning if unreadable
    #[arg(short = 'H', long, default_value = "header.ledger")]
    header: PathBuf,

    /// Accept rows dated after today
    #[arg(long)]
    allow_future: bool,

    /// Accept purchases with no purchasees and payments with a missing party
    #[arg(long)]
    allow_empty: bool,
}

#[derive(Args)]
struct ReportArgs {
    /// People to report balances for
    #[arg(required = true)]
    people: Vec<String>,

    /// Ledger binary to invoke
    #[arg(long, default_value = "ledger")]
    ledger: String,

    /// Ledger data file
    #[arg(short, long, default_value = "sheet.ledger")]
    file: String,

    /// Reporting period, YYYY/MM; defaults to the current month
    #[arg(short, long)]
    month: Option<String>,

    /// Width of the rule above each person's section
    #[arg(short, long)]
    width: Option<usize>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        CliCommand::Convert(args) => convert(args),
        CliCommand::Report(args) => report(args),
    }
}

fn convert(args: ConvertArgs) -> Result<()> {
    let options = RowOptions {
        allow_future: args.allow_future,
        allow_empty: args.allow_empty,
    };

    let mut pipeline = Pipeline::new(options);
    pipeline.read_purchases(BufReader::new(File::open(&args.purchases)?))?;
    pipeline.read_payments(BufReader::new(File::open(&args.payments)?))?;

    let header = match fs::read_to_string(&args.header) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(
                "could not open header file {}, skipping: {}",
                args.header.display(),
                e
            );
            None
        }
    };

    match args.output {
        Some(path) => pipeline.write_ledger(header.as_deref(), File::create(path)?),
        None => pipeline.write_ledger(header.as_deref(), io::stdout().lock()),
    }
}

fn report(args: ReportArgs) -> Result<()> {
    let month = args
        .month
        .unwrap_or_else(|| chrono::Local::now().format("%Y/%m").to_string());

    let settings = ReportSettings {
        ledger: args.ledger,
        file: args.file,
        month,
        people: args.people,
        width: args.width,
    };

    let report = settings.run()?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    Ok(())
}
