//! schema-report binary entry point

use clap::Parser;
use schema_report_cli::logging::{self, LoggingConfig};
use schema_report_cli::{Cli, ReportOptions};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(LoggingConfig::from_verbosity(cli.verbose))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting schema-report");

    let options = ReportOptions::from(&cli);
    let mut stdout = std::io::stdout().lock();
    schema_report_cli::run(&options, &mut stdout)
}
