mod vcfanno;

use anyhow::Result;
use clap::Command;
use tracing_subscriber::EnvFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "gtars";
    pub const DEFAULT_LOG_FILTER: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Performance critical tools for genomic data, including variant annotation.")
        .subcommand_required(true)
        .subcommand(vcfanno::cli::create_vcfanno_cli())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(consts::DEFAULT_LOG_FILTER));

    // library crates log through `log`; the fmt subscriber picks those records up
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // VCFANNO
        //
        Some((vcfanno::cli::VCFANNO_CMD, matches)) => {
            vcfanno::handlers::run_vcfanno(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
