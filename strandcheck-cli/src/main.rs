mod check;
mod common;
mod counts;
mod logging;
mod step;
mod summary;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "strandcheck";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Infer the strandedness protocol of sequencing libraries from forward/reverse read counts.")
        .subcommand_required(true)
        .subcommand(check::cli::create_check_cli())
        .subcommand(summary::cli::create_summary_cli())
        .subcommand(step::cli::create_step_cli())
        .subcommand(counts::cli::create_counts_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    if let Some((_, sub_matches)) = matches.subcommand() {
        logging::init_logger(sub_matches.get_flag("verbose"));
    }

    match matches.subcommand() {
        //
        // FULL STATISTICS
        //
        Some((check::cli::CHECK_CMD, matches)) => {
            check::handlers::run_check(matches)?;
        }

        //
        // SUMMARY TABLE
        //
        Some((summary::cli::SUMMARY_CMD, matches)) => {
            summary::handlers::run_summary(matches)?;
        }

        //
        // INCREMENTAL (PER CHUNK)
        //
        Some((step::cli::STEP_CMD, matches)) => {
            step::handlers::run_step(matches)?;
        }

        //
        // RAW COUNT STATISTICS
        //
        Some((counts::cli::COUNTS_CMD, matches)) => {
            counts::handlers::run_counts(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
