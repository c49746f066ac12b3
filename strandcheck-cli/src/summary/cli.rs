use clap::Command;

use crate::common::with_common_args;

pub const SUMMARY_CMD: &str = "summary";

pub fn create_summary_cli() -> Command {
    let cmd = Command::new(SUMMARY_CMD)
        .about("Short strandedness table (counts, proportions, chi-square) from summary count files.");

    with_common_args(cmd, "summary", "signed")
}
