use clap::Command;

use crate::common::with_common_args;

pub const COUNTS_CMD: &str = "counts";

pub fn create_counts_cli() -> Command {
    let cmd = Command::new(COUNTS_CMD).about(
        "Per-chunk statistics on raw counts: difference, log2 fold change, chi-square and binomial p-values.",
    );

    with_common_args(cmd, "sample", "signed")
}
