use clap::Command;

use crate::common::with_common_args;

pub const STEP_CMD: &str = "step";

pub fn create_step_cli() -> Command {
    let cmd = Command::new(STEP_CMD).about(
        "Track strand-bias statistics as reads accumulate, one row per read-count chunk (1M, 2M, ...).",
    );

    with_common_args(cmd, "sample", "signed")
}
