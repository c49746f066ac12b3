use clap::{Command, arg};

use crate::common::with_common_args;

pub const CHECK_CMD: &str = "check";

pub fn create_check_cli() -> Command {
    let cmd = Command::new(CHECK_CMD)
        .about("Compute every strand-bias statistic and call strandedness for each sample.")
        .arg(
            arg!(--format <FORMAT>)
                .required(false)
                .default_value("tsv")
                .value_parser(["tsv", "json", "report"])
                .help("Output as a table, a JSON array or a readable report"),
        );

    with_common_args(cmd, "sample", "unsigned-ratio")
}
