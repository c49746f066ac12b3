use anyhow::Result;
use clap::ArgMatches;

use strandcheck_stats::{TableStyle, format_stats_table};

use crate::common::{CommonOptions, load_inputs, write_output};

pub fn run_summary(matches: &ArgMatches) -> Result<()> {
    let opts = CommonOptions::from_matches(matches)?;
    let inputs = load_inputs(&opts.inputs, opts.layout)?;

    let stats = opts
        .config
        .analyzer(opts.variant)
        .analyze_all(&inputs.observations);

    let table = format_stats_table(&stats, TableStyle::Summary, &opts.sep);
    write_output(opts.output.as_deref(), &table)?;

    inputs.finish()
}
