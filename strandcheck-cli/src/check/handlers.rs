use anyhow::Result;
use clap::ArgMatches;
use log::info;

use strandcheck_stats::{OutputFormat, TableStyle};
use strandcheck_stats::report::render;

use crate::common::{CommonOptions, load_inputs, write_output};

pub fn run_check(matches: &ArgMatches) -> Result<()> {
    let opts = CommonOptions::from_matches(matches)?;
    let format = match matches.get_one::<String>("format") {
        Some(format) => format.parse::<OutputFormat>().map_err(anyhow::Error::msg)?,
        None => OutputFormat::default(),
    };

    let inputs = load_inputs(&opts.inputs, opts.layout)?;

    let analyzer = opts.config.analyzer(opts.variant);
    let stats = analyzer.analyze_all(&inputs.observations);
    info!("Analyzed {} samples with the {} rule", stats.len(), opts.variant);

    let content = render(
        &stats,
        format,
        TableStyle::Full,
        &opts.sep,
        opts.config.report.significance_level,
    )?;
    write_output(opts.output.as_deref(), &content)?;

    inputs.finish()
}
