//! Arguments and input/output plumbing shared by every subcommand.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, arg};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};

use strandcheck_core::{RecordLayout, StrandCountObservation, read_observations};
use strandcheck_stats::{ClassifierVariant, StrandCheckConfig};

pub const DEFAULT_SEP: &str = "\t";

///
/// Attach the input, output and analysis options every subcommand takes.
///
pub fn with_common_args(
    cmd: Command,
    default_layout: &'static str,
    default_variant: &'static str,
) -> Command {
    cmd.arg(
        Arg::new("input")
            .required(true)
            .num_args(1..)
            .help("Strand count file(s), plain or gzipped. '-' reads stdin"),
    )
    .arg(
        arg!(-o --output <OUTPUT>)
            .required(false)
            .help("Output path (default: stdout)"),
    )
    .arg(
        arg!(--config <CONFIG>)
            .required(false)
            .help("TOML file overriding classifier thresholds and metric settings"),
    )
    .arg(
        arg!(--variant <VARIANT>)
            .required(false)
            .default_value(default_variant)
            .value_parser(["signed", "unsigned-ratio"])
            .help("Classifier rule"),
    )
    .arg(
        arg!(--layout <LAYOUT>)
            .required(false)
            .default_value(default_layout)
            .value_parser(["sample", "summary"])
            .help("Column layout of the count files"),
    )
    .arg(
        arg!(--sep <SEP>)
            .required(false)
            .default_value(DEFAULT_SEP)
            .help("Column separator for tables"),
    )
    .arg(
        arg!(-v --verbose)
            .action(ArgAction::SetTrue)
            .help("Log progress at info level"),
    )
}

/// Parsed form of [`with_common_args`].
#[derive(Debug)]
pub struct CommonOptions {
    pub inputs: Vec<String>,
    pub output: Option<String>,
    pub config: StrandCheckConfig,
    pub variant: ClassifierVariant,
    pub layout: RecordLayout,
    pub sep: String,
}

impl CommonOptions {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let inputs: Vec<String> = matches
            .get_many::<String>("input")
            .context("At least one input file is required.")?
            .cloned()
            .collect();

        let output = matches.get_one::<String>("output").cloned();

        let config = match matches.get_one::<String>("config") {
            Some(path) => StrandCheckConfig::try_from(Path::new(path))
                .with_context(|| format!("Failed to load config file: {}", path))?,
            None => StrandCheckConfig::default(),
        };

        let variant = match matches.get_one::<String>("variant") {
            Some(variant) => variant.parse().map_err(anyhow::Error::msg)?,
            None => ClassifierVariant::SignedRelativeDifference,
        };

        let layout = match matches.get_one::<String>("layout") {
            Some(layout) => layout.parse().map_err(anyhow::Error::msg)?,
            None => RecordLayout::default(),
        };

        let sep = matches
            .get_one::<String>("sep")
            .cloned()
            .unwrap_or_else(|| DEFAULT_SEP.to_string());

        Ok(CommonOptions {
            inputs,
            output,
            config,
            variant,
            layout,
            sep,
        })
    }
}

///
/// Observations from every readable input, in input order, plus the inputs
/// that could not be read.
///
#[derive(Debug, Default)]
pub struct LoadedInputs {
    pub observations: Vec<StrandCountObservation>,
    pub failed: Vec<String>,
}

impl LoadedInputs {
    ///
    /// Turn skipped inputs into an error once the output has been written.
    ///
    pub fn finish(self) -> Result<()> {
        if self.failed.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "{} input(s) could not be processed: {}",
                self.failed.len(),
                self.failed.join(", ")
            )
        }
    }
}

///
/// Read every input. A file that can't be read or parsed is logged and
/// skipped so the rest still get reported.
///
pub fn load_inputs(inputs: &[String], layout: RecordLayout) -> Result<LoadedInputs> {
    let pb = if inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
            )?
            .progress_chars("##-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut loaded = LoadedInputs::default();
    for input in inputs {
        pb.set_message(input.clone());

        match read_observations(input, layout) {
            Ok(mut observations) => loaded.observations.append(&mut observations),
            Err(e) => {
                pb.suspend(|| error!("Skipping {}: {:#}", input, e));
                loaded.failed.push(input.clone());
            }
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "Loaded {} observations from {} of {} input(s)",
        loaded.observations.len(),
        inputs.len() - loaded.failed.len(),
        inputs.len()
    );

    Ok(loaded)
}

///
/// Write `content` plus one trailing newline to `output`, or stdout when no
/// path is given.
///
pub fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{}", content)?;
            writer.flush()?;
            info!("Results written to {}", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            writeln!(writer, "{}", content)?;
            writer.flush()?;
        }
    }

    Ok(())
}
