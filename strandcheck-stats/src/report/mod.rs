//! Rendering of statistics bundles as delimited tables, JSON or a
//! human-readable narrative.

pub mod format;
pub mod narrative;
pub mod table;

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::statistics::StrandStatistics;

pub use narrative::{Narrative, format_narrative, format_narratives, write_narrative};
pub use table::{TableStyle, format_count_table, format_stats_table};

///
/// Serialize records as a pretty-printed JSON array. Non-finite floats become
/// `null`.
///
pub fn to_json<T: Serialize>(records: &[T]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Json,
    Report,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" | "table" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            "report" | "narrative" => Ok(OutputFormat::Report),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
            OutputFormat::Report => "report",
        };
        write!(f, "{}", name)
    }
}

///
/// Render full statistics bundles in the requested format.
///
/// `style` and `sep` only apply to tables, `significance_level` only to the
/// narrative report.
///
pub fn render(
    stats: &[StrandStatistics],
    format: OutputFormat,
    style: TableStyle,
    sep: &str,
    significance_level: f64,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Tsv => Ok(format_stats_table(stats, style, sep)),
        OutputFormat::Json => to_json(stats),
        OutputFormat::Report => Ok(format_narratives(stats, significance_level)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use serde_json::Value;
    use strandcheck_core::StrandCountObservation;

    use crate::classifier::ClassifierVariant;
    use crate::statistics::StrandAnalyzer;

    #[fixture]
    fn stats() -> Vec<StrandStatistics> {
        StrandAnalyzer::new(ClassifierVariant::SignedRelativeDifference).analyze_all(&[
            StrandCountObservation::new(3117, 37696, "a.fq.gz"),
            StrandCountObservation::new(0, 0, "z"),
        ])
    }

    #[rstest]
    fn test_json_output(stats: Vec<StrandStatistics>) {
        let json = to_json(&stats).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();

        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["label"], "a.fq.gz");
        assert_eq!(records[0]["total"], 40813);
        assert_eq!(records[0]["strandedness"], "fr-secondstrand");
        assert_eq!(records[0]["variant"], "signed");

        // NaN serializes as null
        assert!(records[1]["f2r_ratio"].is_null());
        assert!(records[1]["chi2"].is_null());
        assert_eq!(records[1]["entropy"], 0.0);
    }

    #[rstest]
    #[case(OutputFormat::Tsv, "File\tStrandedness")]
    #[case(OutputFormat::Json, "[")]
    #[case(OutputFormat::Report, "====")]
    fn test_render(
        stats: Vec<StrandStatistics>,
        #[case] format: OutputFormat,
        #[case] prefix: &str,
    ) {
        let out = render(&stats, format, TableStyle::Full, "\t", 0.05).unwrap();
        assert!(out.starts_with(prefix));
    }

    #[rstest]
    #[case("tsv", OutputFormat::Tsv)]
    #[case("JSON", OutputFormat::Json)]
    #[case("report", OutputFormat::Report)]
    fn test_output_format_from_str(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(input.parse::<OutputFormat>().unwrap(), expected);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
