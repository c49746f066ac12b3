use std::fmt::Display;
use std::str::FromStr;

use crate::counts::CountBasedStatistics;
use crate::statistics::StrandStatistics;

use super::format::{fixed, ratio, scientific};

const FULL_COLUMNS: [&str; 17] = [
    "Strandedness",
    "Fwd",
    "Rev",
    "Total",
    "Fwd_Ratio",
    "Rev_Ratio",
    "F2R_Ratio",
    "Log2_F2R",
    "Rel_Diff",
    "Chi2",
    "P_value",
    "Cohens_h",
    "Cramers_V",
    "Bayes_Factor",
    "Epsilon",
    "Hellinger",
    "Entropy",
];

const SUMMARY_COLUMNS: [&str; 8] = [
    "Strandedness",
    "Fwd",
    "Rev",
    "Fwd_Ratio",
    "Rev_Ratio",
    "Rel_Diff",
    "Chi2",
    "P_value",
];

const COUNT_COLUMNS: [&str; 10] = [
    "ReadsCounts",
    "Strandedness",
    "Fwd",
    "Rev",
    "Total",
    "Diff",
    "Log2_FC",
    "Chi2",
    "P_value",
    "Binomial_P",
];

///
/// Layout of a [`StrandStatistics`] table.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// Every statistic, one row per file.
    #[default]
    Full,
    /// Every statistic, one row per read-count chunk.
    Incremental,
    /// Counts, proportions and the chi-square test only.
    Summary,
}

impl TableStyle {
    pub fn header(&self) -> Vec<&'static str> {
        let (first, rest): (&str, &[&str]) = match self {
            TableStyle::Full => ("File", &FULL_COLUMNS),
            TableStyle::Incremental => ("ReadsCounts", &FULL_COLUMNS),
            TableStyle::Summary => ("File", &SUMMARY_COLUMNS),
        };

        std::iter::once(first).chain(rest.iter().copied()).collect()
    }

    pub fn row(&self, stats: &StrandStatistics) -> Vec<String> {
        match self {
            TableStyle::Full | TableStyle::Incremental => vec![
                stats.label.clone(),
                stats.strandedness.to_string(),
                stats.forward.to_string(),
                stats.reverse.to_string(),
                stats.total.to_string(),
                fixed(stats.fwd_ratio, 6),
                fixed(stats.rev_ratio, 6),
                ratio(stats.f2r_ratio, 6),
                fixed(stats.log2_f2r, 6),
                fixed(stats.classification_relative_diff(), 6),
                fixed(stats.chi2, 6),
                scientific(stats.p_value, 6),
                fixed(stats.cohens_h, 6),
                fixed(stats.cramers_v, 6),
                scientific(stats.bayes_factor, 6),
                fixed(stats.epsilon, 6),
                fixed(stats.hellinger, 6),
                fixed(stats.entropy, 6),
            ],
            TableStyle::Summary => vec![
                stats.label.clone(),
                stats.strandedness.to_string(),
                stats.forward.to_string(),
                stats.reverse.to_string(),
                fixed(stats.fwd_ratio, 6),
                fixed(stats.rev_ratio, 6),
                fixed(stats.classification_relative_diff(), 6),
                fixed(stats.chi2, 6),
                scientific(stats.p_value, 6),
            ],
        }
    }
}

impl FromStr for TableStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(TableStyle::Full),
            "incremental" | "step" => Ok(TableStyle::Incremental),
            "summary" => Ok(TableStyle::Summary),
            _ => Err(format!("Unknown table style: {}", s)),
        }
    }
}

impl Display for TableStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TableStyle::Full => "full",
            TableStyle::Incremental => "incremental",
            TableStyle::Summary => "summary",
        };
        write!(f, "{}", name)
    }
}

///
/// Render statistics bundles as a delimited table, header first.
///
/// Lines are joined with `\n` and there is no trailing newline.
///
pub fn format_stats_table(stats: &[StrandStatistics], style: TableStyle, sep: &str) -> String {
    let mut lines = Vec::with_capacity(stats.len() + 1);
    lines.push(style.header().join(sep));

    for s in stats {
        lines.push(style.row(s).join(sep));
    }

    lines.join("\n")
}

///
/// Render count-based statistics as a delimited table, header first.
///
pub fn format_count_table(stats: &[CountBasedStatistics], sep: &str) -> String {
    let mut lines = Vec::with_capacity(stats.len() + 1);
    lines.push(COUNT_COLUMNS.join(sep));

    for s in stats {
        let row = [
            s.label.clone(),
            s.strandedness.to_string(),
            s.forward.to_string(),
            s.reverse.to_string(),
            s.total.to_string(),
            s.diff.to_string(),
            fixed(s.log2_fc, 4),
            fixed(s.chi2, 2),
            scientific(s.p_value, 2),
            scientific(s.binomial_p, 2),
        ];
        lines.push(row.join(sep));
    }

    lines.join("\n")
}
