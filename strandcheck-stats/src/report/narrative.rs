//! Human-readable, sectioned report for a single statistics bundle.

use std::fmt;

use crate::statistics::StrandStatistics;

use super::format::{fixed, scientific, thousands};

const RULE_WIDTH: usize = 60;

/// Magnitude of Cohen's h.
pub fn interpret_cohens_h(h: f64) -> &'static str {
    if h.is_nan() {
        return "Undefined";
    }

    let h = h.abs();
    if h < 0.2 {
        "Small effect"
    } else if h < 0.5 {
        "Medium effect"
    } else if h < 0.8 {
        "Large effect"
    } else {
        "Very large effect"
    }
}

pub fn interpret_cramers_v(v: f64) -> &'static str {
    if v.is_nan() {
        "Undefined"
    } else if v < 0.1 {
        "Negligible"
    } else if v < 0.3 {
        "Small effect"
    } else if v < 0.5 {
        "Medium effect"
    } else {
        "Large effect"
    }
}

///
/// Evidence category of a BF01 value. Values above 1 favour a balanced
/// library, values at or below 1 favour a strand bias.
///
pub fn interpret_bayes_factor(bf01: f64) -> &'static str {
    if bf01.is_nan() {
        "Undefined"
    } else if bf01 > 100.0 {
        "Extreme evidence for uniform distribution"
    } else if bf01 > 30.0 {
        "Very strong evidence for uniform distribution"
    } else if bf01 > 10.0 {
        "Strong evidence for uniform distribution"
    } else if bf01 > 3.0 {
        "Moderate evidence for uniform distribution"
    } else if bf01 > 1.0 {
        "Weak evidence for uniform distribution"
    } else if bf01 > 1.0 / 3.0 {
        "Weak evidence for non-uniform distribution"
    } else if bf01 > 1.0 / 10.0 {
        "Moderate evidence for non-uniform distribution"
    } else if bf01 > 1.0 / 30.0 {
        "Strong evidence for non-uniform distribution"
    } else if bf01 > 1.0 / 100.0 {
        "Very strong evidence for non-uniform distribution"
    } else {
        "Extreme evidence for non-uniform distribution"
    }
}

fn chi_square_conclusion(p_value: f64, significance_level: f64) -> String {
    if p_value.is_nan() {
        "Undefined (no reads)".to_string()
    } else if p_value < significance_level {
        format!(
            "P < {}, distribution significantly non-uniform",
            significance_level
        )
    } else {
        format!("P >= {}, uniform distribution", significance_level)
    }
}

///
/// Write one bundle as a multi-section plain text report.
///
/// `significance_level` decides the chi-square conclusion line.
///
pub fn write_narrative<W: fmt::Write>(
    out: &mut W,
    stats: &StrandStatistics,
    significance_level: f64,
) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{}", rule)?;
    writeln!(out, "Strand preference analysis report: {}", stats.label)?;
    writeln!(out, "{}", rule)?;

    writeln!(out, "\n[Basic Statistics]")?;
    writeln!(out, "  Forward strand: {}", thousands(stats.forward))?;
    writeln!(out, "  Reverse strand: {}", thousands(stats.reverse))?;
    writeln!(out, "  Total         : {}", thousands(stats.total))?;

    writeln!(out, "\n[Proportion Statistics]")?;
    writeln!(
        out,
        "  Forward ratio: {} ({}%)",
        fixed(stats.fwd_ratio, 4),
        fixed(stats.fwd_ratio * 100.0, 2)
    )?;
    writeln!(
        out,
        "  Reverse ratio: {} ({}%)",
        fixed(stats.rev_ratio, 4),
        fixed(stats.rev_ratio * 100.0, 2)
    )?;
    writeln!(out, "  F/R ratio: {}", fixed(stats.f2r_ratio, 4))?;
    writeln!(out, "  Log2(F/R): {}", fixed(stats.log2_f2r, 4))?;
    writeln!(
        out,
        "  Relative difference: {}",
        fixed(stats.classification_relative_diff(), 4)
    )?;

    writeln!(out, "\n[Chi-square Test]")?;
    writeln!(out, "  Chi-square value: {}", fixed(stats.chi2, 4))?;
    writeln!(out, "  P-value: {}", scientific(stats.p_value, 4))?;
    writeln!(
        out,
        "  Conclusion: {}",
        chi_square_conclusion(stats.p_value, significance_level)
    )?;

    writeln!(out, "\n[Effect Size]")?;
    writeln!(
        out,
        "  Cohen's h: {} ({})",
        fixed(stats.cohens_h, 4),
        interpret_cohens_h(stats.cohens_h)
    )?;
    writeln!(
        out,
        "  Cramér's V: {} ({})",
        fixed(stats.cramers_v, 4),
        interpret_cramers_v(stats.cramers_v)
    )?;

    writeln!(out, "\n[Bayesian Analysis]")?;
    writeln!(
        out,
        "  Bayes factor (BF01): {}",
        scientific(stats.bayes_factor, 4)
    )?;
    writeln!(
        out,
        "  Interpretation: {}",
        interpret_bayes_factor(stats.bayes_factor)
    )?;
    writeln!(
        out,
        "  Note: BF01 > 1 supports a uniform distribution, BF01 < 1 supports a strand bias"
    )?;

    writeln!(out, "\n[Distribution Distances]")?;
    writeln!(out, "  Epsilon: {}", fixed(stats.epsilon, 4))?;
    writeln!(out, "  Hellinger distance: {}", fixed(stats.hellinger, 4))?;
    writeln!(out, "  Normalized entropy: {}", fixed(stats.entropy, 4))?;

    writeln!(out, "\n[Strandedness]")?;
    writeln!(out, "  Type: {}", stats.strandedness)?;
    writeln!(out, "  Rule: {}", stats.variant)?;

    write!(out, "\n{}", rule)
}

/// [`Display`](fmt::Display) adapter over [`write_narrative`].
pub struct Narrative<'a> {
    pub stats: &'a StrandStatistics,
    pub significance_level: f64,
}

impl fmt::Display for Narrative<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_narrative(f, self.stats, self.significance_level)
    }
}

pub fn format_narrative(stats: &StrandStatistics, significance_level: f64) -> String {
    Narrative {
        stats,
        significance_level,
    }
    .to_string()
}

///
/// Narrative reports for several bundles, separated by a blank line.
///
pub fn format_narratives(stats: &[StrandStatistics], significance_level: f64) -> String {
    stats
        .iter()
        .map(|s| format_narrative(s, significance_level))
        .collect::<Vec<_>>()
        .join("\n\n")
}
