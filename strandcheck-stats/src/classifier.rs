//! Strandedness calls from strand-bias statistics.
//!
//! Two rules are in use and they are deliberately kept apart:
//!
//! - [`SignedRelativeDifference`] looks at the signed relative difference
//!   and calls anything within a small band around zero unstranded.
//! - [`UnsignedRelativeDifferenceWithRatio`] looks at the unsigned relative
//!   difference with a unit threshold and breaks the direction with the
//!   forward/reverse ratio.
//!
//! The thresholds of the two rules live on different scales and are not
//! derived from each other. Callers pick one through [`ClassifierVariant`].
//!
//! Both rules check the total count first. That gate also absorbs every NaN
//! statistic, because NaN only appears when there are no reads at all.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use strandcheck_core::Strandedness;

use crate::consts::{
    DEFAULT_MIN_TOTAL, DEFAULT_SIGNED_UNSTRANDED_THRESHOLD, DEFAULT_UNSIGNED_UNSTRANDED_THRESHOLD,
};
use crate::metrics::{proportions, relative_difference_signed, relative_difference_unsigned};

/// Cut-offs shared by both classifier rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    /// Totals at or below this are `insufficient-data`.
    pub min_total: u64,
    /// Unstranded band for the signed rule.
    pub signed_unstranded: f64,
    /// Unstranded cut-off for the unsigned rule.
    pub unsigned_unstranded: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        ClassifierThresholds {
            min_total: DEFAULT_MIN_TOTAL,
            signed_unstranded: DEFAULT_SIGNED_UNSTRANDED_THRESHOLD,
            unsigned_unstranded: DEFAULT_UNSIGNED_UNSTRANDED_THRESHOLD,
        }
    }
}

/// Statistics a classifier may look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationEvidence {
    pub total: u64,
    pub signed_relative_diff: f64,
    pub unsigned_relative_diff: f64,
    pub f2r_ratio: f64,
}

impl ClassificationEvidence {
    pub fn from_counts(fwd: u64, rev: u64) -> Self {
        let (_, _, f2r_ratio) = proportions(fwd, rev);
        ClassificationEvidence {
            total: fwd.saturating_add(rev),
            signed_relative_diff: relative_difference_signed(fwd, rev),
            unsigned_relative_diff: relative_difference_unsigned(fwd, rev),
            f2r_ratio,
        }
    }
}

pub trait StrandednessClassifier {
    fn classify(&self, evidence: &ClassificationEvidence) -> Strandedness;
}

///
/// Signed relative difference rule.
///
/// 1. `total <= min_total`: insufficient data
/// 2. `|diff| <= unstranded_threshold`: unstranded
/// 3. `diff > 0`: fr-firststrand, otherwise fr-secondstrand
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedRelativeDifference {
    pub min_total: u64,
    pub unstranded_threshold: f64,
}

impl SignedRelativeDifference {
    pub fn new(thresholds: &ClassifierThresholds) -> Self {
        SignedRelativeDifference {
            min_total: thresholds.min_total,
            unstranded_threshold: thresholds.signed_unstranded,
        }
    }
}

impl Default for SignedRelativeDifference {
    fn default() -> Self {
        SignedRelativeDifference::new(&ClassifierThresholds::default())
    }
}

impl StrandednessClassifier for SignedRelativeDifference {
    fn classify(&self, evidence: &ClassificationEvidence) -> Strandedness {
        if evidence.total <= self.min_total {
            return Strandedness::InsufficientData;
        }

        let diff = evidence.signed_relative_diff;
        if diff.abs() <= self.unstranded_threshold {
            Strandedness::FrUnstranded
        } else if diff > 0.0 {
            Strandedness::FrFirstStrand
        } else {
            Strandedness::FrSecondStrand
        }
    }
}

///
/// Unsigned relative difference plus forward/reverse ratio rule.
///
/// 1. `total <= min_total`: insufficient data
/// 2. `diff <= unstranded_threshold`: unstranded
/// 3. `f2r > 1`: fr-firststrand, otherwise fr-secondstrand
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnsignedRelativeDifferenceWithRatio {
    pub min_total: u64,
    pub unstranded_threshold: f64,
}

impl UnsignedRelativeDifferenceWithRatio {
    pub fn new(thresholds: &ClassifierThresholds) -> Self {
        UnsignedRelativeDifferenceWithRatio {
            min_total: thresholds.min_total,
            unstranded_threshold: thresholds.unsigned_unstranded,
        }
    }
}

impl Default for UnsignedRelativeDifferenceWithRatio {
    fn default() -> Self {
        UnsignedRelativeDifferenceWithRatio::new(&ClassifierThresholds::default())
    }
}

impl StrandednessClassifier for UnsignedRelativeDifferenceWithRatio {
    fn classify(&self, evidence: &ClassificationEvidence) -> Strandedness {
        if evidence.total <= self.min_total {
            return Strandedness::InsufficientData;
        }

        if evidence.unsigned_relative_diff <= self.unstranded_threshold {
            Strandedness::FrUnstranded
        } else if evidence.f2r_ratio > 1.0 {
            Strandedness::FrFirstStrand
        } else {
            Strandedness::FrSecondStrand
        }
    }
}

/// Classify with the signed rule and default thresholds.
pub fn classify_signed(total: u64, signed_relative_diff: f64) -> Strandedness {
    SignedRelativeDifference::default().classify(&ClassificationEvidence {
        total,
        signed_relative_diff,
        unsigned_relative_diff: signed_relative_diff.abs(),
        f2r_ratio: f64::NAN,
    })
}

/// Classify with the unsigned + ratio rule and default thresholds.
pub fn classify_unsigned_with_ratio(
    total: u64,
    unsigned_relative_diff: f64,
    f2r_ratio: f64,
) -> Strandedness {
    UnsignedRelativeDifferenceWithRatio::default().classify(&ClassificationEvidence {
        total,
        signed_relative_diff: f64::NAN,
        unsigned_relative_diff,
        f2r_ratio,
    })
}

/// Which classifier rule produced (or should produce) a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassifierVariant {
    #[serde(rename = "signed")]
    SignedRelativeDifference,
    #[serde(rename = "unsigned-ratio")]
    UnsignedRelativeDifferenceWithRatio,
}

impl ClassifierVariant {
    pub fn name(&self) -> &'static str {
        match self {
            ClassifierVariant::SignedRelativeDifference => "signed",
            ClassifierVariant::UnsignedRelativeDifferenceWithRatio => "unsigned-ratio",
        }
    }

    pub fn classify(
        &self,
        evidence: &ClassificationEvidence,
        thresholds: &ClassifierThresholds,
    ) -> Strandedness {
        match self {
            ClassifierVariant::SignedRelativeDifference => {
                SignedRelativeDifference::new(thresholds).classify(evidence)
            }
            ClassifierVariant::UnsignedRelativeDifferenceWithRatio => {
                UnsignedRelativeDifferenceWithRatio::new(thresholds).classify(evidence)
            }
        }
    }
}

impl Display for ClassifierVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ClassifierVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "signed" => Ok(ClassifierVariant::SignedRelativeDifference),
            "unsigned-ratio" => Ok(ClassifierVariant::UnsignedRelativeDifferenceWithRatio),
            _ => Err(format!(
                "Unknown classifier variant: {} (expected 'signed' or 'unsigned-ratio')",
                s
            )),
        }
    }
}
