//! The per-observation statistics bundle and the analyzer that builds it.

use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;

use strandcheck_core::{StrandCountObservation, Strandedness};

use crate::classifier::{ClassificationEvidence, ClassifierThresholds, ClassifierVariant};
use crate::consts::{DEFAULT_ENTROPY_FLOOR, DEFAULT_PSEUDOCOUNT};
use crate::metrics::{
    bayes_factor_bf01, chi_square_test, cohens_h, cramers_v, effect_size_epsilon,
    hellinger_distance, log2_fold_change, normalized_entropy_with_floor, proportions,
    relative_difference_signed, relative_difference_unsigned,
};

/// Every strand-bias statistic for one observation, plus the strandedness call.
///
/// Built once by [`StrandAnalyzer::analyze`] and never modified. Statistics
/// that are undefined without reads are NaN (see [`crate::metrics`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrandStatistics {
    pub label: String,
    pub forward: u64,
    pub reverse: u64,
    pub total: u64,
    pub fwd_ratio: f64,
    pub rev_ratio: f64,
    pub f2r_ratio: f64,
    pub log2_f2r: f64,
    /// `|fwd - rev| / mean`
    pub relative_diff: f64,
    /// `(fwd - rev) / mean`
    pub signed_relative_diff: f64,
    pub chi2: f64,
    pub p_value: f64,
    pub cohens_h: f64,
    pub cramers_v: f64,
    /// BF01, evidence for a balanced library.
    pub bayes_factor: f64,
    pub epsilon: f64,
    pub hellinger: f64,
    pub entropy: f64,
    pub variant: ClassifierVariant,
    pub strandedness: Strandedness,
}

impl StrandStatistics {
    /// The relative difference the bundle's classifier rule looked at.
    pub fn classification_relative_diff(&self) -> f64 {
        match self.variant {
            ClassifierVariant::SignedRelativeDifference => self.signed_relative_diff,
            ClassifierVariant::UnsignedRelativeDifferenceWithRatio => self.relative_diff,
        }
    }
}

///
/// Computes [`StrandStatistics`] with one classifier rule and one set of
/// numeric settings.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrandAnalyzer {
    pub variant: ClassifierVariant,
    pub thresholds: ClassifierThresholds,
    pub pseudocount: f64,
    pub entropy_floor: f64,
}

impl StrandAnalyzer {
    pub fn new(variant: ClassifierVariant) -> Self {
        StrandAnalyzer {
            variant,
            thresholds: ClassifierThresholds::default(),
            pseudocount: DEFAULT_PSEUDOCOUNT,
            entropy_floor: DEFAULT_ENTROPY_FLOOR,
        }
    }

    pub fn with_thresholds(mut self, thresholds: ClassifierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_pseudocount(mut self, pseudocount: f64) -> Self {
        self.pseudocount = pseudocount;
        self
    }

    pub fn with_entropy_floor(mut self, entropy_floor: f64) -> Self {
        self.entropy_floor = entropy_floor;
        self
    }

    pub fn classify(&self, fwd: u64, rev: u64) -> Strandedness {
        self.variant
            .classify(&ClassificationEvidence::from_counts(fwd, rev), &self.thresholds)
    }

    pub fn analyze(&self, observation: &StrandCountObservation) -> StrandStatistics {
        let fwd = observation.forward;
        let rev = observation.reverse;

        if observation.is_empty() {
            warn!("{}: no stranded reads", observation.label);
        }

        let (fwd_ratio, rev_ratio, f2r_ratio) = proportions(fwd, rev);
        let relative_diff = relative_difference_unsigned(fwd, rev);
        let signed_relative_diff = relative_difference_signed(fwd, rev);
        let (chi2, p_value) = chi_square_test(fwd, rev);

        let evidence = ClassificationEvidence {
            total: observation.total(),
            signed_relative_diff,
            unsigned_relative_diff: relative_diff,
            f2r_ratio,
        };
        let strandedness = self.variant.classify(&evidence, &self.thresholds);

        debug!(
            "{}: fwd={} rev={} -> {} ({} rule)",
            observation.label, fwd, rev, strandedness, self.variant
        );

        StrandStatistics {
            label: observation.label.clone(),
            forward: fwd,
            reverse: rev,
            total: observation.total(),
            fwd_ratio,
            rev_ratio,
            f2r_ratio,
            log2_f2r: log2_fold_change(fwd, rev, self.pseudocount),
            relative_diff,
            signed_relative_diff,
            chi2,
            p_value,
            cohens_h: cohens_h(fwd, rev),
            cramers_v: cramers_v(fwd, rev),
            bayes_factor: bayes_factor_bf01(fwd, rev),
            epsilon: effect_size_epsilon(fwd, rev),
            hellinger: hellinger_distance(fwd, rev),
            entropy: normalized_entropy_with_floor(fwd, rev, self.entropy_floor),
            variant: self.variant,
            strandedness,
        }
    }

    ///
    /// Analyze many observations in parallel. The output is in input order.
    ///
    pub fn analyze_all(&self, observations: &[StrandCountObservation]) -> Vec<StrandStatistics> {
        observations
            .par_iter()
            .map(|obs| self.analyze(obs))
            .collect()
    }
}

///
/// Compute the full statistics bundle for one observation with the given
/// classifier rule and default settings.
///
pub fn compute_strand_statistics(
    observation: &StrandCountObservation,
    variant: ClassifierVariant,
) -> StrandStatistics {
    StrandAnalyzer::new(variant).analyze(observation)
}
