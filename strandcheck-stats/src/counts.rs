//! Strand bias from raw counts: difference, fold change and two p-values,
//! without the proportion-based effect sizes.

use rayon::prelude::*;
use serde::Serialize;

use strandcheck_core::{StrandCountObservation, Strandedness};

use crate::metrics::{binomial_test_normal, chi_square_test, log2_fold_change};
use crate::statistics::StrandAnalyzer;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountBasedStatistics {
    /// Chunk label, e.g. `1M`.
    pub label: String,
    pub forward: u64,
    pub reverse: u64,
    pub total: u64,
    /// `|fwd - rev|`
    pub diff: u64,
    pub log2_fc: f64,
    pub chi2: f64,
    pub p_value: f64,
    pub binomial_p: f64,
    pub strandedness: Strandedness,
}

impl StrandAnalyzer {
    pub fn analyze_counts(&self, observation: &StrandCountObservation) -> CountBasedStatistics {
        let fwd = observation.forward;
        let rev = observation.reverse;
        let (chi2, p_value) = chi_square_test(fwd, rev);

        CountBasedStatistics {
            label: observation.label.clone(),
            forward: fwd,
            reverse: rev,
            total: observation.total(),
            diff: fwd.abs_diff(rev),
            log2_fc: log2_fold_change(fwd, rev, self.pseudocount),
            chi2,
            p_value,
            binomial_p: binomial_test_normal(fwd, rev),
            strandedness: self.classify(fwd, rev),
        }
    }

    /// Parallel [`StrandAnalyzer::analyze_counts`], in input order.
    pub fn analyze_counts_all(
        &self,
        observations: &[StrandCountObservation],
    ) -> Vec<CountBasedStatistics> {
        observations
            .par_iter()
            .map(|obs| self.analyze_counts(obs))
            .collect()
    }
}
