//! Strand-bias metrics for a pair of forward/reverse read counts.
//!
//! Every function here is total over non-negative counts: a zero total never
//! panics, it yields the documented sentinel (`0.0` or `NaN`) instead. The
//! NaN sentinels are load-bearing, since comparisons against NaN are always
//! false and the formatters print them verbatim.

use statrs::function::erf::erfc;
use statrs::function::gamma::ln_gamma;

use crate::consts::{DEFAULT_ENTROPY_FLOOR, NULL_PROPORTION};

fn total_of(fwd: u64, rev: u64) -> f64 {
    fwd as f64 + rev as f64
}

///
/// Forward ratio, reverse ratio and forward/reverse ratio.
///
/// Returns `(0.0, 0.0, NaN)` when there are no reads and an infinite
/// forward/reverse ratio when only forward reads were seen.
///
pub fn proportions(fwd: u64, rev: u64) -> (f64, f64, f64) {
    if fwd == 0 && rev == 0 {
        return (0.0, 0.0, f64::NAN);
    }

    let total = total_of(fwd, rev);
    let fwd_ratio = fwd as f64 / total;
    let rev_ratio = rev as f64 / total;

    let f2r_ratio = if rev == 0 {
        f64::INFINITY
    } else {
        fwd as f64 / rev as f64
    };

    (fwd_ratio, rev_ratio, f2r_ratio)
}

///
/// log2 of the forward/reverse ratio with a pseudocount added to both
/// counts, so it is finite for any pair of counts.
///
pub fn log2_fold_change(fwd: u64, rev: u64, pseudocount: f64) -> f64 {
    ((fwd as f64 + pseudocount) / (rev as f64 + pseudocount)).log2()
}

///
/// `|fwd - rev| / mean(fwd, rev)`, from 0 (balanced) to 2 (one strand only).
/// NaN when there are no reads.
///
pub fn relative_difference_unsigned(fwd: u64, rev: u64) -> f64 {
    relative_difference_signed(fwd, rev).abs()
}

///
/// `(fwd - rev) / mean(fwd, rev)`, from -2 (reverse only) to +2 (forward only).
/// Positive values mean a forward bias. NaN when there are no reads.
///
pub fn relative_difference_signed(fwd: u64, rev: u64) -> f64 {
    if fwd == 0 && rev == 0 {
        return f64::NAN;
    }

    let mean = total_of(fwd, rev) / 2.0;
    (fwd as f64 - rev as f64) / mean
}

///
/// Chi-square goodness of fit against a 50:50 split (df = 1).
///
/// The p-value uses the fact that a chi-square variable with one degree of
/// freedom is a squared standard normal, so `P(X > chi2) = erfc(sqrt(chi2 / 2))`.
/// Returns `(NaN, NaN)` when there are no reads.
///
pub fn chi_square_test(fwd: u64, rev: u64) -> (f64, f64) {
    if fwd == 0 && rev == 0 {
        return (f64::NAN, f64::NAN);
    }

    let expected = total_of(fwd, rev) / 2.0;
    let chi2 = (fwd as f64 - expected).powi(2) / expected
        + (rev as f64 - expected).powi(2) / expected;

    let p_value = erfc((chi2 / 2.0).sqrt());

    (chi2, p_value)
}

///
/// Cohen's h between the observed forward proportion and 0.5.
///
/// |h| < 0.2 is a small effect, < 0.5 medium, < 0.8 large, otherwise very large.
///
pub fn cohens_h(fwd: u64, rev: u64) -> f64 {
    if fwd == 0 && rev == 0 {
        return f64::NAN;
    }

    let p_observed = fwd as f64 / total_of(fwd, rev);

    let phi_observed = 2.0 * p_observed.sqrt().asin();
    let phi_expected = 2.0 * NULL_PROPORTION.sqrt().asin();

    phi_observed - phi_expected
}

///
/// Cramér's V for the 2x1 observed-vs-expected table, `sqrt(chi2 / n)`.
///
pub fn cramers_v(fwd: u64, rev: u64) -> f64 {
    if fwd == 0 && rev == 0 {
        return f64::NAN;
    }

    let (chi2, _) = chi_square_test(fwd, rev);
    (chi2 / total_of(fwd, rev)).sqrt()
}

///
/// Bayes factor BF01 in favour of a 50:50 split.
///
/// Savage–Dickey density ratio with a uniform Beta(1, 1) prior: BF01 is the
/// Beta(fwd + 1, rev + 1) posterior density at p = 0.5 divided by the prior
/// density there, which is 1. Everything stays in log space until the final
/// `exp`, so counts in the millions do not overflow (the result may still
/// underflow to 0 for overwhelming evidence against 50:50).
///
/// BF01 > 1 supports a balanced library, BF01 < 1 a strand bias.
///
pub fn bayes_factor_bf01(fwd: u64, rev: u64) -> f64 {
    if fwd == 0 && rev == 0 {
        return f64::NAN;
    }

    let a = fwd as f64 + 1.0;
    let b = rev as f64 + 1.0;

    let log_beta = ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b);
    let log_posterior_density = (a + b - 2.0) * NULL_PROPORTION.ln() - log_beta;

    log_posterior_density.exp()
}

///
/// Sample-size insensitive effect size
/// `|p - 0.5| / sqrt(p(1 - p) + 0.25)` with `p` the forward proportion.
///
pub fn effect_size_epsilon(fwd: u64, rev: u64) -> f64 {
    if fwd == 0 && rev == 0 {
        return 0.0;
    }

    let p1 = fwd as f64 / total_of(fwd, rev);
    let p2 = NULL_PROPORTION;

    let numerator = (p1 - p2).abs();
    let denominator = (p1 * (1.0 - p1) + p2 * (1.0 - p2)).sqrt();

    if denominator == 0.0 {
        return 0.0;
    }

    numerator / denominator
}

///
/// Hellinger distance between the observed strand distribution and (0.5, 0.5).
/// Ranges from 0 to 1.
///
pub fn hellinger_distance(fwd: u64, rev: u64) -> f64 {
    if fwd == 0 && rev == 0 {
        return 0.0;
    }

    let total = total_of(fwd, rev);
    let p_fwd = fwd as f64 / total;
    let p_rev = rev as f64 / total;
    let q = NULL_PROPORTION.sqrt();

    (0.5 * ((p_fwd.sqrt() - q).powi(2) + (p_rev.sqrt() - q).powi(2))).sqrt()
}

///
/// Shannon entropy of the strand distribution in bits. Two outcomes have a
/// maximum entropy of 1 bit, so this is already normalized: 1 means perfectly
/// balanced, values near 0 mean a single strand.
///
pub fn normalized_entropy(fwd: u64, rev: u64) -> f64 {
    normalized_entropy_with_floor(fwd, rev, DEFAULT_ENTROPY_FLOOR)
}

///
/// [`normalized_entropy`] with an explicit floor applied to each proportion
/// before taking `log2`.
///
pub fn normalized_entropy_with_floor(fwd: u64, rev: u64, floor: f64) -> f64 {
    if fwd == 0 && rev == 0 {
        return 0.0;
    }

    let total = total_of(fwd, rev);
    let p_fwd = (fwd as f64 / total).max(floor);
    let p_rev = (rev as f64 / total).max(floor);

    let entropy = -p_fwd * p_fwd.log2() - p_rev * p_rev.log2();

    // log2(2) = 1
    entropy / 1.0
}

///
/// Two-sided p-value of a binomial test against p = 0.5, using the normal
/// approximation `z = |fwd - n/2| / sqrt(n/4)`.
///
pub fn binomial_test_normal(fwd: u64, rev: u64) -> f64 {
    if fwd == 0 && rev == 0 {
        return f64::NAN;
    }

    let n = total_of(fwd, rev);
    let mean = n * NULL_PROPORTION;
    let std = (n * NULL_PROPORTION * (1.0 - NULL_PROPORTION)).sqrt();

    if std == 0.0 {
        return 1.0;
    }

    let z = (fwd as f64 - mean).abs() / std;
    erfc(z / std::f64::consts::SQRT_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::consts::DEFAULT_PSEUDOCOUNT;

    #[rstest]
    fn test_proportions_sum_to_one() {
        for (fwd, rev) in [(1, 0), (0, 1), (3117, 37696), (51, 49), (1, 999_999)] {
            let (f, r, _) = proportions(fwd, rev);
            assert_relative_eq!(f + r, 1.0, epsilon = 1e-12);
        }
    }

    #[rstest]
    fn test_proportions_no_reads() {
        let (f, r, f2r) = proportions(0, 0);
        assert_eq!(f, 0.0);
        assert_eq!(r, 0.0);
        assert!(f2r.is_nan());
    }

    #[rstest]
    fn test_f2r_ratio_without_reverse_reads() {
        let (f, r, f2r) = proportions(10, 0);
        assert_eq!(f, 1.0);
        assert_eq!(r, 0.0);
        assert_eq!(f2r, f64::INFINITY);
    }

    #[rstest]
    fn test_f2r_ratio_without_forward_reads() {
        let (_, _, f2r) = proportions(0, 10);
        assert_eq!(f2r, 0.0);
    }

    #[rstest]
    #[case(0, 0, 0.0)]
    #[case(10, 0, 4.392317422778761)]
    #[case(3117, 37696, -3.59596911490334)]
    fn test_log2_fold_change(#[case] fwd: u64, #[case] rev: u64, #[case] expected: f64) {
        let l2fc = log2_fold_change(fwd, rev, DEFAULT_PSEUDOCOUNT);
        assert!(l2fc.is_finite());
        assert_relative_eq!(l2fc, expected, epsilon = 1e-9);
    }

    #[rstest]
    fn test_relative_difference_antisymmetry() {
        for (fwd, rev) in [(1, 0), (3117, 37696), (51, 49), (7, 7)] {
            assert_eq!(
                relative_difference_signed(fwd, rev),
                -relative_difference_signed(rev, fwd)
            );
            assert_eq!(
                relative_difference_unsigned(fwd, rev),
                relative_difference_signed(fwd, rev).abs()
            );
        }
    }

    #[rstest]
    fn test_relative_difference_bounds() {
        assert_eq!(relative_difference_signed(10, 0), 2.0);
        assert_eq!(relative_difference_signed(0, 10), -2.0);
        assert_eq!(relative_difference_unsigned(0, 10), 2.0);
        assert_eq!(relative_difference_signed(5000, 5000), 0.0);
    }

    #[rstest]
    fn test_relative_difference_no_reads() {
        assert!(relative_difference_signed(0, 0).is_nan());
        assert!(relative_difference_unsigned(0, 0).is_nan());
    }

    #[rstest]
    fn test_chi_square_symmetry() {
        for (fwd, rev) in [(1, 0), (3117, 37696), (51, 49), (510_000, 490_000)] {
            assert_eq!(chi_square_test(fwd, rev).0, chi_square_test(rev, fwd).0);
        }
    }

    #[rstest]
    fn test_chi_square_balanced() {
        let (chi2, p) = chi_square_test(5000, 5000);
        assert_eq!(chi2, 0.0);
        assert_relative_eq!(p, 1.0, epsilon = 1e-12);
    }

    #[rstest]
    #[case(10, 0, 10.0, 0.0015654022580025488)]
    #[case(3, 1, 1.0, 0.31731050786291404)]
    #[case(510_000, 490_000, 400.0, 5.507248237212385e-89)]
    fn test_chi_square_values(
        #[case] fwd: u64,
        #[case] rev: u64,
        #[case] expected_chi2: f64,
        #[case] expected_p: f64,
    ) {
        let (chi2, p) = chi_square_test(fwd, rev);
        assert_relative_eq!(chi2, expected_chi2, max_relative = 1e-12);
        assert_relative_eq!(p, expected_p, max_relative = 1e-8);
    }

    #[rstest]
    fn test_chi_square_no_reads() {
        let (chi2, p) = chi_square_test(0, 0);
        assert!(chi2.is_nan());
        assert!(p.is_nan());
    }

    #[rstest]
    fn test_cohens_h() {
        assert_relative_eq!(cohens_h(10, 0), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(cohens_h(3117, 37696), -1.0107952729892418, epsilon = 1e-12);
        assert_relative_eq!(cohens_h(5000, 5000), 0.0, epsilon = 1e-15);
        assert!(cohens_h(0, 0).is_nan());
    }

    #[rstest]
    fn test_cramers_v() {
        assert_relative_eq!(cramers_v(10, 0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(cramers_v(51, 49), 0.02, epsilon = 1e-12);
        assert!(cramers_v(0, 0).is_nan());
    }

    #[rstest]
    #[case(3, 1, 1.25)]
    #[case(10, 0, 0.01074218750000002)]
    #[case(51, 49, 7.880895074612749)]
    #[case(5000, 5000, 79.79444004024691)]
    fn test_bayes_factor_values(#[case] fwd: u64, #[case] rev: u64, #[case] expected: f64) {
        assert_relative_eq!(bayes_factor_bf01(fwd, rev), expected, max_relative = 1e-8);
    }

    #[rstest]
    fn test_bayes_factor_large_counts_do_not_overflow() {
        let bf = bayes_factor_bf01(5_000_000, 5_000_000);
        assert!(bf.is_finite());
        assert!(bf > 1.0);

        let bf = bayes_factor_bf01(510_000, 490_000);
        assert_relative_eq!(bf, 1.0897813261722947e-84, max_relative = 1e-6);

        let bf = bayes_factor_bf01(3117, 37696);
        assert!(bf >= 0.0 && bf < 1e-100);
    }

    #[rstest]
    #[case(1)]
    #[case(10)]
    #[case(250)]
    #[case(5000)]
    fn test_bayes_factor_peaks_at_balance(#[case] n: u64) {
        let balanced = bayes_factor_bf01(n, n);
        for k in 1..=n.min(50) {
            assert!(balanced >= bayes_factor_bf01(n + k, n - k));
        }
    }

    #[rstest]
    fn test_bayes_factor_no_reads() {
        assert!(bayes_factor_bf01(0, 0).is_nan());
    }

    #[rstest]
    fn test_effect_size_epsilon() {
        assert_eq!(effect_size_epsilon(0, 0), 0.0);
        assert_eq!(effect_size_epsilon(5000, 5000), 0.0);
        assert_relative_eq!(effect_size_epsilon(10, 0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(effect_size_epsilon(3, 1), 0.3779644730092272, epsilon = 1e-12);
    }

    #[rstest]
    fn test_hellinger_distance() {
        assert_eq!(hellinger_distance(0, 0), 0.0);
        assert_relative_eq!(hellinger_distance(5000, 5000), 0.0, epsilon = 1e-15);
        assert_relative_eq!(hellinger_distance(10, 0), 0.541196100146197, epsilon = 1e-12);
        assert_relative_eq!(
            hellinger_distance(3117, 37696),
            0.35357880911103906,
            epsilon = 1e-12
        );
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(5000)]
    #[case(1_000_000)]
    fn test_entropy_balanced_is_one(#[case] n: u64) {
        assert_eq!(normalized_entropy(n, n), 1.0);
    }

    #[rstest]
    fn test_entropy_single_strand_is_near_zero() {
        let mut previous = f64::INFINITY;
        for n in [1, 10, 1000, 1_000_000] {
            let entropy = normalized_entropy(n, 0);
            assert!(entropy >= 0.0);
            assert!(entropy < 1e-8);
            assert!(entropy <= previous);
            previous = entropy;
        }
    }

    #[rstest]
    fn test_entropy_values() {
        assert_eq!(normalized_entropy(0, 0), 0.0);
        assert_relative_eq!(normalized_entropy(3, 1), 0.8112781244591328, epsilon = 1e-12);
        assert_relative_eq!(
            normalized_entropy(3117, 37696),
            0.3892674866067677,
            epsilon = 1e-12
        );
    }

    #[rstest]
    fn test_entropy_floor() {
        let floored = normalized_entropy_with_floor(10, 0, 1e-3);
        assert!(floored > normalized_entropy(10, 0));
    }

    #[rstest]
    fn test_binomial_matches_chi_square_p_value() {
        for (fwd, rev) in [(10, 0), (3, 1), (51, 49), (2000, 1500)] {
            let (_, p) = chi_square_test(fwd, rev);
            assert_relative_eq!(binomial_test_normal(fwd, rev), p, max_relative = 1e-10);
        }
        assert!(binomial_test_normal(0, 0).is_nan());
    }
}
