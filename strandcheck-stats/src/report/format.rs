//! Number formatting for report output.
//!
//! Tables written by earlier versions of the tool are consumed by downstream
//! scripts, so floats keep that layout: `nan`/`inf` for non-finite values and
//! a signed, two-digit exponent in scientific notation (`1.565402e-03`).

///
/// Fixed-point with `precision` decimals.
///
pub fn fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

///
/// Scientific notation with `precision` mantissa decimals and an exponent of
/// at least two digits.
///
pub fn scientific(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return fixed(value, precision);
    }

    let raw = format!("{:.*e}", precision, value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => raw,
    }
}

/// F/R ratio column: `Inf` when there are no reverse reads.
pub fn ratio(value: f64, precision: usize) -> String {
    if value.is_infinite() && value > 0.0 {
        "Inf".to_string()
    } else {
        fixed(value, precision)
    }
}

/// `1234567` -> `1,234,567`
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0763727, 6, "0.076373")]
    #[case(-3.59596911490334, 6, "-3.595969")]
    #[case(29297.215127532894, 6, "29297.215128")]
    #[case(f64::NAN, 6, "nan")]
    #[case(f64::INFINITY, 4, "inf")]
    #[case(f64::NEG_INFINITY, 4, "-inf")]
    #[case(0.5, 0, "0")]
    fn test_fixed(#[case] value: f64, #[case] precision: usize, #[case] expected: &str) {
        assert_eq!(fixed(value, precision), expected);
    }

    #[rstest]
    #[case(0.0015654022580025488, 6, "1.565402e-03")]
    #[case(0.0, 6, "0.000000e+00")]
    #[case(0.01074218750000002, 6, "1.074219e-02")]
    #[case(5.507248237212385e-89, 2, "5.51e-89")]
    #[case(79.79444004024691, 4, "7.9794e+01")]
    #[case(1.0897813261722947e-184, 6, "1.089781e-184")]
    #[case(f64::NAN, 6, "nan")]
    #[case(f64::INFINITY, 2, "inf")]
    fn test_scientific(#[case] value: f64, #[case] precision: usize, #[case] expected: &str) {
        assert_eq!(scientific(value, precision), expected);
    }

    #[rstest]
    #[case(f64::INFINITY, "Inf")]
    #[case(f64::NAN, "nan")]
    #[case(0.08268781833616298, "0.082688")]
    fn test_ratio(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(ratio(value, 6), expected);
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(40813, "40,813")]
    #[case(1234567, "1,234,567")]
    fn test_thousands(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(thousands(value), expected);
    }
}
