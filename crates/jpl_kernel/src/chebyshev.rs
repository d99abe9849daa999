//! Chebyshev series evaluation for SPK Type 2/3 records.
//!
//! Both functions run the Clenshaw recurrence from the highest coefficient
//! down. The rate variant differentiates the recurrence term by term so the
//! value and its derivative come out of a single pass over the coefficients.

/// Evaluate `sum(c_k * T_k(s))` for `s` in `[-1, 1]`.
pub fn chebyshev_value(coeffs: &[f64], s: f64) -> f64 {
    chebyshev_value_and_rate(coeffs, s).0
}

/// Evaluate `sum(c_k * T_k(s))` and its derivative with respect to `s`.
///
/// Recurrence, for `k = n-1 .. 1`:
/// ```text
/// b_k  = c_k + 2 s b_{k+1} - b_{k+2}
/// b_k' = 2 b_{k+1} + 2 s b_{k+1}' - b_{k+2}'
/// ```
/// then `f = c_0 + s b_1 - b_2` and `f' = b_1 + s b_1' - b_2'`.
///
/// The derivative is per unit of normalised time; SPK callers divide by the
/// record radius to get a rate per second.
pub fn chebyshev_value_and_rate(coeffs: &[f64], s: f64) -> (f64, f64) {
    let Some((&c0, rest)) = coeffs.split_first() else {
        return (0.0, 0.0);
    };

    let two_s = 2.0 * s;
    // (b_{k+1}, b_{k+2}) and their derivatives.
    let (mut b1, mut b2) = (0.0_f64, 0.0_f64);
    let (mut d1, mut d2) = (0.0_f64, 0.0_f64);

    for &c in rest.iter().rev() {
        let b = c + two_s * b1 - b2;
        let d = 2.0 * b1 + two_s * d1 - d2;
        b2 = b1;
        b1 = b;
        d2 = d1;
        d1 = d;
    }

    (c0 + s * b1 - b2, b1 + s * d1 - d2)
}
