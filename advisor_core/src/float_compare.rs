//! Float Comparison Module
//!
//! Shared epsilon comparisons for capability indices and percentage deltas.

/// Epsilon for f64 comparisons (1e-6)
pub const F64_EPSILON: f64 = 1e-6;

/// Check if two f64 values are approximately equal
#[inline]
pub fn approx_eq_f64(a: f64, b: f64) -> bool {
    (a - b).abs() < F64_EPSILON
}

/// Check if an f64 value is approximately zero
#[inline]
pub fn approx_zero_f64(a: f64) -> bool {
    a.abs() < F64_EPSILON
}

/// Relative change from `from` to `to` in percent.
///
/// Returns 0.0 when `from` is approximately zero.
#[inline]
pub fn percent_change(from: f64, to: f64) -> f64 {
    if approx_zero_f64(from) {
        return 0.0;
    }
    (to - from) / from * 100.0
}

// ============================================================================
// Tests
// ============================================================================
