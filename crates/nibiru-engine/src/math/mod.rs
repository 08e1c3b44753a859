//! Math types for the relative-to-center pipeline.
//!
//! Canonical CPU space:
//! - `f64` throughout; [`Mat4F`] is the only type that crosses the GPU boundary
//! - matrices are stored column-major
//! - right-handed; cameras look down `-forward`
//!
//! Narrowing to `f32` is an explicit one-way conversion ([`Vec3::to_f32`],
//! [`Mat4::to_f32`]), performed once per delivered value.

mod mat4;
mod mat4f;
mod vec3;

pub use mat4::Mat4;
pub use mat4f::Mat4F;
pub use vec3::Vec3;

/// Near-equality tolerance for `f64` geometric comparisons.
///
/// Absolute, not magnitude-scaled. Tight enough to catch real divergence,
/// loose enough that accumulated rounding in a normalize/cross chain does not
/// flag a unit vector as non-unit.
pub const EPSILON: f64 = 4.0 * f64::EPSILON;

/// Epsilon-tolerant equality for `f64` values.
///
/// NaN compares equal only to NaN so that comparisons stay symmetric.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    let diff = a - b;
    diff >= -EPSILON && diff <= EPSILON
}

/// Epsilon-tolerant zero test.
#[inline]
pub fn approx_zero(a: f64) -> bool {
    approx_eq(a, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_within_tolerance() {
        assert!(approx_eq(1.0, 1.0 + f64::EPSILON));
        assert!(!approx_eq(1.0, 1.0 + 1e-9));
    }

    #[test]
    fn approx_eq_nan_only_matches_nan() {
        assert!(approx_eq(f64::NAN, f64::NAN));
        assert!(!approx_eq(f64::NAN, 0.0));
        assert!(!approx_eq(0.0, f64::NAN));
    }

    #[test]
    fn approx_zero_catches_negligible_error() {
        assert!(approx_zero(f64::EPSILON));
        assert!(approx_zero(-f64::EPSILON));
        assert!(!approx_zero(1e-12));
    }
}
