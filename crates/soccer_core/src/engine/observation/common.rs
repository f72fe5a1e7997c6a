//! Common Observation Utilities
//!
//! Numeric guards shared by observation and reward code.

use crate::engine::types::Vec3;

/// Below this length a vector has no usable direction.
pub const MIN_DIRECTION_NORM: f32 = 1e-3;

/// Normalize a vector to unit length
///
/// Returns zero for near-zero input (magnitude < 0.001) and for
/// non-finite input.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let mag = v.norm();
    if !mag.is_finite() || mag < MIN_DIRECTION_NORM {
        Vec3::zeros()
    } else {
        v / mag
    }
}
