//! Numeric conversion utilities for argos-gui.
//!
//! These functions handle conversions between numeric types with explicit
//! handling of precision loss.

/// Convert usize to f64 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Convert f64 to f32 for drawing, saturating at the f32 range.
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_f32(value: f64) -> f32 {
    value.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32
}

/// Convert decimals to the `usize` egui expects.
pub fn decimals_to_usize(decimals: u32) -> usize {
    usize::try_from(decimals).unwrap_or(usize::MAX)
}
