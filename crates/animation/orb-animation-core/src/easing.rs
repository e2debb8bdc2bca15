//! Scalar easing helpers shared by the phase machine and the smoothers.

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic ease-out: fast start, gentle landing. `t` is clamped to [0, 1].
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t1 = clamp01(t) - 1.0;
    t1 * t1 * t1 + 1.0
}

/// Clamp into [0, 1]; NaN maps to 0.
#[inline]
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Frame-rate independent exponential approach factor, `min(1, dt * rate)`.
#[inline]
pub fn approach_factor(dt: f64, rate: f64) -> f64 {
    (dt.max(0.0) * rate.max(0.0)).min(1.0)
}
