//! Angle math for turret aiming and enemy facing.

use std::f64::consts::PI;

/// Normalize an angle into (-PI, PI].
pub fn normalize_angle(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Move `current` a fraction `t` of the shortest signed arc toward `target`.
///
/// With t < 1 this is exponential smoothing: repeated application converges
/// on `target` without ever overshooting it.
pub fn lerp_angle(current: f64, target: f64, t: f64) -> f64 {
    current + normalize_angle(target - current) * t
}
