//! Pointer-to-angle helpers shared by the disc and the knobs.
//!
//! All angles are degrees measured counter-clockwise from +X with +Y up, the
//! convention `atan2` produces. Front ends with a y-down screen space must
//! flip the Y axis before handing positions in.

use glam::Vec2;

/// Angle of `pointer` around `origin`, in (−180, 180].
///
/// Returns `None` when the pointer sits exactly on the origin, where `atan2`
/// has no meaningful answer. Callers skip the sample in that case.
pub fn pointer_angle(pointer: Vec2, origin: Vec2) -> Option<f32> {
    let d = pointer - origin;
    if d == Vec2::ZERO || !d.is_finite() {
        return None;
    }
    Some(d.y.atan2(d.x).to_degrees())
}

/// Shortest signed rotation from `previous` to `current`, in (−180, 180].
///
/// Plain subtraction breaks at the ±180° seam; every rotation amount in the
/// crate goes through here. Non-finite input yields 0.
pub fn angle_delta(previous: f32, current: f32) -> f32 {
    let delta = current - previous;
    if !delta.is_finite() {
        return 0.0;
    }
    let mut wrapped = wrap_to_360(delta);
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Map any finite angle to [0, 360).
pub fn wrap_to_360(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Whether a wrapped angle lies strictly inside the open band `(start, end)`.
pub fn in_open_band(angle: f32, start: f32, end: f32) -> bool {
    let a = wrap_to_360(angle);
    a > start && a < end
}
