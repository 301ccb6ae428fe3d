// Centralized tolerances for geometry comparisons

pub const EPS_POS: f32 = 1e-4;      // point coincidence threshold (px)
pub const EPS_LEN: f32 = 1e-3;      // edge length compare slack (px)
pub const EPS_ANG_DEG: f32 = 1e-2;  // angle compare slack (degrees)

#[inline] pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool { (a - b).abs() <= eps }

/// Compare two angles in degrees, treating -180 and 180 as the same direction.
#[inline]
pub fn angle_eq(a: f32, b: f32, eps: f32) -> bool {
    let d = (a - b).rem_euclid(360.0);
    d <= eps || 360.0 - d <= eps
}
