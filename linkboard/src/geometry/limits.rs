// Numeric bounds for coordinates accepted from the input layer

pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 =  10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_size_bounds(w: f32) -> bool { w.is_finite() && w > 0.0 && w <= COORD_MAX }
