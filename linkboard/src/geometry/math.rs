/// Angle of the vector from (x1,y1) to (x2,y2) in degrees, in -180..=180.
pub fn angle_degrees(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (y2 - y1).atan2(x2 - x1).to_degrees()
}

pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x1 - x2; let dy = y1 - y2;
    (dx*dx + dy*dy).sqrt()
}

/// Squared distance from (px,py) to segment (x1,y1)-(x2,y2), plus the clamped
/// parameter of the closest point.
pub fn seg_distance_sq(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32) {
    let vx = x2 - x1; let vy = y2 - y1;
    let wx = px - x1; let wy = py - y1;
    let vv = vx*vx + vy*vy;
    let t = if vv > 0.0 { ((wx*vx + wy*vy) / vv).clamp(0.0, 1.0) } else { 0.0 };
    let dx = px - (x1 + t * vx); let dy = py - (y1 + t * vy);
    (dx*dx + dy*dy, t)
}
