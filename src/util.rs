use std::cmp::Ordering;

/// Fixed-point scale for time and bpm values. Four decimal digits, which is also the equality tolerance.
pub const TIME_SCALE: f64 = 10_000.0;

/// Index of the 1e-4 grid cell nearest to `x`.
/// Equality, hashing, ordering and the wire value of every time all derive from this one number.
pub fn quantize_ticks(x: f64) -> i64 {
    (x * TIME_SCALE).round() as i64
}

/// Rounds `x` to 4 decimal digits.
pub fn quantize(x: f64) -> f64 {
    (x * TIME_SCALE).round() / TIME_SCALE
}

pub fn approx_eq(x: f64, y: f64) -> bool {
    quantize_ticks(x) == quantize_ticks(y)
}

pub fn approx_cmp(x: f64, y: f64) -> Ordering {
    quantize_ticks(x).cmp(&quantize_ticks(y))
}
