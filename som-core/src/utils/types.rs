/// Alias to a scalar floating type.
///
/// NOTE: prototype weights are compared against a fixed 1e-10 tie tolerance, so `f32` is not
/// an option here.
pub type Float = f64;

/// Default tolerance used to treat two distances as equal.
pub const DISTANCE_TOLERANCE: Float = 1e-10;
