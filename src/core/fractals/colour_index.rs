use rand::Rng;
use rand_distr::StandardNormal;

/// Maps an iteration count onto a palette index in `[0, colour_depth)`.
///
/// `noise` is added to `value` first; the sum is clamped to
/// `[0, max_possible]` and scaled so that `max_possible` lands on the last
/// colour.
#[must_use]
pub fn colour_index(value: u32, colour_depth: u32, max_possible: u32, noise: i64) -> u32 {
    let max_possible = i64::from(max_possible.max(1));
    let colour_depth = i64::from(colour_depth.max(1));

    let value = (i64::from(value) + noise).clamp(0, max_possible);
    let index = value * colour_depth / max_possible - 1;

    index.clamp(0, colour_depth - 1) as u32
}

/// Dithering noise: a centred Gaussian with standard deviation
/// `max_possible / 2`, truncated toward zero.
pub fn gaussian_noise<R: Rng + ?Sized>(rng: &mut R, max_possible: u32) -> i64 {
    let sample: f64 = rng.sample(StandardNormal);

    (sample / 2.0 * f64::from(max_possible)) as i64
}
