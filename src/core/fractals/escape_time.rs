use crate::core::data::complex::Complex;

pub const ESCAPE_RADIUS: f64 = 2.0;

/// Iterates `z := z² + c` from `start` and returns the iteration count at
/// which `|z|` first exceeded [`ESCAPE_RADIUS`], capped at `max_iterations`.
/// The count includes the step that detected the escape, so a point that
/// starts outside the radius reports 1.
#[must_use]
pub fn escape_time(start: Complex, c: Complex, max_iterations: u32) -> u32 {
    let mut z = start;
    let mut iterations = 0;

    loop {
        iterations += 1;

        if z.magnitude() > ESCAPE_RADIUS || iterations >= max_iterations {
            return iterations;
        }

        z = z.square().plus(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mandelbrot(c: Complex, max_iterations: u32) -> u32 {
        escape_time(c, c, max_iterations)
    }

    #[test]
    fn test_origin_never_escapes() {
        assert_eq!(mandelbrot(Complex::new(0.0, 0.0), 100), 100);
    }

    #[test]
    fn test_point_outside_radius_escapes_on_first_check() {
        assert_eq!(mandelbrot(Complex::new(3.0, 0.0), 100), 1);
    }

    #[test]
    fn test_radius_boundary_is_not_an_escape() {
        // 1 -> 2 -> 5: |2| is not greater than the radius, |5| is.
        assert_eq!(mandelbrot(Complex::new(1.0, 0.0), 100), 3);
    }

    #[test]
    fn test_single_iteration_budget() {
        assert_eq!(mandelbrot(Complex::new(0.0, 0.0), 1), 1);
    }

    #[test]
    fn test_julia_style_start_differs_from_constant() {
        let c = Complex::new(-0.7, 0.27);

        assert_eq!(escape_time(Complex::new(5.0, 5.0), c, 50), 1);
        assert!(escape_time(Complex::new(0.0, 0.0), c, 50) > 1);
    }
}
