use crate::core::actions::render_tiles::ports::equation::{
    ColourGrid, Equation, EquationDefaults, EquationError, TileRegion,
};
use crate::core::data::complex::Complex;
use crate::core::fractals::colour_index::colour_index;
use crate::core::fractals::escape_time::escape_time;

pub const JULIA: &str = "julia";

pub const DEFAULT_CONSTANT: Complex = Complex::new(-0.7, 0.27);

/// Julia set for a fixed constant `c`: each pixel is the starting `z`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JuliaEquation {
    constant: Complex,
}

impl JuliaEquation {
    #[must_use]
    pub fn new(constant: Complex) -> Self {
        Self { constant }
    }
}

impl Default for JuliaEquation {
    fn default() -> Self {
        Self::new(DEFAULT_CONSTANT)
    }
}

impl Equation for JuliaEquation {
    fn compute(&self, region: &TileRegion) -> Result<ColourGrid, EquationError> {
        region.validate()?;

        let grid = (0..region.width)
            .map(|x| {
                (0..region.height)
                    .map(|y| {
                        let iterations =
                            escape_time(region.point(x, y), self.constant, region.max_iterations);
                        colour_index(iterations, region.colour_depth, region.max_iterations, 0)
                    })
                    .collect()
            })
            .collect();

        Ok(grid)
    }

    fn defaults(&self) -> EquationDefaults {
        EquationDefaults {
            min_x: -1.6,
            max_x: 1.6,
            min_y: -1.2,
            max_y: 1.2,
            iterations: 200,
        }
    }
}
