use std::thread;
use std::time::Duration;

use crate::core::actions::render_tiles::ports::equation::{
    ColourGrid, Equation, EquationDefaults, EquationError, TileRegion,
};
use crate::core::fractals::colour_index::{colour_index, gaussian_noise};
use crate::core::fractals::escape_time::escape_time;

pub const MANDELBROT: &str = "mandelbrot";

/// Sleep per computed column, so tiles take long enough for async rendering
/// to visibly beat sync rendering.
pub const DEFAULT_COLUMN_LATENCY: Duration = Duration::from_millis(5);

/// The reference escape-time equation. By default it dithers colour indices
/// with Gaussian noise and sleeps [`DEFAULT_COLUMN_LATENCY`] per column;
/// both can be switched off for reproducible output.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MandelbrotEquation {
    noise: bool,
    column_latency: Duration,
}

impl MandelbrotEquation {
    #[must_use]
    pub fn new() -> Self {
        Self {
            noise: true,
            column_latency: DEFAULT_COLUMN_LATENCY,
        }
    }

    /// No noise and no latency.
    #[must_use]
    pub fn deterministic() -> Self {
        Self::new()
            .with_noise(false)
            .with_column_latency(Duration::ZERO)
    }

    #[must_use]
    pub fn with_noise(mut self, noise: bool) -> Self {
        self.noise = noise;
        self
    }

    #[must_use]
    pub fn with_column_latency(mut self, column_latency: Duration) -> Self {
        self.column_latency = column_latency;
        self
    }

    #[must_use]
    pub fn noise(&self) -> bool {
        self.noise
    }

    #[must_use]
    pub fn column_latency(&self) -> Duration {
        self.column_latency
    }
}

impl Default for MandelbrotEquation {
    fn default() -> Self {
        Self::new()
    }
}

impl Equation for MandelbrotEquation {
    fn compute(&self, region: &TileRegion) -> Result<ColourGrid, EquationError> {
        region.validate()?;

        let mut rng = rand::thread_rng();

        let grid = (0..region.width)
            .map(|x| {
                if !self.column_latency.is_zero() {
                    thread::sleep(self.column_latency);
                }

                (0..region.height)
                    .map(|y| {
                        let c = region.point(x, y);
                        let iterations = escape_time(c, c, region.max_iterations);
                        let noise = if self.noise {
                            gaussian_noise(&mut rng, region.max_iterations)
                        } else {
                            0
                        };

                        colour_index(iterations, region.colour_depth, region.max_iterations, noise)
                    })
                    .collect()
            })
            .collect();

        Ok(grid)
    }

    fn defaults(&self) -> EquationDefaults {
        EquationDefaults {
            min_x: -2.0,
            max_x: 1.0,
            min_y: -1.3,
            max_y: 1.3,
            iterations: 100,
        }
    }
}
