use std::error::Error;
use std::fmt;

use serde::Serialize;

use crate::core::data::complex::Complex;

/// Colour indices of a tile, indexed `[x][y]`.
pub type ColourGrid = Vec<Vec<u32>>;

#[derive(Debug, Clone, PartialEq)]
pub enum EquationError {
    InvalidRegion {
        width: u32,
        height: u32,
        max_iterations: u32,
        colour_depth: u32,
    },
    GridSize {
        expected_width: u32,
        expected_height: u32,
        actual_width: usize,
    },
    ColourOutOfRange {
        x: usize,
        y: usize,
        value: u32,
        colour_depth: u32,
    },
    Failed(String),
}

impl fmt::Display for EquationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion {
                width,
                height,
                max_iterations,
                colour_depth,
            } => write!(
                f,
                "invalid tile region: {}x{} pixels, {} iterations, {} colours",
                width, height, max_iterations, colour_depth
            ),
            Self::GridSize {
                expected_width,
                expected_height,
                actual_width,
            } => write!(
                f,
                "equation returned a grid with {} columns, expected {}x{}",
                actual_width, expected_width, expected_height
            ),
            Self::ColourOutOfRange {
                x,
                y,
                value,
                colour_depth,
            } => write!(
                f,
                "colour index {} at [{}][{}] is outside a palette of {} colours",
                value, x, y, colour_depth
            ),
            Self::Failed(message) => write!(f, "equation failed: {}", message),
        }
    }
}

impl Error for EquationError {}

/// The sub-region of the complex plane covered by one tile, plus the
/// iteration budget and palette size to compute it with.
///
/// Pixel `[x][y]` sits at `(start_x + x·delta_x, start_y − y·delta_y)`:
/// `y` grows downward in image space while the imaginary part falls, so
/// `[0][0]` is the top-left corner of the tile.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileRegion {
    pub width: u32,
    pub height: u32,
    pub start_x: f64,
    pub delta_x: f64,
    pub start_y: f64,
    pub delta_y: f64,
    pub max_iterations: u32,
    pub colour_depth: u32,
}

impl TileRegion {
    #[must_use]
    pub fn point(&self, x: u32, y: u32) -> Complex {
        Complex::new(
            self.start_x + f64::from(x) * self.delta_x,
            self.start_y - f64::from(y) * self.delta_y,
        )
    }

    pub fn validate(&self) -> Result<(), EquationError> {
        if self.width == 0 || self.height == 0 || self.max_iterations == 0 || self.colour_depth == 0
        {
            return Err(EquationError::InvalidRegion {
                width: self.width,
                height: self.height,
                max_iterations: self.max_iterations,
                colour_depth: self.colour_depth,
            });
        }

        Ok(())
    }

    /// Checks a computed grid has `width` columns of `height` cells, each a
    /// valid palette index.
    pub fn check_grid(&self, grid: &ColourGrid) -> Result<(), EquationError> {
        let size_error = || EquationError::GridSize {
            expected_width: self.width,
            expected_height: self.height,
            actual_width: grid.len(),
        };

        if grid.len() != self.width as usize {
            return Err(size_error());
        }

        for (x, column) in grid.iter().enumerate() {
            if column.len() != self.height as usize {
                return Err(size_error());
            }

            if let Some((y, &value)) = column
                .iter()
                .enumerate()
                .find(|&(_, &value)| value >= self.colour_depth)
            {
                return Err(EquationError::ColourOutOfRange {
                    x,
                    y,
                    value,
                    colour_depth: self.colour_depth,
                });
            }
        }

        Ok(())
    }
}

/// The default viewport and iteration budget an equation advertises to
/// clients.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquationDefaults {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub iterations: u32,
}

impl Default for EquationDefaults {
    fn default() -> Self {
        Self {
            min_x: -2.0,
            max_x: 1.0,
            min_y: -1.3,
            max_y: 1.3,
            iterations: 100,
        }
    }
}

pub trait Equation: Send + Sync {
    fn compute(&self, region: &TileRegion) -> Result<ColourGrid, EquationError>;

    fn defaults(&self) -> EquationDefaults {
        EquationDefaults::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(width: u32, height: u32, colour_depth: u32) -> TileRegion {
        TileRegion {
            width,
            height,
            start_x: -1.0,
            delta_x: 0.5,
            start_y: 1.0,
            delta_y: 0.25,
            max_iterations: 10,
            colour_depth,
        }
    }

    #[test]
    fn test_point_inverts_the_imaginary_axis() {
        let region = region(4, 4, 3);

        assert_eq!(region.point(0, 0), Complex::new(-1.0, 1.0));
        assert_eq!(region.point(2, 0), Complex::new(0.0, 1.0));
        assert_eq!(region.point(0, 2), Complex::new(-1.0, 0.5));
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        assert!(region(0, 4, 3).validate().is_err());
        assert!(region(4, 0, 3).validate().is_err());
        assert!(region(4, 4, 0).validate().is_err());
        assert!(region(4, 4, 3).validate().is_ok());
    }

    #[test]
    fn test_check_grid_accepts_matching_grid() {
        let grid = vec![vec![0, 1, 2]; 2];

        assert_eq!(region(2, 3, 3).check_grid(&grid), Ok(()));
    }

    #[test]
    fn test_check_grid_rejects_wrong_shape() {
        let grid = vec![vec![0; 3]; 2];

        assert!(matches!(
            region(3, 3, 3).check_grid(&grid),
            Err(EquationError::GridSize { actual_width: 2, .. })
        ));
        assert!(matches!(
            region(2, 4, 3).check_grid(&grid),
            Err(EquationError::GridSize { .. })
        ));
    }

    #[test]
    fn test_check_grid_rejects_out_of_range_colour() {
        let grid = vec![vec![0, 0], vec![0, 3]];

        assert_eq!(
            region(2, 2, 3).check_grid(&grid),
            Err(EquationError::ColourOutOfRange {
                x: 1,
                y: 1,
                value: 3,
                colour_depth: 3
            })
        );
    }
}
