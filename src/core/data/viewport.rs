use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    EmptyRealRange { min_x: f64, max_x: f64 },
    EmptyImaginaryRange { min_y: f64, max_y: f64 },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRealRange { .. } => {
                write!(f, "The minimum x coordinate must be less than the maximum")
            }
            Self::EmptyImaginaryRange { .. } => {
                write!(f, "The minimum y coordinate must be less than the maximum")
            }
        }
    }
}

impl Error for ViewportError {}

/// The rectangle of the complex plane mapped onto the canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Viewport {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self, ViewportError> {
        // Written as negated comparisons so NaN bounds are rejected too.
        if !(min_x < max_x) {
            return Err(ViewportError::EmptyRealRange { min_x, max_x });
        }

        if !(min_y < max_y) {
            return Err(ViewportError::EmptyImaginaryRange { min_y, max_y });
        }

        Ok(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Real-axis distance between horizontally adjacent pixels.
    #[must_use]
    pub fn delta_x(&self, canvas_width: u32) -> f64 {
        self.width() / f64::from(canvas_width)
    }

    /// Imaginary-axis distance between vertically adjacent pixels.
    #[must_use]
    pub fn delta_y(&self, canvas_height: u32) -> f64 {
        self.height() / f64::from(canvas_height)
    }
}
