use std::error::Error;
use std::fmt;

use crate::core::data::tile::Tile;

pub const CANVAS_WIDTH: u32 = 480;
pub const CANVAS_HEIGHT: u32 = 416;
pub const TILE_FACTOR: u32 = 8;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CanvasError {
    InvalidSize { width: u32, height: u32 },
    ZeroTileFactor,
    UnevenTiling { length: u32, tile_factor: u32 },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "canvas size must be positive: {}x{}", width, height)
            }
            Self::ZeroTileFactor => write!(f, "tile factor must be greater than zero"),
            Self::UnevenTiling {
                length,
                tile_factor,
            } => {
                write!(
                    f,
                    "canvas length {} is not divisible by tile factor {}",
                    length, tile_factor
                )
            }
        }
    }
}

impl Error for CanvasError {}

/// The fixed pixel grid a render job draws into, split into
/// `tile_factor × tile_factor` equally sized tiles.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    tile_factor: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32, tile_factor: u32) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidSize { width, height });
        }

        if tile_factor == 0 {
            return Err(CanvasError::ZeroTileFactor);
        }

        for length in [width, height] {
            if length % tile_factor != 0 {
                return Err(CanvasError::UnevenTiling {
                    length,
                    tile_factor,
                });
            }
        }

        Ok(Self {
            width,
            height,
            tile_factor,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn tile_factor(&self) -> u32 {
        self.tile_factor
    }

    #[must_use]
    pub fn block_width(&self) -> u32 {
        self.width / self.tile_factor
    }

    #[must_use]
    pub fn block_height(&self) -> u32 {
        self.height / self.tile_factor
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        (self.tile_factor * self.tile_factor) as usize
    }

    /// Every tile of the canvas in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.tile_factor).flat_map(move |y_index| {
            (0..self.tile_factor).map(move |x_index| {
                Tile::new(x_index, y_index, self.block_width(), self.block_height())
            })
        })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            tile_factor: TILE_FACTOR,
        }
    }
}
