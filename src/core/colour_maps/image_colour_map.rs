use image::RgbImage;

use crate::core::actions::render_tiles::ports::colour_map::ColourMap;
use crate::core::colour_maps::palette::{ColourMapError, Palette};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A palette taken from the top row of pixels of an image, one colour per
/// pixel, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageColourMap {
    palette: Palette,
}

impl ImageColourMap {
    pub fn from_image(image: &RgbImage) -> Result<Self, ColourMapError> {
        if image.height() == 0 {
            return Err(ColourMapError::EmptySpectrum);
        }

        let colours: Vec<String> = (0..image.width())
            .map(|x| encode_pixel(image.get_pixel(x, 0).0))
            .collect();

        Ok(Self {
            palette: Palette::new(colours)?,
        })
    }
}

impl ColourMap for ImageColourMap {
    fn spectrum(&self) -> Vec<String> {
        self.palette.spectrum()
    }
}

// Packs the pixel as 0xRRGGBB and emits one hex digit per nibble, high to
// low, so every colour keeps its leading zeros.
fn encode_pixel([r, g, b]: [u8; 3]) -> String {
    let packed = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
    let mut colour = String::with_capacity(7);
    colour.push('#');

    for shift in [20, 16, 12, 8, 4, 0] {
        let nibble = ((packed >> shift) & 0xF) as usize;
        colour.push(char::from(HEX_DIGITS[nibble]));
    }

    colour
}
