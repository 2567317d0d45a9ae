use std::error::Error;
use std::fmt;

use crate::core::actions::render_tiles::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColourMapError {
    EmptySpectrum,
    InvalidColour { index: usize, colour: String },
}

impl fmt::Display for ColourMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpectrum => write!(f, "a colour map needs at least one colour"),
            Self::InvalidColour { index, colour } => {
                write!(
                    f,
                    "colour {} ({:?}) is not of the form #rgb or #rrggbb",
                    index, colour
                )
            }
        }
    }
}

impl Error for ColourMapError {}

/// A fixed, validated list of CSS colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colours: Vec<String>,
}

impl Palette {
    pub fn new<S: Into<String>>(
        colours: impl IntoIterator<Item = S>,
    ) -> Result<Self, ColourMapError> {
        let colours: Vec<String> = colours.into_iter().map(Into::into).collect();

        if colours.is_empty() {
            return Err(ColourMapError::EmptySpectrum);
        }

        if let Some((index, colour)) = colours
            .iter()
            .enumerate()
            .find(|(_, colour)| !is_css_hex(colour))
        {
            return Err(ColourMapError::InvalidColour {
                index,
                colour: colour.clone(),
            });
        }

        Ok(Self { colours })
    }

    pub fn from_colours(colours: &[Colour]) -> Result<Self, ColourMapError> {
        Self::new(colours.iter().map(|colour| colour.to_hex()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

impl ColourMap for Palette {
    fn spectrum(&self) -> Vec<String> {
        self.colours.clone()
    }
}

fn is_css_hex(colour: &str) -> bool {
    match colour.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_short_and_long_hex() {
        let palette = Palette::new(["#000", "#888", "#fff", "#12ab9F"]).unwrap();

        assert_eq!(palette.len(), 4);
    }

    #[test]
    fn test_rejects_empty_spectrum() {
        assert_eq!(
            Palette::new(Vec::<String>::new()),
            Err(ColourMapError::EmptySpectrum)
        );
    }

    #[test]
    fn test_rejects_malformed_colours() {
        for bad in ["red", "#12", "#1234", "#gggggg", "123456", "#１２３"] {
            let result = Palette::new(["#000", bad]);

            assert_eq!(
                result,
                Err(ColourMapError::InvalidColour {
                    index: 1,
                    colour: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn test_spectrum_returns_independent_copies() {
        let palette = Palette::new(["#000", "#fff"]).unwrap();

        let mut first = palette.spectrum();
        first[0] = "#f00".to_string();
        first.push("#0f0".to_string());

        assert_eq!(palette.spectrum(), vec!["#000", "#fff"]);
    }

    #[test]
    fn test_from_colours() {
        let palette = Palette::from_colours(&[
            Colour { r: 255, g: 0, b: 0 },
            Colour { r: 0, g: 0, b: 16 },
        ])
        .unwrap();

        assert_eq!(palette.spectrum(), vec!["#ff0000", "#000010"]);
    }
}
