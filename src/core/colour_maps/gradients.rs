use crate::core::colour_maps::palette::{ColourMapError, Palette};
use crate::core::data::colour::Colour;

pub const DEFAULT_GRADIENT_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientKind {
    #[default]
    Fire,
    BlueWhite,
    Grey,
}

impl GradientKind {
    pub const ALL: &'static [Self] = &[Self::Fire, Self::BlueWhite, Self::Grey];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::BlueWhite => "blue-white",
            Self::Grey => "grey",
        }
    }

    /// Builds a palette of `length` colours sampled evenly along the
    /// gradient. Fire and blue-white end on black, the colour the
    /// equations give points that never escape.
    pub fn palette(self, length: usize) -> Result<Palette, ColourMapError> {
        if length == 0 {
            return Err(ColourMapError::EmptySpectrum);
        }

        let colours: Vec<Colour> = (0..length)
            .map(|index| {
                if length == 1 {
                    self.colour_at(0.0)
                } else {
                    self.colour_at(index as f64 / (length - 1) as f64)
                }
            })
            .collect();

        Palette::from_colours(&colours)
    }

    #[must_use]
    pub fn colour_at(self, t: f64) -> Colour {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Fire => fire(t),
            Self::BlueWhite => blue_white(t),
            Self::Grey => {
                let level = (t * 255.0).round() as u8;
                Colour {
                    r: level,
                    g: level,
                    b: level,
                }
            }
        }
    }
}

impl std::fmt::Display for GradientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).name())
    }
}

fn fire(t: f64) -> Colour {
    if t >= 1.0 {
        return Colour { r: 0, g: 0, b: 0 };
    }

    let (r, g, b) = if t < 0.25 {
        let local_t = t / 0.25;
        ((local_t * 255.0) as u8, 0, 0)
    } else if t < 0.5 {
        let local_t = (t - 0.25) / 0.25;
        (255, (local_t * 165.0) as u8, 0)
    } else if t < 0.75 {
        let local_t = (t - 0.5) / 0.25;
        (255, (165.0 + local_t * 90.0) as u8, 0)
    } else {
        let local_t = (t - 0.75) / 0.25;
        (255, 255, (local_t * 255.0) as u8)
    };

    Colour { r, g, b }
}

fn blue_white(t: f64) -> Colour {
    if t >= 1.0 {
        return Colour { r: 0, g: 0, b: 0 };
    }

    let r = (9.0 * (1.0 - t) * t * t * t * 255.0) as u8;
    let g = (15.0 * (1.0 - t) * (1.0 - t) * t * t * 255.0) as u8;
    let b = (8.5 * (1.0 - t) * (1.0 - t) * (1.0 - t) * t * 255.0) as u8;

    Colour { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::render_tiles::ports::colour_map::ColourMap;

    #[test]
    fn test_all_has_default_first() {
        assert_eq!(GradientKind::ALL.first(), Some(&GradientKind::default()));
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<&str> = GradientKind::ALL.iter().map(|k| k.name()).collect();
        for (i, name) in names.iter().enumerate() {
            for (j, other) in names.iter().enumerate() {
                if i != j {
                    assert_ne!(name, other, "Duplicate gradient name: {}", name);
                }
            }
        }
    }

    #[test]
    fn test_palette_has_requested_length() {
        for &kind in GradientKind::ALL {
            assert_eq!(kind.palette(32).unwrap().spectrum().len(), 32);
            assert_eq!(kind.palette(1).unwrap().spectrum().len(), 1);
        }
    }

    #[test]
    fn test_palette_rejects_zero_length() {
        assert_eq!(GradientKind::Fire.palette(0), Err(ColourMapError::EmptySpectrum));
    }

    #[test]
    fn test_fire_and_blue_white_end_on_black() {
        for kind in [GradientKind::Fire, GradientKind::BlueWhite] {
            let spectrum = kind.palette(16).unwrap().spectrum();
            assert_eq!(spectrum.last().map(String::as_str), Some("#000000"));
        }
    }

    #[test]
    fn test_grey_runs_black_to_white() {
        let spectrum = GradientKind::Grey.palette(3).unwrap().spectrum();

        assert_eq!(spectrum, vec!["#000000", "#808080", "#ffffff"]);
    }

    #[test]
    fn test_fire_quarter_points() {
        assert_eq!(GradientKind::Fire.colour_at(0.0), Colour { r: 0, g: 0, b: 0 });
        assert_eq!(GradientKind::Fire.colour_at(0.25), Colour { r: 255, g: 0, b: 0 });
        assert_eq!(GradientKind::Fire.colour_at(0.5), Colour { r: 255, g: 165, b: 0 });
    }

    #[test]
    fn test_blue_white_midpoint() {
        assert_eq!(
            GradientKind::BlueWhite.colour_at(0.5),
            Colour {
                r: 143,
                g: 239,
                b: 135
            }
        );
    }
}
