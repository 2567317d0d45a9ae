use std::sync::Arc;
use std::time::Duration;

use crate::core::colour_maps::gradients::{GradientKind, DEFAULT_GRADIENT_LENGTH};
use crate::core::colour_maps::palette::ColourMapError;
use crate::core::fractals::julia::equation::{JuliaEquation, JULIA};
use crate::core::fractals::mandelbrot::equation::{
    MandelbrotEquation, DEFAULT_COLUMN_LATENCY, MANDELBROT,
};
use crate::core::registry::provider_registry::ProviderRegistry;

/// How the built-in providers are set up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DefaultProviders {
    pub noise: bool,
    pub column_latency: Duration,
    pub gradient_length: usize,
}

impl Default for DefaultProviders {
    fn default() -> Self {
        Self {
            noise: true,
            column_latency: DEFAULT_COLUMN_LATENCY,
            gradient_length: DEFAULT_GRADIENT_LENGTH,
        }
    }
}

impl DefaultProviders {
    /// Registers the Mandelbrot and Julia equations and one colour map per
    /// [`GradientKind`]. Names already taken are left alone.
    pub fn install(&self, registry: &ProviderRegistry) -> Result<(), ColourMapError> {
        let mandelbrot = MandelbrotEquation::new()
            .with_noise(self.noise)
            .with_column_latency(self.column_latency);

        registry.add_equation(MANDELBROT, Arc::new(mandelbrot));
        registry.add_equation(JULIA, Arc::new(JuliaEquation::default()));

        for &kind in GradientKind::ALL {
            registry.add_colour_map(kind.name(), Arc::new(kind.palette(self.gradient_length)?));
        }

        Ok(())
    }
}
