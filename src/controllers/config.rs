use std::sync::Arc;

use log::error;
use serde::Serialize;

use crate::controllers::response::{Response, Status};
use crate::core::actions::render_tiles::ports::equation::EquationDefaults;
use crate::core::registry::provider_registry::ProviderRegistry;

#[derive(Debug, Serialize)]
pub struct EquationEntry {
    #[serde(rename = "equation.type")]
    pub equation_type: String,
    #[serde(flatten)]
    pub defaults: EquationDefaults,
}

/// What a client needs to populate its form controls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    pub equations: Vec<EquationEntry>,
    pub colour_schemes: Vec<String>,
}

pub struct ConfigController {
    registry: Arc<ProviderRegistry>,
}

impl ConfigController {
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Equations and colour schemes, both in ascending name order.
    #[must_use]
    pub fn document(&self) -> ConfigDocument {
        let equations = self
            .registry
            .equations()
            .iter()
            .map(|(name, equation)| EquationEntry {
                equation_type: name.clone(),
                defaults: equation.defaults(),
            })
            .collect();

        ConfigDocument {
            equations,
            colour_schemes: self.registry.colour_scheme_names(),
        }
    }

    pub fn handle(&self) -> Response {
        match Response::json(&self.document()) {
            Ok(response) => response.with_header("Cache-Control", "no-cache"),
            Err(err) => {
                error!("could not encode config document: {}", err);
                Response::text(Status::InternalServerError, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour_maps::palette::Palette;
    use crate::core::fractals::julia::equation::JuliaEquation;
    use crate::core::fractals::mandelbrot::equation::MandelbrotEquation;
    use serde_json::{json, Value};

    fn registry() -> Arc<ProviderRegistry> {
        let registry = Arc::new(ProviderRegistry::new());
        registry.add_equation("mandelbrot", Arc::new(MandelbrotEquation::deterministic()));
        registry.add_equation("julia", Arc::new(JuliaEquation::default()));
        for (name, colour) in [("blue", "#00f"), ("red", "#f00"), ("green", "#0f0")] {
            registry.add_colour_map(name, Arc::new(Palette::new([colour]).unwrap()));
        }
        registry
    }

    #[test]
    fn test_config_lists_equations_and_colour_schemes() {
        let response = ConfigController::new(registry()).handle();

        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.content_type, "application/json");
        assert_eq!(response.header("Cache-Control"), Some("no-cache"));

        let document: Value = serde_json::from_str(response.text_body().unwrap()).unwrap();
        assert_eq!(
            document,
            json!({
                "equations": [
                    {
                        "equation.type": "julia",
                        "minX": -1.6,
                        "maxX": 1.6,
                        "minY": -1.2,
                        "maxY": 1.2,
                        "iterations": 200
                    },
                    {
                        "equation.type": "mandelbrot",
                        "minX": -2.0,
                        "maxX": 1.0,
                        "minY": -1.3,
                        "maxY": 1.3,
                        "iterations": 100
                    }
                ],
                "colourSchemes": ["blue", "green", "red"]
            })
        );
    }

    #[test]
    fn test_empty_registry_gives_empty_lists() {
        let document = ConfigController::new(Arc::new(ProviderRegistry::new())).document();

        assert!(document.equations.is_empty());
        assert!(document.colour_schemes.is_empty());
    }
}
