use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;

use crate::controllers::config::ConfigController;
use crate::controllers::render::{RenderController, RenderRequest};
use crate::controllers::response::{Response, Status};
use crate::core::actions::render_tiles::render_tiles::RenderMode;
use crate::core::async_mediation::async_service::AsyncService;
use crate::core::data::canvas::Canvas;
use crate::core::registry::provider_registry::ProviderRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    NotFound(String),
    InvalidNumber { parameter: &'static str, value: String },
}

impl RouteError {
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound(_) => Status::NotFound,
            Self::InvalidNumber { .. } => Status::BadRequest,
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "No resource at {}", path),
            Self::InvalidNumber { parameter, value } => {
                write!(f, "Invalid value for {}: {}", parameter, value)
            }
        }
    }
}

impl Error for RouteError {}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Config,
    Render(RenderRequest),
}

/// Resolves a `GET` path to a route.
///
/// ```text
/// /rest/config
/// /rest/render/{sync|async}/{minX}/{maxX}/{minY}/{maxY}/{maxIterations}/{equation}/{colourScheme}
/// ```
pub fn resolve(path: &str) -> Result<Route, RouteError> {
    let not_found = || RouteError::NotFound(path.to_string());

    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .trim_end_matches('/')
        .split('/')
        .collect();

    match segments.as_slice() {
        ["rest", "config"] => Ok(Route::Config),
        [
            "rest",
            "render",
            mode,
            min_x,
            max_x,
            min_y,
            max_y,
            max_iterations,
            equation,
            colour_scheme,
        ] => {
            let mode = RenderMode::from_name(mode).ok_or_else(not_found)?;
            if equation.is_empty() || colour_scheme.is_empty() {
                return Err(not_found());
            }

            Ok(Route::Render(RenderRequest {
                mode,
                min_x: parse("minX", min_x)?,
                max_x: parse("maxX", max_x)?,
                min_y: parse("minY", min_y)?,
                max_y: parse("maxY", max_y)?,
                max_iterations: parse("maxIterations", max_iterations)?,
                equation: (*equation).to_string(),
                colour_scheme: (*colour_scheme).to_string(),
            }))
        }
        _ => Err(not_found()),
    }
}

fn parse<T: FromStr>(parameter: &'static str, value: &str) -> Result<T, RouteError> {
    value.parse().map_err(|_| RouteError::InvalidNumber {
        parameter,
        value: value.to_string(),
    })
}

pub struct Router {
    render: RenderController,
    config: ConfigController,
}

impl Router {
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>, async_service: AsyncService, canvas: Canvas) -> Self {
        Self {
            render: RenderController::new(Arc::clone(&registry), async_service, canvas),
            config: ConfigController::new(registry),
        }
    }

    pub fn route(&self, path: &str) -> Response {
        debug!("GET {}", path);

        match resolve(path) {
            Ok(Route::Config) => self.config.handle(),
            Ok(Route::Render(request)) => self.render.handle(&request),
            Err(err) => {
                debug!("{}", err);
                Response::text(err.status(), err.to_string())
            }
        }
    }
}
