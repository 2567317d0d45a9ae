use std::error::Error;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use log::{info, warn};

use crate::controllers::response::{Response, Status, StreamingBody};
use crate::core::actions::render_tiles::async_renderer::AsyncTileRenderer;
use crate::core::actions::render_tiles::render_tiles::{
    RenderError, RenderJob, RenderMode, TileRenderer,
};
use crate::core::actions::render_tiles::sync_renderer::SyncTileRenderer;
use crate::core::async_mediation::async_service::AsyncService;
use crate::core::data::canvas::Canvas;
use crate::core::data::viewport::{Viewport, ViewportError};
use crate::core::registry::provider_registry::ProviderRegistry;
use crate::presenters::event_stream::writer::EventStreamWriter;

/// The parameters of one render request, as they arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub mode: RenderMode,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub max_iterations: i32,
    pub equation: String,
    pub colour_scheme: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyRealRange,
    EmptyImaginaryRange,
    NonPositiveIterations,
    UnknownEquation(String),
    UnknownColourScheme(String),
    EmptyColourScheme(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRealRange => {
                write!(f, "The minimum x coordinate must be less than the maximum")
            }
            Self::EmptyImaginaryRange => {
                write!(f, "The minimum y coordinate must be less than the maximum")
            }
            Self::NonPositiveIterations => {
                write!(f, "There must be a positive number of iterations")
            }
            Self::UnknownEquation(name) => write!(f, "No matching equation for {}", name),
            Self::UnknownColourScheme(name) => write!(f, "No matching colour scheme for {}", name),
            Self::EmptyColourScheme(name) => write!(f, "Colour scheme {} has no colours", name),
        }
    }
}

impl Error for ValidationError {}

impl From<ViewportError> for ValidationError {
    fn from(err: ViewportError) -> Self {
        match err {
            ViewportError::EmptyRealRange { .. } => Self::EmptyRealRange,
            ViewportError::EmptyImaginaryRange { .. } => Self::EmptyImaginaryRange,
        }
    }
}

/// Binds render requests to registered providers and starts the matching
/// renderer.
pub struct RenderController {
    registry: Arc<ProviderRegistry>,
    async_service: AsyncService,
    canvas: Canvas,
}

impl RenderController {
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>, async_service: AsyncService, canvas: Canvas) -> Self {
        Self {
            registry,
            async_service,
            canvas,
        }
    }

    /// Checks the request in a fixed order (x range, y range, iterations,
    /// equation, colour scheme) and reports the first problem found. A colour
    /// scheme must have at least one colour.
    pub fn prepare(&self, request: &RenderRequest) -> Result<Box<dyn TileRenderer>, ValidationError> {
        let viewport = Viewport::new(request.min_x, request.max_x, request.min_y, request.max_y)?;

        let max_iterations = u32::try_from(request.max_iterations)
            .ok()
            .filter(|&iterations| iterations >= 1)
            .ok_or(ValidationError::NonPositiveIterations)?;

        let equation = self
            .registry
            .equation(&request.equation)
            .ok_or_else(|| ValidationError::UnknownEquation(request.equation.clone()))?;

        let colour_map = self
            .registry
            .colour_map(&request.colour_scheme)
            .ok_or_else(|| ValidationError::UnknownColourScheme(request.colour_scheme.clone()))?;

        if colour_map.spectrum().is_empty() {
            return Err(ValidationError::EmptyColourScheme(request.colour_scheme.clone()));
        }

        let job = RenderJob {
            viewport,
            max_iterations,
            equation,
            colour_map,
            canvas: self.canvas,
        };

        Ok(match request.mode {
            RenderMode::Sync => Box::new(SyncTileRenderer::new(job)),
            RenderMode::Async => Box::new(AsyncTileRenderer::new(job, self.async_service.clone())),
        })
    }

    pub fn handle(&self, request: &RenderRequest) -> Response {
        match self.prepare(request) {
            Ok(renderer) => {
                info!(
                    "accepted {} render of {} with colour scheme {}",
                    request.mode, request.equation, request.colour_scheme
                );
                Response::event_stream(Box::new(RenderStreamBody::new(renderer)))
            }
            Err(err) => {
                warn!("rejected render request: {}", err);
                Response::text(Status::BadRequest, err.to_string())
            }
        }
    }
}

/// Streams a prepared renderer's events into the response body.
pub struct RenderStreamBody {
    renderer: Box<dyn TileRenderer>,
}

impl RenderStreamBody {
    #[must_use]
    pub fn new(renderer: Box<dyn TileRenderer>) -> Self {
        Self { renderer }
    }
}

impl StreamingBody for RenderStreamBody {
    fn stream(self: Box<Self>, out: Box<dyn Write + Send>) -> Result<(), RenderError> {
        let writer = Arc::new(EventStreamWriter::new(out));
        self.renderer.render(writer)
    }
}
