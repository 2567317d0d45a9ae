use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};

use crate::core::actions::render_tiles::ports::colour_map::ColourMap;
use crate::core::actions::render_tiles::ports::equation::{Equation, EquationError, TileRegion};
use crate::core::actions::render_tiles::ports::tile_event_sink::{TileEventSink, TransportError};
use crate::core::async_mediation::errors::AsyncError;
use crate::core::data::canvas::Canvas;
use crate::core::data::tile::Tile;
use crate::core::data::viewport::Viewport;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderMode {
    Sync,
    Async,
}

impl RenderMode {
    pub const ALL: &'static [Self] = &[Self::Sync, Self::Async];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|mode| mode.name() == name)
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).name())
    }
}

#[derive(Debug)]
pub enum RenderError {
    Compute(EquationError),
    Transport(TransportError),
    Async(AsyncError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compute(err) => write!(f, "tile computation failed: {}", err),
            Self::Transport(err) => write!(f, "{}", err),
            Self::Async(err) => write!(f, "async tile work failed: {}", err),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Compute(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Async(err) => Some(err),
        }
    }
}

impl From<EquationError> for RenderError {
    fn from(err: EquationError) -> Self {
        Self::Compute(err)
    }
}

impl From<TransportError> for RenderError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<AsyncError> for RenderError {
    /// Unwraps task failures back into the compute or transport error that
    /// caused them.
    fn from(err: AsyncError) -> Self {
        match err {
            AsyncError::Failed(failure) => match failure.downcast::<RenderError>() {
                Ok(render) => *render,
                Err(failure) => match failure.downcast::<EquationError>() {
                    Ok(compute) => Self::Compute(*compute),
                    Err(failure) => Self::Async(AsyncError::Failed(failure)),
                },
            },
            other => Self::Async(other),
        }
    }
}

/// Everything one render request needs, bound together.
pub struct RenderJob {
    pub viewport: Viewport,
    pub max_iterations: u32,
    pub equation: Arc<dyn Equation>,
    pub colour_map: Arc<dyn ColourMap>,
    pub canvas: Canvas,
}

impl RenderJob {
    /// The equation arguments for `tile`: its top-left pixel sits at
    /// `(min_x + x_offset·Δx, max_y − y_offset·Δy)`.
    #[must_use]
    pub fn tile_region(&self, tile: &Tile, colour_depth: u32) -> TileRegion {
        let delta_x = self.viewport.delta_x(self.canvas.width());
        let delta_y = self.viewport.delta_y(self.canvas.height());

        TileRegion {
            width: tile.width,
            height: tile.height,
            start_x: self.viewport.min_x() + f64::from(tile.x_offset) * delta_x,
            delta_x,
            start_y: self.viewport.max_y() - f64::from(tile.y_offset) * delta_y,
            delta_y,
            max_iterations: self.max_iterations,
            colour_depth,
        }
    }
}

pub trait TileRenderer: Send + Sync {
    /// Streams every tile of the job into `sink`, then the terminal event.
    /// The terminal event is attempted on every exit path.
    fn render(&self, sink: Arc<dyn TileEventSink>) -> Result<(), RenderError>;
}

/// How a renderer gets tiles computed and written.
pub(crate) trait TileDispatch {
    fn dispatch(&mut self, tile: Tile, region: TileRegion) -> Result<(), RenderError>;

    /// Blocks until every dispatched tile has been written or has failed.
    fn await_completion(&mut self) -> Result<(), RenderError>;
}

pub(crate) fn render_job<D: TileDispatch>(
    job: &RenderJob,
    mode: RenderMode,
    colour_depth: u32,
    dispatch: &mut D,
    sink: &dyn TileEventSink,
) -> Result<(), RenderError> {
    info!(
        "{} render: x [{}, {}], y [{}, {}], {} iterations, {} colours",
        mode,
        job.viewport.min_x(),
        job.viewport.max_x(),
        job.viewport.min_y(),
        job.viewport.max_y(),
        job.max_iterations,
        colour_depth
    );

    let start = Instant::now();
    let outcome = dispatch_tiles(job, colour_depth, dispatch);

    if let Err(err) = sink.write_terminate() {
        warn!("terminate event dropped: {}", err);
    }

    match &outcome {
        Ok(()) => info!(
            "{} render wrote {} tiles in {:?}",
            mode,
            job.canvas.tile_count(),
            start.elapsed()
        ),
        Err(err) => error!("{} render failed after {:?}: {}", mode, start.elapsed(), err),
    }

    outcome
}

fn dispatch_tiles<D: TileDispatch>(
    job: &RenderJob,
    colour_depth: u32,
    dispatch: &mut D,
) -> Result<(), RenderError> {
    for tile in job.canvas.tiles() {
        let region = job.tile_region(&tile, colour_depth);
        region.validate()?;
        dispatch.dispatch(tile, region)?;
    }

    dispatch.await_completion()
}

pub(crate) fn colour_depth(colours: &[String]) -> u32 {
    u32::try_from(colours.len()).unwrap_or(u32::MAX)
}
