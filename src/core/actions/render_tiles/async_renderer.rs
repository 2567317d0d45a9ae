use std::sync::Arc;

use crate::core::actions::render_tiles::ports::equation::{Equation, TileRegion};
use crate::core::actions::render_tiles::ports::tile_event_sink::TileEventSink;
use crate::core::actions::render_tiles::render_tiles::{
    colour_depth, render_job, RenderError, RenderJob, RenderMode, TileDispatch, TileRenderer,
};
use crate::core::async_mediation::async_service::{AsyncService, Mediated};
use crate::core::async_mediation::promise::Promise;
use crate::core::data::tile::Tile;

/// Computes tiles concurrently on the worker pool. Each tile is written as
/// soon as it is ready, so events arrive in completion order.
pub struct AsyncTileRenderer {
    job: RenderJob,
    service: AsyncService,
}

impl AsyncTileRenderer {
    #[must_use]
    pub fn new(job: RenderJob, service: AsyncService) -> Self {
        Self { job, service }
    }
}

impl TileRenderer for AsyncTileRenderer {
    fn render(&self, sink: Arc<dyn TileEventSink>) -> Result<(), RenderError> {
        let colours: Arc<[String]> = self.job.colour_map.spectrum().into();
        let depth = colour_depth(&colours);

        let mut dispatch = PooledDispatch {
            equation: self.service.mediate(Arc::clone(&self.job.equation)),
            service: &self.service,
            colours,
            sink: Arc::clone(&sink),
            pending: Vec::with_capacity(self.job.canvas.tile_count()),
        };

        render_job(&self.job, RenderMode::Async, depth, &mut dispatch, sink.as_ref())
    }
}

struct PooledDispatch<'a> {
    equation: Mediated<dyn Equation>,
    service: &'a AsyncService,
    colours: Arc<[String]>,
    sink: Arc<dyn TileEventSink>,
    pending: Vec<Promise<()>>,
}

impl TileDispatch for PooledDispatch<'_> {
    fn dispatch(&mut self, tile: Tile, region: TileRegion) -> Result<(), RenderError> {
        let sink = Arc::clone(&self.sink);
        let colours = Arc::clone(&self.colours);

        let written = self
            .equation
            .call(move |equation| equation.compute(&region))
            .then_apply(move |grid| -> Result<(), RenderError> {
                region.check_grid(&grid)?;
                sink.write_tile(&tile, &grid, &colours)?;
                Ok(())
            });

        self.pending.push(written);
        Ok(())
    }

    fn await_completion(&mut self) -> Result<(), RenderError> {
        let pending = std::mem::take(&mut self.pending);
        self.service.all(pending).wait()?;
        Ok(())
    }
}
