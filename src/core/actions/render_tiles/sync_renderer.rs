use std::sync::Arc;

use crate::core::actions::render_tiles::ports::equation::{Equation, TileRegion};
use crate::core::actions::render_tiles::ports::tile_event_sink::TileEventSink;
use crate::core::actions::render_tiles::render_tiles::{
    colour_depth, render_job, RenderError, RenderJob, RenderMode, TileDispatch, TileRenderer,
};
use crate::core::data::tile::Tile;

/// Computes and writes each tile on the calling thread, in row-major order.
pub struct SyncTileRenderer {
    job: RenderJob,
}

impl SyncTileRenderer {
    #[must_use]
    pub fn new(job: RenderJob) -> Self {
        Self { job }
    }
}

impl TileRenderer for SyncTileRenderer {
    fn render(&self, sink: Arc<dyn TileEventSink>) -> Result<(), RenderError> {
        let colours = self.job.colour_map.spectrum();
        let depth = colour_depth(&colours);

        let mut dispatch = InlineDispatch {
            equation: self.job.equation.as_ref(),
            colours: &colours,
            sink: sink.as_ref(),
        };

        render_job(&self.job, RenderMode::Sync, depth, &mut dispatch, sink.as_ref())
    }
}

struct InlineDispatch<'a> {
    equation: &'a dyn Equation,
    colours: &'a [String],
    sink: &'a dyn TileEventSink,
}

impl TileDispatch for InlineDispatch<'_> {
    fn dispatch(&mut self, tile: Tile, region: TileRegion) -> Result<(), RenderError> {
        let grid = self.equation.compute(&region)?;
        region.check_grid(&grid)?;
        self.sink.write_tile(&tile, &grid, self.colours)?;
        Ok(())
    }

    fn await_completion(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}
