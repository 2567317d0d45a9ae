use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::actions::render_tiles::ports::equation::{
    ColourGrid, Equation, EquationError, TileRegion,
};
use crate::core::actions::render_tiles::ports::tile_event_sink::{TileEventSink, TransportError};
use crate::core::data::tile::Tile;

/// Every cell gets the same colour index.
pub(crate) struct ConstantEquation(pub u32);

impl Equation for ConstantEquation {
    fn compute(&self, region: &TileRegion) -> Result<ColourGrid, EquationError> {
        Ok(vec![vec![self.0; region.height as usize]; region.width as usize])
    }
}

/// Colours every cell of a tile `(x_offset + y_offset) mod colour_depth`,
/// recovering the offsets from where the tile starts in the viewport.
pub(crate) struct OffsetEquation {
    pub min_x: f64,
    pub max_y: f64,
}

impl OffsetEquation {
    pub(crate) fn offsets(&self, region: &TileRegion) -> (u32, u32) {
        let x_offset = ((region.start_x - self.min_x) / region.delta_x).round() as u32;
        let y_offset = ((self.max_y - region.start_y) / region.delta_y).round() as u32;
        (x_offset, y_offset)
    }
}

impl Equation for OffsetEquation {
    fn compute(&self, region: &TileRegion) -> Result<ColourGrid, EquationError> {
        let (x_offset, y_offset) = self.offsets(region);
        let colour = (x_offset + y_offset) % region.colour_depth;
        Ok(vec![vec![colour; region.height as usize]; region.width as usize])
    }
}

/// Fails the `fail_on`-th call (counting from one); every other call
/// succeeds with colour zero.
pub(crate) struct FailingEquation {
    pub fail_on: usize,
    calls: AtomicUsize,
}

impl FailingEquation {
    pub(crate) fn new(fail_on: usize) -> Self {
        Self {
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Equation for FailingEquation {
    fn compute(&self, region: &TileRegion) -> Result<ColourGrid, EquationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if call == self.fail_on {
            return Err(EquationError::Failed(format!("call {} rejected", call)));
        }

        Ok(vec![vec![0; region.height as usize]; region.width as usize])
    }
}

/// Colour zero everywhere, counting how many tiles it was asked for.
#[derive(Default)]
pub(crate) struct CountingEquation {
    calls: AtomicUsize,
}

impl CountingEquation {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Equation for CountingEquation {
    fn compute(&self, region: &TileRegion) -> Result<ColourGrid, EquationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![vec![0; region.height as usize]; region.width as usize])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
    Tile {
        x: u32,
        y: u32,
        grid: ColourGrid,
        colours: Vec<String>,
    },
    Terminate,
}

/// Keeps every event it is handed, in arrival order.
#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<Recorded>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn tile_offsets(&self) -> Vec<(u32, u32)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Tile { x, y, .. } => Some((x, y)),
                Recorded::Terminate => None,
            })
            .collect()
    }

    pub(crate) fn distinct_tile_offsets(&self) -> HashSet<(u32, u32)> {
        self.tile_offsets().into_iter().collect()
    }
}

impl TileEventSink for RecordingSink {
    fn write_tile(
        &self,
        tile: &Tile,
        grid: &ColourGrid,
        colours: &[String],
    ) -> Result<(), TransportError> {
        self.events.lock().unwrap().push(Recorded::Tile {
            x: tile.x_offset,
            y: tile.y_offset,
            grid: grid.clone(),
            colours: colours.to_vec(),
        });
        Ok(())
    }

    fn write_terminate(&self) -> Result<(), TransportError> {
        self.events.lock().unwrap().push(Recorded::Terminate);
        Ok(())
    }
}

/// An in-memory byte stream that can be read back after being handed to a
/// writer that owns it.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Accepts `budget` bytes, then fails every write like a disconnected peer.
pub(crate) struct BrokenPipe {
    pub budget: usize,
    pub written: Vec<u8>,
}

impl BrokenPipe {
    pub(crate) fn after(budget: usize) -> Self {
        Self {
            budget,
            written: Vec::new(),
        }
    }
}

impl Write for BrokenPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.budget {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
