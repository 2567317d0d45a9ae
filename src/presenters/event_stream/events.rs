use serde::Serialize;

use crate::core::actions::render_tiles::ports::equation::ColourGrid;
use crate::core::data::tile::Tile;

pub const EVENT_PREFIX: &[u8] = b"data: ";
pub const EVENT_SUFFIX: &[u8] = b"\n\n";

/// Written verbatim as the last event of every stream.
pub const TERMINATE_EVENT: &str = "data: { \"terminate\" : true }\n\n";

/// One finished tile. `colours` travels with every tile so each event can be
/// drawn on its own.
#[derive(Debug, Serialize)]
pub struct TileEvent<'a> {
    pub x: u32,
    pub y: u32,
    pub data: &'a ColourGrid,
    pub colours: &'a [String],
}

impl<'a> TileEvent<'a> {
    #[must_use]
    pub fn new(tile: &Tile, grid: &'a ColourGrid, colours: &'a [String]) -> Self {
        Self {
            x: tile.x_offset,
            y: tile.y_offset,
            data: grid,
            colours,
        }
    }

    /// The complete frame: prefix, JSON body and blank-line terminator.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut frame = Vec::with_capacity(self.estimated_len());
        frame.extend_from_slice(EVENT_PREFIX);
        serde_json::to_writer(&mut frame, self)?;
        frame.extend_from_slice(EVENT_SUFFIX);
        Ok(frame)
    }

    fn estimated_len(&self) -> usize {
        let cells: usize = self.data.iter().map(Vec::len).sum();
        64 + cells * 2 + self.colours.len() * 12
    }
}
