use std::error::Error;
use std::fmt;
use std::io;

use crate::core::actions::render_tiles::ports::equation::ColourGrid;
use crate::core::data::tile::Tile;

#[derive(Debug)]
pub enum TransportError {
    Io(io::Error),
    Encode(serde_json::Error),
    Poisoned,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "event stream write failed: {}", err),
            Self::Encode(err) => write!(f, "event encoding failed: {}", err),
            Self::Poisoned => write!(f, "event stream lock poisoned"),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Poisoned => None,
        }
    }
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}

/// Receives finished tiles and the end-of-stream marker. Implementations
/// must keep each event whole when called from several threads at once.
pub trait TileEventSink: Send + Sync {
    fn write_tile(
        &self,
        tile: &Tile,
        grid: &ColourGrid,
        colours: &[String],
    ) -> Result<(), TransportError>;

    /// Writes the terminal event and closes the sink. Later writes are
    /// dropped.
    fn write_terminate(&self) -> Result<(), TransportError>;
}
