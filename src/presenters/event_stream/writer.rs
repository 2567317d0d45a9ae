use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use log::debug;

use crate::core::actions::render_tiles::ports::equation::ColourGrid;
use crate::core::actions::render_tiles::ports::tile_event_sink::{TileEventSink, TransportError};
use crate::core::data::tile::Tile;
use crate::presenters::event_stream::events::{TileEvent, TERMINATE_EVENT};

struct StreamState<W> {
    out: W,
    broken: bool,
    closed: bool,
}

/// Frames tile events onto a byte stream. One lock covers each whole event,
/// so concurrent writers never interleave inside a frame.
///
/// After the first failed write the stream is considered broken and every
/// later event is dropped; the same happens after the terminal event.
pub struct EventStreamWriter<W: Write + Send> {
    state: Mutex<StreamState<W>>,
}

impl<W: Write + Send> EventStreamWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(StreamState {
                out,
                broken: false,
                closed: false,
            }),
        }
    }

    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.state.lock().map(|state| state.broken).unwrap_or(true)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().map(|state| state.closed).unwrap_or(true)
    }

    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }

    fn write_frame(&self, frame: &[u8], closing: bool) -> Result<(), TransportError> {
        let mut state = self.state.lock().map_err(|_| TransportError::Poisoned)?;

        if state.broken || state.closed {
            debug!("dropping {} byte event on a finished stream", frame.len());
            return Ok(());
        }

        if closing {
            state.closed = true;
        }

        if let Err(err) = emit(&mut state.out, frame) {
            state.broken = true;
            return Err(err.into());
        }

        Ok(())
    }
}

fn emit<W: Write>(out: &mut W, frame: &[u8]) -> io::Result<()> {
    out.write_all(frame)?;
    out.flush()
}

impl<W: Write + Send> TileEventSink for EventStreamWriter<W> {
    fn write_tile(
        &self,
        tile: &Tile,
        grid: &ColourGrid,
        colours: &[String],
    ) -> Result<(), TransportError> {
        let frame = TileEvent::new(tile, grid, colours).encode()?;
        self.write_frame(&frame, false)
    }

    fn write_terminate(&self) -> Result<(), TransportError> {
        self.write_frame(TERMINATE_EVENT.as_bytes(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenters::event_stream::events::decode::{decode_stream, tiles, Decoded};
    use crate::test_support::{BrokenPipe, SharedBuffer};
    use std::sync::Arc;
    use std::thread;

    fn colours() -> Vec<String> {
        vec!["#000".to_string(), "#fff".to_string()]
    }

    #[test]
    fn test_tile_then_terminate() {
        let writer = EventStreamWriter::new(Vec::new());
        let grid = vec![vec![1, 0]; 2];

        writer.write_tile(&Tile::new(0, 0, 2, 2), &grid, &colours()).unwrap();
        writer.write_terminate().unwrap();

        let events = decode_stream(&String::from_utf8(writer.into_inner()).unwrap());
        assert_eq!(events.len(), 2);
        assert_eq!(tiles(&events)[0].data, grid);
        assert_eq!(events[1], Decoded::Terminate);
    }

    #[test]
    fn test_writes_after_terminate_are_dropped() {
        let writer = EventStreamWriter::new(Vec::new());
        writer.write_terminate().unwrap();

        writer
            .write_tile(&Tile::new(0, 0, 1, 1), &vec![vec![0]], &colours())
            .unwrap();
        writer.write_terminate().unwrap();

        assert!(writer.is_closed());
        assert_eq!(String::from_utf8(writer.into_inner()).unwrap(), TERMINATE_EVENT);
    }

    #[test]
    fn test_first_failure_breaks_the_stream() {
        let writer = EventStreamWriter::new(BrokenPipe::after(10));
        let grid = vec![vec![0; 4]; 4];

        let first = writer.write_tile(&Tile::new(0, 0, 4, 4), &grid, &colours());
        assert!(matches!(first, Err(TransportError::Io(_))));
        assert!(writer.is_broken());

        writer.write_tile(&Tile::new(1, 0, 4, 4), &grid, &colours()).unwrap();
        writer.write_terminate().unwrap();
    }

    #[test]
    fn test_concurrent_writers_never_interleave_frames() {
        let buffer = SharedBuffer::default();
        let writer = Arc::new(EventStreamWriter::new(buffer.clone()));
        let grid = vec![vec![1; 52]; 60];

        let handles: Vec<_> = (0..8)
            .map(|x_index| {
                let writer = Arc::clone(&writer);
                let grid = grid.clone();
                thread::spawn(move || {
                    for y_index in 0..8 {
                        writer
                            .write_tile(&Tile::new(x_index, y_index, 60, 52), &grid, &colours())
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        writer.write_terminate().unwrap();

        let events = decode_stream(&buffer.contents());
        assert_eq!(events.len(), 65);
        assert_eq!(tiles(&events).len(), 64);
        assert_eq!(events.last(), Some(&Decoded::Terminate));
    }
}
