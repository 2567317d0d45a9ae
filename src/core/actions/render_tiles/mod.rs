pub mod async_renderer;
pub mod ports;
pub mod render_tiles;
pub mod sync_renderer;
