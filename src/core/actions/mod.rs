pub mod render_tiles;
