pub mod canvas;
pub mod colour;
pub mod complex;
pub mod tile;
pub mod viewport;
