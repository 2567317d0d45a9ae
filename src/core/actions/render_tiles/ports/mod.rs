pub mod colour_map;
pub mod equation;
pub mod tile_event_sink;
