pub mod actions;
pub mod async_mediation;
pub mod colour_maps;
pub mod data;
pub mod fractals;
pub mod registry;
