pub mod events;
pub mod writer;
