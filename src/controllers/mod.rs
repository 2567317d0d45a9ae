//! Request handling: path routing, validation against the provider registry
//! and the responses handed back to the transport.

pub mod config;
pub mod render;
pub mod response;
pub mod router;
