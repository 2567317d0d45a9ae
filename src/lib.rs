pub mod controllers;
pub mod core;
pub mod presenters;

#[cfg(test)]
mod test_support;

pub use crate::controllers::response::{Response, Status};
pub use crate::controllers::router::Router;
pub use crate::core::actions::render_tiles::render_tiles::{
    RenderError, RenderJob, RenderMode, TileRenderer,
};
pub use crate::core::async_mediation::async_service::{AsyncConfig, AsyncService};
pub use crate::core::data::canvas::Canvas;
pub use crate::core::registry::defaults::DefaultProviders;
pub use crate::core::registry::provider_registry::ProviderRegistry;
pub use crate::presenters::event_stream::writer::EventStreamWriter;
