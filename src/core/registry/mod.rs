pub mod defaults;
pub mod provider_registry;
