//! Off-thread execution of equation calls.
//!
//! A target is wrapped with [`async_service::AsyncService::mediate`]; each
//! call made through the wrapper is scheduled on a bounded worker pool and
//! answered with a [`promise::Promise`]. Promises chain with
//! [`promise::Promise::then_apply`] and join with
//! [`async_service::AsyncService::all`].

pub mod async_service;
pub mod errors;
pub mod promise;
