//! DevConnector server: configuration, startup checks and routing.

pub mod bootstrap;
pub mod config;
pub mod routes;

pub use routes::{build_app, build_modules, build_router};
