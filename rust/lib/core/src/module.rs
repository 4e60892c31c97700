use axum::Router;

/// A resource module that contributes HTTP routes.
///
/// Each module (users, profile, posts) implements this trait. The binary
/// collects all modules and nests each router under `/api/{name}`.
pub trait Module: Send + Sync {
    /// Module name, used for logging and the route prefix.
    fn name(&self) -> &str;

    /// Return the module's routes, relative to `/api/{name}`.
    fn routes(&self) -> Router;
}
