//! Client state layer for the DevConnector API.
//!
//! Action creators in [`creators`] call the API through [`ApiClient`] and
//! dispatch [`Action`]s into a [`Store`], whose reducers fold them into a
//! [`RootState`]. A renderer subscribes to the store and draws the state.
//!
//! ```ignore
//! let api = ApiClient::new("http://localhost:5000");
//! let store = Store::new();
//! creators::auth::login_user(&api, &store, input).await;
//! assert!(store.state().auth.is_authenticated);
//! ```

pub mod action;
pub mod api;
pub mod creators;
pub mod model;
pub mod reducer;
pub mod store;

pub use action::Action;
pub use api::{ApiClient, ApiError};
pub use reducer::{AuthState, PostState, ProfileState, RootState};
pub use store::{Store, SubscriptionId};
