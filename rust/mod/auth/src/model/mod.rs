mod session;
mod user;

pub use session::{Claims, TokenResponse};
pub use user::{PublicUser, User};
