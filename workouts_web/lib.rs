mod auth;
mod error;
pub mod handlers;
mod http;

pub use auth::CurrentUser;
pub use error::ApiError;
pub use http::*;
