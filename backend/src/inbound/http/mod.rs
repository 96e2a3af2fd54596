//! HTTP inbound adapter exposing REST endpoints.

pub mod app;
pub mod envelope;
pub mod error;
pub mod health;
pub mod login;
pub mod openapi;
pub mod state;
pub mod validation;

pub use app::{build_app, configure};
pub use error::ApiResult;
pub use state::HttpState;
