//! Endpoint wrappers, one module per backend resource.
//!
//! Every wrapper goes through [`ApiClient`], so the bearer token, envelope
//! normalization, failure notices and the 401 logout apply uniformly.

pub mod auth;
pub mod conversation;
pub mod cooperation;
pub mod post;
pub mod project;
pub mod request;
pub mod tag;

pub use request::ApiClient;
