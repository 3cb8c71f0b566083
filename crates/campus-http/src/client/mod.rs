//! Campus HTTP client implementation.

mod config;
mod fetch;
pub mod native_network;

pub use config::HttpConfig;
pub use fetch::HttpClient;
pub use native_network::{resolve_url, NativeNetwork};
