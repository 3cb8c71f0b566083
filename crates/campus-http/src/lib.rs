//! HTTP transport for the campus collaboration API.
//!
//! [`HttpClient`] sends [`ApiRequest`]s through an [`ApiNetwork`] and
//! [`envelope::normalize`] turns the backend's `{code, msg, data}` responses
//! into a [`Normalized`] value or an [`ApiError`]. List payloads are decoded
//! once into a [`ListShape`].

pub mod client;
pub mod envelope;
pub mod error;
pub mod shape;
pub mod traits;
pub mod types;

pub use client::{HttpClient, HttpConfig, NativeNetwork};
pub use envelope::{Envelope, Normalized};
pub use error::{ApiError, Result};
pub use shape::{ListShape, Page, PagedList};
pub use traits::ApiNetwork;
pub use types::{ApiRequest, ApiResponse, FormField, RequestBody};
