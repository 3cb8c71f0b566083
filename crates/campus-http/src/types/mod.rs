pub mod request;
pub mod response;

pub use request::{ApiRequest, FormField, RequestBody};
pub use response::ApiResponse;
