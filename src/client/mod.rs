mod errors;
mod main;
mod types;

pub use errors::ApiError;
pub use main::{ApiClient, RefreshController};
pub use types::{ApiRequest, ApiResponse, MultipartField, RequestBody};
