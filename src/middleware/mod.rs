pub mod auth;
pub mod response;

pub use auth::{require_auth, AuthRejection, RequestIdentity};
pub use response::{ApiResponse, ApiResult};
