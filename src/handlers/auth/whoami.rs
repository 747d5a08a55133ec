// handlers/auth/whoami.rs - GET /api/auth/whoami handler

use axum::Extension;
use serde::Serialize;

use crate::auth::UserInfo;
use crate::middleware::{ApiResponse, ApiResult, RequestIdentity};

#[derive(Debug, Serialize)]
pub struct WhoamiData {
    pub user: Option<UserInfo>,
}

/// GET /api/auth/whoami - echo the identity the access gate attached.
///
/// `user` is null for tokens the identity authority issued without a
/// `UserInfo` payload; reaching this handler at all means the credential
/// itself verified.
pub async fn whoami_get(Extension(identity): Extension<RequestIdentity>) -> ApiResult<WhoamiData> {
    Ok(ApiResponse::success(WhoamiData {
        user: identity.user,
    }))
}
