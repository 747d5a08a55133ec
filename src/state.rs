use std::sync::Arc;

use crate::auth::AuthConfig;
use crate::store::ModelStore;

/// Shared application state: the gate's verification material and the
/// storage collaborator. Both are constructed once at startup and read-only
/// afterwards.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthConfig,
    pub store: Arc<dyn ModelStore>,
}
