use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::listings::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The board. Lives for the whole process and resets to the seed list on restart.
    pub jobs: Arc<JobStore>,
    /// Pluggable session source. Local or remote, chosen by `AUTH_MODE`.
    pub auth: Arc<dyn AuthProvider>,
}
