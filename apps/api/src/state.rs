use std::sync::Arc;

use crate::gateway::ModelGateway;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Requests are independent: there is no cache, no session store, and no
/// cross-request mutable state. The gateway handle is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    /// The model gateway. Trait object so tests can swap in a mock.
    pub gateway: Arc<dyn ModelGateway>,
}
