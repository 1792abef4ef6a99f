use std::sync::Arc;

use tokio::sync::Mutex;

use crate::ats_client::AtsClient;
use crate::convert::DocumentConverter;
use crate::review::session::ReviewSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub ats: AtsClient,
    /// Pluggable document converter. Default: HttpDocumentConverter against
    /// CONVERT_URL. Swap the implementation without touching handlers.
    pub converter: Arc<dyn DocumentConverter>,
    /// The single active review session. Locked only for short state
    /// transitions, never across a capability call.
    pub session: Arc<Mutex<ReviewSession>>,
}
