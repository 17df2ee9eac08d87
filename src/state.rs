use std::sync::Arc;

use crate::external::DataSource;
use crate::session::SessionGuard;

/// Shared wiring handed to every screen and service: the remote API seam and
/// the process-wide session state.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DataSource>,
    pub session: Arc<SessionGuard>,
}

impl AppState {
    pub fn new(source: Arc<dyn DataSource>, session: Arc<SessionGuard>) -> Self {
        Self { source, session }
    }
}
