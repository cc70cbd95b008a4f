use std::sync::Arc;
use std::time::Duration;

use overview_core::{
    AnalysisDispatcher, CriteriaSet, FetchConfig, ModelCatalog, ModelClient, ReadinessChecker, TextGenerator, UsageTally,
};

use crate::session::SessionRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub dispatcher: Arc<AnalysisDispatcher>,
    pub catalog: Arc<ModelCatalog>,
    pub checker: Arc<ReadinessChecker>,
    pub fetch: Arc<FetchConfig>,
    pub usage: Arc<UsageTally>,
}

impl AppState {
    /// Every session's client talks to `backend`; one tally counts them all.
    pub fn new(backend: Arc<dyn TextGenerator>, criteria: CriteriaSet, fetch: FetchConfig, session_idle: Duration) -> Self {
        let usage = Arc::new(UsageTally::new());
        let catalog = ModelCatalog::default();
        let client = ModelClient::new(backend).with_hook(usage.clone());
        let sessions = SessionRegistry::new(client, catalog.default_selection(), session_idle);

        Self {
            sessions: Arc::new(sessions),
            dispatcher: Arc::new(AnalysisDispatcher::new(criteria)),
            catalog: Arc::new(catalog),
            checker: Arc::new(ReadinessChecker::default()),
            fetch: Arc::new(fetch),
            usage,
        }
    }
}
