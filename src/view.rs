use crate::filter::{PropertyTab, SearchFilters};
use crate::language::{resolve_language, toggle_language, Language};
use crate::loader::{load_properties, FallbackMode, LoadOutcome};
use crate::models::Property;
use crate::sources::PropertySource;
use crate::state::{Liveness, ViewMode, ViewState};
use crate::store::KeyValueStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// The search page: owns the view state and the one background load
pub struct SearchView {
    state: Arc<RwLock<ViewState>>,
    store: Arc<dyn KeyValueStore>,
    liveness: Liveness,
    load: Option<JoinHandle<LoadOutcome>>,
}

impl SearchView {
    /// Resolve the language and start loading listings.
    ///
    /// Must be called inside a tokio runtime.
    pub fn mount(
        source: Arc<dyn PropertySource>,
        store: Arc<dyn KeyValueStore>,
        locale: Option<&str>,
        mode: FallbackMode,
    ) -> Self {
        let language = resolve_language(store.as_ref(), locale);
        info!("Mounting search view ({})", language);

        let state = Arc::new(RwLock::new(ViewState::new(language)));
        let liveness = Liveness::new();

        let load = {
            let state = state.clone();
            let liveness = liveness.clone();
            tokio::spawn(async move {
                load_properties(source.as_ref(), &state, &liveness, mode).await
            })
        };

        Self {
            state,
            store,
            liveness,
            load: Some(load),
        }
    }

    /// Wait for the initial load. Returns `None` if already awaited.
    pub async fn loaded(&mut self) -> Option<LoadOutcome> {
        let handle = self.load.take()?;
        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                debug!("Load task ended abnormally: {}", e);
                Some(LoadOutcome::Cancelled)
            }
        }
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.state.write().await.query = query.into();
    }

    pub async fn set_view_mode(&self, mode: ViewMode) {
        self.state.write().await.view_mode = mode;
    }

    pub async fn set_tab(&self, tab: Option<PropertyTab>) {
        self.state.write().await.tab = tab;
    }

    pub async fn set_filters(&self, filters: SearchFilters) {
        self.state.write().await.filters = filters;
    }

    /// Switch EN/FR and persist the choice
    pub async fn toggle_language(&self) -> Language {
        let mut state = self.state.write().await;
        state.language = toggle_language(self.store.as_ref(), state.language);
        state.language
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Listings matching the current query, tab and filters
    pub async fn filtered(&self) -> Vec<Property> {
        let state = self.state.read().await;
        state.filtered().into_iter().cloned().collect()
    }

    pub fn is_mounted(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Tear the page down. A load still in flight finishes but changes nothing.
    ///
    /// Returns that load's task, if it was never awaited.
    pub fn unmount(&mut self) -> Option<JoinHandle<LoadOutcome>> {
        debug!("Unmounting search view");
        self.liveness.revoke();
        self.load.take()
    }
}

impl Drop for SearchView {
    fn drop(&mut self) {
        self.liveness.revoke();
    }
}
