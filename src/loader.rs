use crate::models::Property;
use crate::sources::{fallback_properties, PropertySource};
use crate::state::{Liveness, ViewState};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// What to do with the sample listings when the API answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackMode {
    /// Show only what the API returned
    #[default]
    Replace,
    /// Append the samples after the fetched listings
    Merge,
}

/// How a load finished
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Fetched { accepted: usize },
    Fallback { reason: String },
    /// The page was torn down before the response arrived
    Cancelled,
}

/// Normalise a listings response body.
///
/// Accepts `{ "results": [...] }` or a bare array. Any other shape yields
/// no listings. Inside an accepted list, only entries that are not objects
/// or carry no integer `id` are dropped; every other field is optional.
pub fn accept_response(body: Value) -> Vec<Property> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                debug!("Response object has no results list");
                return Vec::new();
            }
        },
        other => {
            debug!("Unexpected response shape: {}", kind(&other));
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match Property::deserialize(&item) {
            Ok(property) => Some(property),
            Err(e) => {
                warn!("Skipping {} entry without a listing id: {}", kind(&item), e);
                None
            }
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Run the one-shot listings load into `state`.
///
/// `loading` is raised before the request goes out and lowered once it
/// resolves. Nothing is written after `liveness` has been revoked; the
/// request itself keeps running. There is no retry.
pub async fn load_properties(
    source: &dyn PropertySource,
    state: &RwLock<ViewState>,
    liveness: &Liveness,
    mode: FallbackMode,
) -> LoadOutcome {
    if !liveness.is_alive() {
        return LoadOutcome::Cancelled;
    }
    state.write().await.loading = true;

    let result = source.fetch().await;

    // hold the lock across the check so a concurrent teardown can't interleave
    let mut view = state.write().await;
    if !liveness.is_alive() {
        debug!("Discarding {} response after teardown", source.source_name());
        return LoadOutcome::Cancelled;
    }

    let outcome = match result {
        Ok(body) => {
            let mut properties = accept_response(body);
            let accepted = properties.len();
            info!("Loaded {} listings from {}", accepted, source.source_name());
            if mode == FallbackMode::Merge {
                properties.extend(fallback_properties());
            }
            view.properties = properties;
            view.notice = None;
            LoadOutcome::Fetched { accepted }
        }
        Err(e) => {
            warn!("Could not load listings from {}: {}", source.source_name(), e);
            info!("Using sample listings instead");
            view.properties = fallback_properties();
            view.notice = Some(e.to_string());
            LoadOutcome::Fallback {
                reason: e.to_string(),
            }
        }
    };
    view.loading = false;

    outcome
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::LoadError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tokio::sync::{oneshot, Notify};

    pub(crate) struct StaticSource(pub Value);

    #[async_trait]
    impl PropertySource for StaticSource {
        async fn fetch(&self) -> Result<Value, LoadError> {
            Ok(self.0.clone())
        }

        fn source_name(&self) -> &'static str {
            "static"
        }
    }

    pub(crate) struct FailingSource;

    #[async_trait]
    impl PropertySource for FailingSource {
        async fn fetch(&self) -> Result<Value, LoadError> {
            Err(LoadError::Other("connection refused".to_string()))
        }

        fn source_name(&self) -> &'static str {
            "failing"
        }
    }

    /// Resolves only when the test sends a response
    pub(crate) struct GatedSource {
        pub started: Arc<Notify>,
        response: Mutex<Option<oneshot::Receiver<Result<Value, LoadError>>>>,
    }

    impl GatedSource {
        pub fn new() -> (Self, oneshot::Sender<Result<Value, LoadError>>) {
            let (tx, rx) = oneshot::channel();
            let source = Self {
                started: Arc::new(Notify::new()),
                response: Mutex::new(Some(rx)),
            };
            (source, tx)
        }
    }

    #[async_trait]
    impl PropertySource for GatedSource {
        async fn fetch(&self) -> Result<Value, LoadError> {
            let rx = self
                .response
                .lock()
                .unwrap()
                .take()
                .expect("fetched more than once");
            self.started.notify_one();
            rx.await
                .unwrap_or_else(|_| Err(LoadError::Other("gate dropped".to_string())))
        }

        fn source_name(&self) -> &'static str {
            "gated"
        }
    }

    fn sea_view() -> Value {
        json!({
            "id": 5,
            "title": "Sea View Flat",
            "slug": "sea-view-flat",
            "price": 300000,
            "listing_type": "rent",
            "area": {"name": "Douala, Cameroon"},
            "no_of_bedrooms": 2,
            "no_of_bathrooms": 1,
            "description": "",
            "created_at": "2025-09-01"
        })
    }

    fn ids(properties: &[Property]) -> Vec<i64> {
        properties.iter().map(|p| p.id).collect()
    }

    #[test]
    fn accepts_envelope_and_bare_list() {
        assert_eq!(ids(&accept_response(json!({"results": [sea_view()]}))), vec![5]);
        assert_eq!(ids(&accept_response(json!([sea_view()]))), vec![5]);
        assert_eq!(
            ids(&accept_response(json!({"count": 1, "next": null, "results": [sea_view()]}))),
            vec![5]
        );
    }

    #[test]
    fn other_shapes_are_empty() {
        assert!(accept_response(json!({"results": "nope"})).is_empty());
        assert!(accept_response(json!({"data": [sea_view()]})).is_empty());
        assert!(accept_response(json!("listings")).is_empty());
        assert!(accept_response(json!(42)).is_empty());
        assert!(accept_response(Value::Null).is_empty());
    }

    #[test]
    fn sparse_records_are_kept_as_sent() {
        let body = json!({"results": [
            {"id": 5, "title": "Sea View Flat", "area": {"name": "Douala, Cameroon"}},
            {"id": 7, "title": "Flat", "price": 1000, "listing_type": "lease"}
        ]});
        let accepted = accept_response(body);

        assert_eq!(ids(&accepted), vec![5, 7]);
        assert_eq!(accepted[0].area_name(), "Douala, Cameroon");
        assert_eq!(accepted[0].price, None);
        assert_eq!(accepted[1].listing_type, crate::models::ListingType::Unknown);
        assert_eq!(accepted[1].price, Some(1000.0));
    }

    #[test]
    fn entries_without_id_are_dropped() {
        let body = json!([sea_view(), {"title": "no id"}, "listing", 42, {"id": null}]);
        assert_eq!(ids(&accept_response(body)), vec![5]);
    }

    #[tokio::test]
    async fn douala_query_over_sparse_record_finds_only_it() {
        let state = RwLock::new(ViewState::default());
        load_properties(
            &StaticSource(json!({"results": [
                {"id": 5, "title": "Sea View Flat", "area": {"name": "Douala, Cameroon"}}
            ]})),
            &state,
            &Liveness::new(),
            FallbackMode::Replace,
        )
        .await;

        let mut view = state.write().await;
        view.query = "douala".to_string();
        let found: Vec<i64> = view.filtered().iter().map(|p| p.id).collect();
        assert_eq!(found, vec![5]);
    }

    #[tokio::test]
    async fn success_replaces_with_fetched_list() {
        let state = RwLock::new(ViewState::default());
        let outcome = load_properties(
            &StaticSource(json!({"results": [sea_view()]})),
            &state,
            &Liveness::new(),
            FallbackMode::Replace,
        )
        .await;

        assert_eq!(outcome, LoadOutcome::Fetched { accepted: 1 });
        let view = state.read().await;
        assert_eq!(ids(&view.properties), vec![5]);
        assert!(!view.loading);
        assert!(view.notice.is_none());
    }

    #[tokio::test]
    async fn merge_appends_samples_after_fetched() {
        let state = RwLock::new(ViewState::default());
        load_properties(
            &StaticSource(json!([sea_view()])),
            &state,
            &Liveness::new(),
            FallbackMode::Merge,
        )
        .await;

        assert_eq!(ids(&state.read().await.properties), vec![5, 1, 2]);
    }

    #[tokio::test]
    async fn unexpected_shape_loads_nothing() {
        let state = RwLock::new(ViewState::default());
        let outcome = load_properties(
            &StaticSource(json!({"detail": "Not found."})),
            &state,
            &Liveness::new(),
            FallbackMode::Replace,
        )
        .await;

        assert_eq!(outcome, LoadOutcome::Fetched { accepted: 0 });
        assert!(state.read().await.properties.is_empty());
    }

    #[tokio::test]
    async fn failure_shows_exactly_the_samples() {
        for mode in [FallbackMode::Replace, FallbackMode::Merge] {
            let state = RwLock::new(ViewState::default());
            let outcome =
                load_properties(&FailingSource, &state, &Liveness::new(), mode).await;

            assert!(matches!(outcome, LoadOutcome::Fallback { .. }));
            let view = state.read().await;
            assert_eq!(view.properties, fallback_properties());
            assert!(!view.loading);
            assert_eq!(view.notice.as_deref(), Some("connection refused"));
        }
    }

    #[tokio::test]
    async fn loading_only_while_in_flight() {
        let state = Arc::new(RwLock::new(ViewState::default()));
        let (source, respond) = GatedSource::new();
        let started = source.started.clone();
        assert!(!state.read().await.loading);

        let task = {
            let state = state.clone();
            tokio::spawn(async move {
                load_properties(&source, &state, &Liveness::new(), FallbackMode::Replace).await
            })
        };

        started.notified().await;
        assert!(state.read().await.loading);

        respond.send(Ok(json!([sea_view()]))).unwrap();
        task.await.unwrap();
        assert!(!state.read().await.loading);
    }

    #[tokio::test]
    async fn resolution_after_teardown_is_ignored() {
        let state = Arc::new(RwLock::new(ViewState::default()));
        let liveness = Liveness::new();
        let (source, respond) = GatedSource::new();
        let started = source.started.clone();

        let task = {
            let state = state.clone();
            let liveness = liveness.clone();
            tokio::spawn(async move {
                load_properties(&source, &state, &liveness, FallbackMode::Replace).await
            })
        };

        started.notified().await;
        let before = state.read().await.clone();
        liveness.revoke();
        respond.send(Ok(json!([sea_view()]))).unwrap();

        assert_eq!(task.await.unwrap(), LoadOutcome::Cancelled);
        let after = state.read().await;
        assert_eq!(after.properties, before.properties);
        assert_eq!(after.loading, before.loading);
        assert!(after.notice.is_none());
    }

    #[tokio::test]
    async fn revoked_before_start_does_nothing() {
        let state = RwLock::new(ViewState::default());
        let liveness = Liveness::new();
        liveness.revoke();

        let outcome =
            load_properties(&FailingSource, &state, &liveness, FallbackMode::Replace).await;
        assert_eq!(outcome, LoadOutcome::Cancelled);
        assert!(!state.read().await.loading);
        assert!(state.read().await.properties.is_empty());
    }
}
