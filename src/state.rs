use crate::filter::{PropertyTab, SearchFilters};
use crate::language::Language;
use crate::models::Property;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Results pane layout
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Map,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "list" => Ok(ViewMode::List),
            "map" => Ok(ViewMode::Map),
            other => Err(format!("unknown view mode {other:?}")),
        }
    }
}

/// Everything the search page displays. Only `language` outlives the page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    pub properties: Vec<Property>,
    pub loading: bool,
    pub query: String,
    pub view_mode: ViewMode,
    pub language: Language,
    /// `None` until a hero tab is picked
    pub tab: Option<PropertyTab>,
    pub filters: SearchFilters,
    /// Message explaining why sample listings are shown
    pub notice: Option<String>,
}

impl ViewState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Default::default()
        }
    }

    /// Listings matching the current query, tab and filter bar
    pub fn filtered(&self) -> Vec<&Property> {
        crate::filter::project(&self.properties, &self.query, self.tab, &self.filters)
    }
}

/// Cleared when the page is torn down.
///
/// Handed to the loader, which checks it before every state commit.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
