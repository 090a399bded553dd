//! Property237 listings search: loads the property collection once, falls
//! back to sample listings when the API is unreachable, and filters the
//! result client-side.

pub mod config;
pub mod error;
pub mod filter;
pub mod language;
pub mod loader;
pub mod models;
pub mod render;
pub mod sources;
pub mod state;
pub mod store;
pub mod view;

pub use error::{LoadError, StoreError};
pub use loader::{FallbackMode, LoadOutcome};
pub use models::Property;
pub use view::SearchView;
