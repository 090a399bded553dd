use crate::error::LoadError;
use async_trait::async_trait;
use serde_json::Value;

/// Where the listings collection is read from.
///
/// The HTTP API in production, stubs in tests. Implementations return the
/// undecoded body; shape normalisation happens in the loader.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Read the property collection once
    async fn fetch(&self) -> Result<Value, LoadError>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
