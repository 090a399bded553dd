use crate::loader::FallbackMode;
use crate::store::FileStore;
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// Request timeout; unset means none
    pub timeout: Option<Duration>,
    pub store_path: Option<PathBuf>,
    pub fallback_mode: FallbackMode,
}

impl Config {
    /// Read settings from the environment (and `.env`, if present)
    pub fn load() -> Self {
        if dotenvy::dotenv().is_ok() {
            info!("Loaded settings from .env");
        }

        let merge_samples: bool = try_load("PROPERTY237_MERGE_SAMPLES", false);

        Self {
            api_url: try_load("PROPERTY237_API_URL", DEFAULT_API_URL.to_string()),
            timeout: try_load_optional::<u64>("PROPERTY237_TIMEOUT_SECS").map(Duration::from_secs),
            store_path: var("PROPERTY237_STORE")
                .map(PathBuf::from)
                .ok()
                .or_else(|| match FileStore::default_path() {
                    Ok(path) => Some(path),
                    Err(e) => {
                        warn!("{e}; language choice will not be remembered");
                        None
                    }
                }),
            fallback_mode: if merge_samples {
                FallbackMode::Merge
            } else {
                FallbackMode::Replace
            },
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| ())
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(()) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn try_load_optional<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Invalid {key} value {raw:?}: {e}, ignoring it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keys_use_defaults() {
        let merge: bool = try_load("PROPERTY237_TEST_UNSET_MERGE", false);
        assert!(!merge);
    }

    #[test]
    fn timeout_is_absent_unless_configured() {
        assert_eq!(try_load_optional::<u64>("PROPERTY237_TEST_UNSET_TIMEOUT"), None);

        env::set_var("PROPERTY237_TEST_BAD_TIMEOUT", "soon");
        assert_eq!(try_load_optional::<u64>("PROPERTY237_TEST_BAD_TIMEOUT"), None);

        env::set_var("PROPERTY237_TEST_SET_TIMEOUT", "12");
        assert_eq!(try_load_optional::<u64>("PROPERTY237_TEST_SET_TIMEOUT"), Some(12));
    }

    #[test]
    fn invalid_values_fall_back_to_default() {
        env::set_var("PROPERTY237_TEST_BAD_BOOL", "sometimes");
        let merge: bool = try_load("PROPERTY237_TEST_BAD_BOOL", false);
        assert!(!merge);

        env::set_var("PROPERTY237_TEST_GOOD_SECS", " 5 ");
        let secs: u64 = try_load("PROPERTY237_TEST_GOOD_SECS", 30);
        assert_eq!(secs, 5);
    }
}
