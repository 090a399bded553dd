use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Store key holding the chosen interface language
pub const LANGUAGE_KEY: &str = "property237_language";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Language {
    #[default]
    EN,
    FR,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::EN => "EN",
            Language::FR => "FR",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::EN => Language::FR,
            Language::FR => Language::EN,
        }
    }

    /// `fr`, `fr-FR`, `fr_CM.UTF-8` → FR; anything else → EN
    pub fn from_locale(locale: &str) -> Self {
        if locale.trim().to_ascii_lowercase().starts_with("fr") {
            Language::FR
        } else {
            Language::EN
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EN" => Ok(Language::EN),
            "FR" => Ok(Language::FR),
            other => Err(format!("unsupported language code {other:?}")),
        }
    }
}

/// Locale reported by the environment, in the order POSIX consults it
pub fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
}

/// Language to start with: the stored choice if valid, otherwise the locale's.
///
/// An inferred language is not written back; only explicit toggles persist.
pub fn resolve_language(store: &dyn KeyValueStore, locale: Option<&str>) -> Language {
    match store.get(LANGUAGE_KEY) {
        Ok(Some(stored)) => match stored.parse() {
            Ok(language) => return language,
            Err(e) => debug!("Ignoring stored language: {}", e),
        },
        Ok(None) => {}
        Err(e) => debug!("Could not read language preference: {}", e),
    }

    locale.map(Language::from_locale).unwrap_or_default()
}

/// Flip between EN and FR and remember the choice
pub fn toggle_language(store: &dyn KeyValueStore, current: Language) -> Language {
    let next = current.toggled();
    if let Err(e) = store.set(LANGUAGE_KEY, next.code()) {
        debug!("Could not persist language preference: {}", e);
    }
    next
}
