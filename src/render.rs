//! Plain-text rendering of the search page.

use crate::language::Language;
use crate::models::Property;
use crate::state::{ViewMode, ViewState};
use std::fmt::Write;

/// A piece of interface text in both supported languages
#[derive(Debug, Clone, Copy)]
pub struct Label {
    pub en: &'static str,
    pub fr: &'static str,
}

impl Label {
    pub const fn new(en: &'static str, fr: &'static str) -> Self {
        Self { en, fr }
    }

    pub fn get(self, language: Language) -> &'static str {
        match language {
            Language::EN => self.en,
            Language::FR => self.fr,
        }
    }
}

pub const NAV_LINKS: [Label; 3] = [
    Label::new("Find a Home", "Trouver un logement"),
    Label::new("Find an Agent", "Trouver un agent"),
    Label::new("News", "Actualités"),
];
pub const SIGN_IN: Label = Label::new("Sign In", "Se connecter");
pub const LOADING: Label = Label::new("Loading properties...", "Chargement des propriétés...");
pub const EMPTY: Label = Label::new("No properties found", "Aucune propriété trouvée");
pub const SORT_BY: Label = Label::new("Sort By: Newest", "Trier par : Plus récent");
pub const MAP_PANEL: Label = Label::new("Interactive Map View", "Vue carte interactive");
pub const MAP_SOON: Label = Label::new(
    "(Map integration coming soon)",
    "(Intégration de la carte bientôt disponible)",
);
pub const MAP_HINT: Label = Label::new(
    "Switch to Map view to see map",
    "Passez en vue carte pour voir la carte",
);
pub const PRICE_ON_REQUEST: Label = Label::new("Price on request", "Prix sur demande");
pub const SAMPLE_NOTICE: Label = Label::new(
    "Showing sample listings",
    "Affichage d'annonces d'exemple",
);

/// `250000` → `250,000` (EN) or `250 000` (FR)
pub fn format_price(amount: f64, language: Language) -> String {
    let separator = match language {
        Language::EN => ',',
        Language::FR => ' ',
    };
    let digits = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    if amount < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

pub fn render_header(language: Language) -> String {
    let links: Vec<&str> = NAV_LINKS.iter().map(|l| l.get(language)).collect();
    let toggle: Vec<String> = [Language::EN, Language::FR]
        .iter()
        .map(|&l| {
            if l == language {
                format!("[{}]", l)
            } else {
                l.to_string()
            }
        })
        .collect();

    format!(
        "Property237 | {} | XAF | {} | {}",
        links.join(" | "),
        SIGN_IN.get(language),
        toggle.join(" ")
    )
}

fn hero_title(total: usize, language: Language) -> String {
    let count = format_price(total as f64, language);
    match language {
        Language::EN => format!("Search {} listings in Cameroon", count),
        Language::FR => format!("Rechercher parmi {} annonces au Cameroun", count),
    }
}

fn results_count(count: usize, language: Language) -> String {
    match language {
        Language::EN => format!("Results: {} Listings", count),
        Language::FR => format!("Résultats : {} annonces", count),
    }
}

pub fn render_card(property: &Property, language: Language) -> String {
    let mut card = String::new();
    let _ = writeln!(card, "{}", property.title);

    let frequency = if property.listing_type.is_monthly() {
        "/mo"
    } else {
        ""
    };
    match property.price {
        Some(price) => {
            let _ = writeln!(
                card,
                "   {} {}{}",
                format_price(price, language),
                property.currency,
                frequency
            );
        }
        None => {
            let _ = writeln!(card, "   {}", PRICE_ON_REQUEST.get(language));
        }
    }

    let area = match property.area_name() {
        "" => "Cameroon",
        name => name,
    };
    let _ = writeln!(card, "   {}", area);
    let _ = write!(
        card,
        "   {} bd · {} ba",
        property.no_of_bedrooms, property.no_of_bathrooms
    );
    if let Some(date) = property.created_on() {
        let formatted = match language {
            Language::EN => date.format("%m/%d/%Y"),
            Language::FR => date.format("%d/%m/%Y"),
        };
        let _ = write!(card, " · {}", formatted);
    }
    card
}

/// The whole page for the current state
pub fn render_page(state: &ViewState) -> String {
    let language = state.language;
    let filtered = state.filtered();
    let mut out = String::new();

    let _ = writeln!(out, "{}", render_header(language));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", hero_title(state.properties.len(), language));
    if !state.query.is_empty() {
        let _ = writeln!(out, "\"{}\"", state.query);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", results_count(filtered.len(), language));
    let _ = writeln!(out, "{}", SORT_BY.get(language));
    if state.notice.is_some() {
        let _ = writeln!(out, "{}", SAMPLE_NOTICE.get(language));
    }
    let _ = writeln!(out);

    if state.loading {
        let _ = writeln!(out, "{}", LOADING.get(language));
    } else if filtered.is_empty() {
        let _ = writeln!(out, "{}", EMPTY.get(language));
    } else {
        for (i, property) in filtered.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, render_card(property, language));
            let _ = writeln!(out);
        }
    }

    match state.view_mode {
        ViewMode::Map => {
            let _ = writeln!(out, "{}", MAP_PANEL.get(language));
            let _ = writeln!(out, "{}", MAP_SOON.get(language));
        }
        ViewMode::List => {
            let _ = writeln!(out, "{}", MAP_HINT.get(language));
        }
    }

    out
}
