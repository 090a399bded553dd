use crate::models::{ListingType, Property};
use serde::{Deserialize, Serialize};

/// Hero tabs splitting listings by property category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyTab {
    #[default]
    Residential,
    Commercial,
}

const COMMERCIAL_CATEGORIES: &[&str] = &["commercial", "warehouse"];

impl PropertyTab {
    /// Listings without a category count as residential
    pub fn matches(self, property: &Property) -> bool {
        let commercial = property
            .category()
            .map(|c| COMMERCIAL_CATEGORIES.contains(&c))
            .unwrap_or(false);
        match self {
            PropertyTab::Residential => !commercial,
            PropertyTab::Commercial => commercial,
        }
    }
}

/// Narrowing criteria from the filter bar
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchFilters {
    pub listing_type: Option<ListingType>,
    /// Minimum price (XAF)
    pub min_price: Option<f64>,
    /// Maximum price (XAF)
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        *self == SearchFilters::default()
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.listing_type.map_or(true, |t| property.listing_type == t)
            && self
                .min_price
                .map_or(true, |min| property.price.map_or(false, |p| p >= min))
            && self
                .max_price
                .map_or(true, |max| property.price.map_or(false, |p| p <= max))
            && self
                .min_bedrooms
                .map_or(true, |beds| property.no_of_bedrooms >= beds)
            && self
                .min_bathrooms
                .map_or(true, |baths| property.no_of_bathrooms >= baths)
    }
}

/// Listings whose title or area name contains `query`, ignoring case.
///
/// Recomputed on every keystroke; no index is kept.
pub fn filter_properties<'a>(properties: &'a [Property], query: &str) -> Vec<&'a Property> {
    let needle = query.to_lowercase();
    properties
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.area_name().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Full projection: text query, then tab, then the filter bar.
///
/// `tab` of `None` keeps both residential and commercial listings.
pub fn project<'a>(
    properties: &'a [Property],
    query: &str,
    tab: Option<PropertyTab>,
    filters: &SearchFilters,
) -> Vec<&'a Property> {
    filter_properties(properties, query)
        .into_iter()
        .filter(|p| tab.map_or(true, |t| t.matches(p)))
        .filter(|p| filters.matches(p))
        .collect()
}
