use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Whether a listing is offered for rent or for sale
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    Rent,
    Sale,
    GuestHouse,
    /// Absent, or a type this client does not know
    #[default]
    #[serde(other)]
    Unknown,
}

impl ListingType {
    /// Rentals and guest houses are priced per month
    pub fn is_monthly(self) -> bool {
        matches!(self, ListingType::Rent | ListingType::GuestHouse)
    }
}

/// Property classification as returned by the listings API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Neighbourhood or town a property sits in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Area {
    pub name: String,
}

/// Core property data model.
///
/// Only `id` is required. Any other field that is absent or has an
/// unexpected type decodes to its default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: String,
    #[serde(default, deserialize_with = "decimal_price")]
    pub price: Option<f64>,
    #[serde(default = "default_currency", deserialize_with = "lenient_currency")]
    pub currency: String,
    #[serde(default, deserialize_with = "lenient")]
    pub listing_type: ListingType,
    #[serde(default, deserialize_with = "lenient")]
    pub property_type: Option<PropertyType>,
    #[serde(default, deserialize_with = "lenient")]
    pub area: Option<Area>,
    #[serde(default, deserialize_with = "lenient")]
    pub no_of_bedrooms: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub no_of_bathrooms: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub featured: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: String,
}

impl Property {
    /// Area name, or the empty string when the listing has none
    pub fn area_name(&self) -> &str {
        self.area.as_ref().map(|a| a.name.as_str()).unwrap_or("")
    }

    /// Category of the property type, if the API sent one
    pub fn category(&self) -> Option<&str> {
        self.property_type
            .as_ref()
            .and_then(|t| t.category.as_deref())
    }

    /// Calendar date the listing was created.
    ///
    /// The API sends full RFC 3339 timestamps, the sample data plain dates.
    pub fn created_on(&self) -> Option<NaiveDate> {
        let raw = self.created_at.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }
}

fn default_currency() -> String {
    "XAF".to_string()
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(code) if !code.trim().is_empty() => Ok(code),
        _ => Ok(default_currency()),
    }
}

// DRF serializes DecimalField as a string ("250000.00")
fn decimal_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
