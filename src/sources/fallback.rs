use crate::models::{Area, ListingType, Property, PropertyType};

/// Sample listings shown when the API cannot be reached
pub fn fallback_properties() -> Vec<Property> {
    vec![
        Property {
            id: 1,
            title: "Modern Apartment in City Center".to_string(),
            slug: "modern-apartment-city-center".to_string(),
            price: Some(250_000.0),
            currency: "XAF".to_string(),
            listing_type: ListingType::Rent,
            property_type: Some(PropertyType {
                name: "Apartment".to_string(),
                category: Some("apartment".to_string()),
            }),
            area: Some(Area {
                name: "Yaoundé, Cameroon".to_string(),
            }),
            no_of_bedrooms: 2,
            no_of_bathrooms: 1,
            description: "Beautiful modern apartment with great city views".to_string(),
            featured: false,
            created_at: "2025-08-21".to_string(),
        },
        Property {
            id: 2,
            title: "Luxury Villa with Pool".to_string(),
            slug: "luxury-villa-pool".to_string(),
            price: Some(450_000.0),
            currency: "XAF".to_string(),
            listing_type: ListingType::Sale,
            property_type: Some(PropertyType {
                name: "Villa".to_string(),
                category: Some("villa_duplex".to_string()),
            }),
            area: Some(Area {
                name: "Douala, Cameroon".to_string(),
            }),
            no_of_bedrooms: 3,
            no_of_bathrooms: 2,
            description: "Spacious family home in quiet neighborhood".to_string(),
            featured: false,
            created_at: "2025-08-21".to_string(),
        },
    ]
}
