use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::propertymodel::{Property, PropertyWithOwner};

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyDto {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Property type is required"))]
    pub property_type: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(range(min = 0.0, message = "Area must not be negative"))]
    pub area_sq_ft: f64,

    #[validate(range(min = 0, message = "Bedrooms must not be negative"))]
    pub bedrooms: i32,

    #[validate(range(min = 0, message = "Bathrooms must not be negative"))]
    pub bathrooms: i32,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[validate(length(min = 1, message = "Furnished status is required"))]
    pub furnished: String,

    pub available_from: NaiveDate,

    #[validate(length(min = 1, message = "Listed by is required"))]
    pub listed_by: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(length(min = 1, message = "Color theme is required"))]
    pub color_theme: String,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,

    pub is_verified: Option<bool>,

    #[validate(length(min = 1, message = "Listing type is required"))]
    pub listing_type: String,
}

/// Partial update: absent fields keep their stored values. The listing code,
/// owner and timestamps are never client-writable.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyDto {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub property_type: Option<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,

    pub state: Option<String>,
    pub city: Option<String>,

    #[validate(range(min = 0.0, message = "Area must not be negative"))]
    pub area_sq_ft: Option<f64>,

    #[validate(range(min = 0, message = "Bedrooms must not be negative"))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0, message = "Bathrooms must not be negative"))]
    pub bathrooms: Option<i32>,

    pub amenities: Option<Vec<String>>,
    pub furnished: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub listed_by: Option<String>,
    pub tags: Option<Vec<String>>,
    pub color_theme: Option<String>,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,

    pub is_verified: Option<bool>,
    pub listing_type: Option<String>,
}

impl UpdatePropertyDto {
    pub fn apply_to(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(property_type) = self.property_type {
            property.property_type = property_type;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(state) = self.state {
            property.state = state;
        }
        if let Some(city) = self.city {
            property.city = city;
        }
        if let Some(area_sq_ft) = self.area_sq_ft {
            property.area_sq_ft = area_sq_ft;
        }
        if let Some(bedrooms) = self.bedrooms {
            property.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = self.bathrooms {
            property.bathrooms = bathrooms;
        }
        if let Some(amenities) = self.amenities {
            property.amenities = amenities;
        }
        if let Some(furnished) = self.furnished {
            property.furnished = furnished;
        }
        if let Some(available_from) = self.available_from {
            property.available_from = available_from;
        }
        if let Some(listed_by) = self.listed_by {
            property.listed_by = listed_by;
        }
        if let Some(tags) = self.tags {
            property.tags = tags;
        }
        if let Some(color_theme) = self.color_theme {
            property.color_theme = color_theme;
        }
        if let Some(rating) = self.rating {
            property.rating = rating;
        }
        if let Some(is_verified) = self.is_verified {
            property.is_verified = is_verified;
        }
        if let Some(listing_type) = self.listing_type {
            property.listing_type = listing_type;
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CreatorDto {
    pub name: String,
    pub email: String,
}

/// The outward listing representation: the listing code is exposed as `id`,
/// the creator shrinks to name and email. This is also what gets cached.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetailDto {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub price: f64,
    pub state: String,
    pub city: String,
    pub area_sq_ft: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub amenities: Vec<String>,
    pub furnished: String,
    pub available_from: NaiveDate,
    pub listed_by: String,
    pub tags: Vec<String>,
    pub color_theme: String,
    pub rating: f64,
    pub is_verified: bool,
    pub listing_type: String,
    pub created_by: CreatorDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PropertyDetailDto {
    pub fn from_property(property: &Property, owner_name: String, owner_email: String) -> Self {
        Self {
            id: property.code.clone(),
            title: property.title.clone(),
            property_type: property.property_type.clone(),
            price: property.price,
            state: property.state.clone(),
            city: property.city.clone(),
            area_sq_ft: property.area_sq_ft,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            amenities: property.amenities.clone(),
            furnished: property.furnished.clone(),
            available_from: property.available_from,
            listed_by: property.listed_by.clone(),
            tags: property.tags.clone(),
            color_theme: property.color_theme.clone(),
            rating: property.rating,
            is_verified: property.is_verified,
            listing_type: property.listing_type.clone(),
            created_by: CreatorDto {
                name: owner_name,
                email: owner_email,
            },
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

impl From<PropertyWithOwner> for PropertyDetailDto {
    fn from(row: PropertyWithOwner) -> Self {
        PropertyDetailDto::from_property(&row.property, row.owner_name, row.owner_email)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyResponseDto {
    pub success: bool,
    pub data: PropertyDetailDto,
    #[serde(rename = "fromCache", skip_serializing_if = "Option::is_none")]
    pub from_cache: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyListResponseDto {
    pub success: bool,
    pub count: usize,
    pub data: Vec<PropertyDetailDto>,
    #[serde(rename = "fromCache")]
    pub from_cache: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn sample_property() -> Property {
        Property {
            id: Uuid::new_v4(),
            code: "PROP-1A2B3C4D".to_string(),
            title: "Sunny 2BHK".to_string(),
            property_type: "Apartment".to_string(),
            price: 250000.0,
            state: "Maharashtra".to_string(),
            city: "Pune".to_string(),
            area_sq_ft: 950.0,
            bedrooms: 2,
            bathrooms: 2,
            amenities: vec!["pool".to_string(), "gym".to_string()],
            furnished: "Semi".to_string(),
            available_from: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            listed_by: "Owner".to_string(),
            tags: vec!["near-metro".to_string()],
            color_theme: "#6ab45e".to_string(),
            rating: 4.2,
            is_verified: true,
            listing_type: "rent".to_string(),
            created_by: Uuid::new_v4(),
            created_at: Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn detail_dto_exposes_code_as_id_and_creator_identity_only() {
        let property = sample_property();
        let dto = PropertyDetailDto::from_property(
            &property,
            "Asha".to_string(),
            "asha@example.com".to_string(),
        );

        assert_eq!(dto.id, "PROP-1A2B3C4D");
        assert_eq!(dto.created_by.name, "Asha");
        assert_eq!(dto.created_by.email, "asha@example.com");

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["createdBy"]["name"], "Asha");
        assert!(json["createdBy"].get("password").is_none());
    }

    #[test]
    fn detail_dto_uses_camel_case_wire_names() {
        let property = sample_property();
        let dto =
            PropertyDetailDto::from_property(&property, "A".to_string(), "a@b.c".to_string());
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["type"], "Apartment");
        assert_eq!(json["areaSqFt"], 950.0);
        assert_eq!(json["availableFrom"], "2025-09-01");
        assert_eq!(json["isVerified"], true);
        assert_eq!(json["listingType"], "rent");
        assert_eq!(json["colorTheme"], "#6ab45e");
        assert!(json.get("property_type").is_none());
    }

    #[test]
    fn list_response_carries_from_cache_tag() {
        let response = PropertyListResponseDto {
            success: true,
            count: 0,
            data: vec![],
            from_cache: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["fromCache"], true);
        assert_eq!(json["count"], 0);
        assert_eq!(json["success"], true);
    }

    #[test]
    fn write_response_omits_from_cache_tag() {
        let property = sample_property();
        let response = PropertyResponseDto {
            success: true,
            data: PropertyDetailDto::from_property(&property, "A".to_string(), "a@b.c".to_string()),
            from_cache: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("fromCache").is_none());
    }

    #[test]
    fn partial_update_keeps_unset_fields() {
        let mut property = sample_property();
        let update = UpdatePropertyDto {
            price: Some(275000.0),
            is_verified: Some(false),
            ..Default::default()
        };

        update.apply_to(&mut property);

        assert_eq!(property.price, 275000.0);
        assert!(!property.is_verified);
        // everything else untouched
        assert_eq!(property.title, "Sunny 2BHK");
        assert_eq!(property.bedrooms, 2);
        assert_eq!(property.code, "PROP-1A2B3C4D");
    }

    #[test]
    fn update_dto_parses_wire_names() {
        let update: UpdatePropertyDto = serde_json::from_str(
            r#"{"type": "House", "areaSqFt": 1200.5, "availableFrom": "2025-10-15"}"#,
        )
        .unwrap();

        assert_eq!(update.property_type.as_deref(), Some("House"));
        assert_eq!(update.area_sq_ft, Some(1200.5));
        assert_eq!(
            update.available_from,
            Some(NaiveDate::from_ymd_opt(2025, 10, 15).unwrap())
        );
        assert!(update.title.is_none());
    }

    #[test]
    fn create_dto_rejects_out_of_range_rating() {
        let dto: CreatePropertyDto = serde_json::from_str(
            r##"{
                "title": "T", "type": "Apartment", "price": 1000.0,
                "state": "S", "city": "C", "areaSqFt": 100.0,
                "bedrooms": 1, "bathrooms": 1, "furnished": "Full",
                "availableFrom": "2025-09-01", "listedBy": "Owner",
                "colorTheme": "#ffffff", "listingType": "sale", "rating": 9.0
            }"##,
        )
        .unwrap();

        assert!(validator::Validate::validate(&dto).is_err());
    }
}
