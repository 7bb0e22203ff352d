use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::favoritemodel::{Favorite, FavoriteWithProperty};

/// Fixed projection of a favorited listing: the fields a favorites list
/// shows, nothing internal or administrative.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePropertyDto {
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
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDto {
    pub id: Uuid,
    pub property: FavoritePropertyDto,
    pub created_at: DateTime<Utc>,
}

impl From<FavoriteWithProperty> for FavoriteDto {
    fn from(row: FavoriteWithProperty) -> Self {
        FavoriteDto {
            id: row.id,
            created_at: row.created_at,
            property: FavoritePropertyDto {
                id: row.code,
                title: row.title,
                property_type: row.property_type,
                price: row.price,
                state: row.state,
                city: row.city,
                area_sq_ft: row.area_sq_ft,
                bedrooms: row.bedrooms,
                bathrooms: row.bathrooms,
                amenities: row.amenities,
                furnished: row.furnished,
                available_from: row.available_from,
                listed_by: row.listed_by,
                tags: row.tags,
                color_theme: row.color_theme,
                rating: row.rating,
                is_verified: row.is_verified,
                listing_type: row.listing_type,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteResponseDto {
    pub success: bool,
    pub data: Favorite,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteListResponseDto {
    pub success: bool,
    pub count: usize,
    pub data: Vec<FavoriteDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteCheckData {
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteCheckResponseDto {
    pub success: bool,
    pub data: FavoriteCheckData,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> FavoriteWithProperty {
        FavoriteWithProperty {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            code: "PROP-1A2B3C4D".to_string(),
            title: "Sunny 2BHK".to_string(),
            property_type: "Apartment".to_string(),
            price: 250000.0,
            state: "Maharashtra".to_string(),
            city: "Pune".to_string(),
            area_sq_ft: 950.0,
            bedrooms: 2,
            bathrooms: 2,
            amenities: vec!["pool".to_string()],
            furnished: "Semi".to_string(),
            available_from: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            listed_by: "Owner".to_string(),
            tags: vec![],
            color_theme: "#6ab45e".to_string(),
            rating: 4.2,
            is_verified: true,
            listing_type: "rent".to_string(),
        }
    }

    #[test]
    fn favorite_projection_excludes_owner_and_timestamps() {
        let dto = FavoriteDto::from(sample_row());
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["property"]["id"], "PROP-1A2B3C4D");
        assert_eq!(json["property"]["type"], "Apartment");
        assert!(json["property"].get("createdBy").is_none());
        assert!(json["property"].get("createdAt").is_none());
    }

    #[test]
    fn check_response_uses_is_favorite_wire_name() {
        let response = FavoriteCheckResponseDto {
            success: true,
            data: FavoriteCheckData { is_favorite: false },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"]["isFavorite"], false);
    }
}
