use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub property_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Favorite row joined with the listing fields exposed to the owner of the
/// favorites list. Internal listing fields (owner, timestamps) stay out.
#[derive(Debug, FromRow, Clone)]
pub struct FavoriteWithProperty {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub code: String,
    pub title: String,
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
