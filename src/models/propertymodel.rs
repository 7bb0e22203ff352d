use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored listing. `id` is the store-internal identifier; `code` is the
/// externally-visible one every route addresses the listing by.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: Uuid,
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
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row joined with the minimal creator identity used on read paths.
#[derive(Debug, FromRow, Clone)]
pub struct PropertyWithOwner {
    #[sqlx(flatten)]
    pub property: Property,
    pub owner_name: String,
    pub owner_email: String,
}
