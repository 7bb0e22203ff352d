use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    dtos::propertydtos::CreatePropertyDto,
    models::propertymodel::{Property, PropertyWithOwner},
};

/// Typed search constraints produced by the filter-query builder. Every
/// field is optional; `Default` is the unconstrained query that matches all
/// listings.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PropertySearchFilters {
    pub property_type: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub furnished: Option<String>,
    pub listed_by: Option<String>,
    pub color_theme: Option<String>,
    pub listing_type: Option<String>,
    pub is_verified: Option<bool>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_rating: Option<f64>,
    pub available_from: Option<NaiveDate>,
    pub amenities: Vec<String>,
    pub tags: Vec<String>,
}

#[async_trait]
pub trait PropertyExt {
    async fn insert_property(
        &self,
        code: &str,
        owner_id: Uuid,
        data: &CreatePropertyDto,
    ) -> Result<Property, sqlx::Error>;

    async fn get_property_by_code(&self, code: &str) -> Result<Option<Property>, sqlx::Error>;

    async fn get_property_with_owner(
        &self,
        code: &str,
    ) -> Result<Option<PropertyWithOwner>, sqlx::Error>;

    async fn get_all_properties(&self) -> Result<Vec<PropertyWithOwner>, sqlx::Error>;

    async fn search_properties(
        &self,
        filters: &PropertySearchFilters,
    ) -> Result<Vec<PropertyWithOwner>, sqlx::Error>;

    async fn update_property(&self, property: &Property) -> Result<Property, sqlx::Error>;

    async fn delete_property(&self, property_id: Uuid) -> Result<u64, sqlx::Error>;
}

const PROPERTY_COLUMNS: &str = "id, code, title, property_type, price, state, city, area_sq_ft, \
     bedrooms, bathrooms, amenities, furnished, available_from, listed_by, tags, color_theme, \
     rating, is_verified, listing_type, created_by, created_at, updated_at";

fn with_owner_select() -> String {
    let property_columns = PROPERTY_COLUMNS
        .split(", ")
        .map(|c| format!("p.{}", c))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "SELECT {}, u.name AS owner_name, u.email AS owner_email \
         FROM properties p JOIN users u ON u.id = p.created_by",
        property_columns
    )
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn insert_property(
        &self,
        code: &str,
        owner_id: Uuid,
        data: &CreatePropertyDto,
    ) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            "INSERT INTO properties (\
                code, title, property_type, price, state, city, area_sq_ft, bedrooms, bathrooms, \
                amenities, furnished, available_from, listed_by, tags, color_theme, rating, \
                is_verified, listing_type, created_by\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19) \
             RETURNING {}",
            PROPERTY_COLUMNS
        ))
        .bind(code)
        .bind(&data.title)
        .bind(&data.property_type)
        .bind(data.price)
        .bind(&data.state)
        .bind(&data.city)
        .bind(data.area_sq_ft)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(&data.amenities)
        .bind(&data.furnished)
        .bind(data.available_from)
        .bind(&data.listed_by)
        .bind(&data.tags)
        .bind(&data.color_theme)
        .bind(data.rating.unwrap_or(0.0))
        .bind(data.is_verified.unwrap_or(false))
        .bind(&data.listing_type)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_property_by_code(&self, code: &str) -> Result<Option<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            "SELECT {} FROM properties WHERE code = $1",
            PROPERTY_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_property_with_owner(
        &self,
        code: &str,
    ) -> Result<Option<PropertyWithOwner>, sqlx::Error> {
        sqlx::query_as::<_, PropertyWithOwner>(&format!(
            "{} WHERE p.code = $1",
            with_owner_select()
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_all_properties(&self) -> Result<Vec<PropertyWithOwner>, sqlx::Error> {
        sqlx::query_as::<_, PropertyWithOwner>(&format!(
            "{} ORDER BY p.created_at DESC",
            with_owner_select()
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn search_properties(
        &self,
        filters: &PropertySearchFilters,
    ) -> Result<Vec<PropertyWithOwner>, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(with_owner_select());
        qb.push(" WHERE TRUE");

        if let Some(property_type) = &filters.property_type {
            qb.push(" AND p.property_type = ").push_bind(property_type.as_str());
        }
        if let Some(state) = &filters.state {
            qb.push(" AND p.state = ").push_bind(state.as_str());
        }
        if let Some(city) = &filters.city {
            qb.push(" AND p.city = ").push_bind(city.as_str());
        }
        if let Some(furnished) = &filters.furnished {
            qb.push(" AND p.furnished = ").push_bind(furnished.as_str());
        }
        if let Some(listed_by) = &filters.listed_by {
            qb.push(" AND p.listed_by = ").push_bind(listed_by.as_str());
        }
        if let Some(color_theme) = &filters.color_theme {
            qb.push(" AND p.color_theme = ").push_bind(color_theme.as_str());
        }
        if let Some(listing_type) = &filters.listing_type {
            qb.push(" AND p.listing_type = ").push_bind(listing_type.as_str());
        }
        if let Some(is_verified) = filters.is_verified {
            qb.push(" AND p.is_verified = ").push_bind(is_verified);
        }
        if let Some(bedrooms) = filters.bedrooms {
            qb.push(" AND p.bedrooms = ").push_bind(bedrooms);
        }
        if let Some(bathrooms) = filters.bathrooms {
            qb.push(" AND p.bathrooms = ").push_bind(bathrooms);
        }
        if let Some(min_price) = filters.min_price {
            qb.push(" AND p.price >= ").push_bind(min_price);
        }
        if let Some(max_price) = filters.max_price {
            qb.push(" AND p.price <= ").push_bind(max_price);
        }
        if let Some(min_area) = filters.min_area {
            qb.push(" AND p.area_sq_ft >= ").push_bind(min_area);
        }
        if let Some(max_area) = filters.max_area {
            qb.push(" AND p.area_sq_ft <= ").push_bind(max_area);
        }
        if let Some(min_rating) = filters.min_rating {
            qb.push(" AND p.rating >= ").push_bind(min_rating);
        }
        if let Some(available_from) = filters.available_from {
            // listings available on or before the requested date
            qb.push(" AND p.available_from <= ").push_bind(available_from);
        }
        if !filters.amenities.is_empty() {
            // superset containment: the listing must carry every requested amenity
            qb.push(" AND p.amenities @> ").push_bind(filters.amenities.clone());
        }
        if !filters.tags.is_empty() {
            qb.push(" AND p.tags @> ").push_bind(filters.tags.clone());
        }

        qb.push(" ORDER BY p.created_at DESC");

        qb.build_query_as::<PropertyWithOwner>()
            .fetch_all(&self.pool)
            .await
    }

    async fn update_property(&self, property: &Property) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(&format!(
            "UPDATE properties SET \
                title = $1, property_type = $2, price = $3, state = $4, city = $5, \
                area_sq_ft = $6, bedrooms = $7, bathrooms = $8, amenities = $9, furnished = $10, \
                available_from = $11, listed_by = $12, tags = $13, color_theme = $14, \
                rating = $15, is_verified = $16, listing_type = $17, updated_at = NOW() \
             WHERE id = $18 RETURNING {}",
            PROPERTY_COLUMNS
        ))
        .bind(&property.title)
        .bind(&property.property_type)
        .bind(property.price)
        .bind(&property.state)
        .bind(&property.city)
        .bind(property.area_sq_ft)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(&property.amenities)
        .bind(&property.furnished)
        .bind(property.available_from)
        .bind(&property.listed_by)
        .bind(&property.tags)
        .bind(&property.color_theme)
        .bind(property.rating)
        .bind(property.is_verified)
        .bind(&property.listing_type)
        .bind(property.id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_property(&self, property_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(property_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_owner_select_projects_creator_identity_only() {
        let sql = with_owner_select();
        assert!(sql.contains("u.name AS owner_name"));
        assert!(sql.contains("u.email AS owner_email"));
        assert!(!sql.contains("u.password"));
    }

    #[test]
    fn default_filters_are_unconstrained() {
        let filters = PropertySearchFilters::default();
        assert!(filters.property_type.is_none());
        assert!(filters.min_price.is_none());
        assert!(filters.amenities.is_empty());
        assert!(filters.tags.is_empty());
    }
}
