use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::favoritemodel::{Favorite, FavoriteWithProperty},
};

#[async_trait]
pub trait FavoriteExt {
    /// Insert a favorite row. The compound unique index on
    /// (user_id, property_id) is the only dedup mechanism.
    async fn insert_favorite(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Favorite, sqlx::Error>;

    async fn delete_favorite(&self, user_id: Uuid, property_id: Uuid)
        -> Result<u64, sqlx::Error>;

    async fn get_favorites_with_property(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FavoriteWithProperty>, sqlx::Error>;

    async fn favorite_exists(&self, user_id: Uuid, property_id: Uuid)
        -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl FavoriteExt for DBClient {
    async fn insert_favorite(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<Favorite, sqlx::Error> {
        sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (user_id, property_id) VALUES ($1, $2) \
             RETURNING id, user_id, property_id, created_at",
        )
        .bind(user_id)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_favorite(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND property_id = $2")
            .bind(user_id)
            .bind(property_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_favorites_with_property(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FavoriteWithProperty>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteWithProperty>(
            "SELECT f.id, f.created_at, p.code, p.title, p.property_type, p.price, p.state, \
                    p.city, p.area_sq_ft, p.bedrooms, p.bathrooms, p.amenities, p.furnished, \
                    p.available_from, p.listed_by, p.tags, p.color_theme, p.rating, \
                    p.is_verified, p.listing_type \
             FROM favorites f JOIN properties p ON p.id = f.property_id \
             WHERE f.user_id = $1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn favorite_exists(
        &self,
        user_id: Uuid,
        property_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND property_id = $2)",
        )
        .bind(user_id)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await
    }
}
