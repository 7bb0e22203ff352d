use std::sync::Arc;

use crate::{
    db::{db::DBClient, favoritedb::FavoriteExt, propertydb::PropertyExt},
    dtos::favoritedtos::FavoriteDto,
    models::{favoritemodel::Favorite, usermodel::User},
    service::error::ServiceError,
};

/// The user-to-listing favorite relation. Dedup is the store's compound
/// unique index, not application logic.
#[derive(Debug, Clone)]
pub struct FavoriteService {
    db: Arc<DBClient>,
}

impl FavoriteService {
    pub fn new(db: Arc<DBClient>) -> Self {
        FavoriteService { db }
    }

    pub async fn add(&self, user: &User, code: &str) -> Result<Favorite, ServiceError> {
        let property = self
            .db
            .get_property_by_code(code)
            .await?
            .ok_or(ServiceError::PropertyNotFound)?;

        match self.db.insert_favorite(user.id, property.id).await {
            Ok(favorite) => Ok(favorite),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(ServiceError::AlreadyFavorited)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn remove(&self, user: &User, code: &str) -> Result<(), ServiceError> {
        let property = self
            .db
            .get_property_by_code(code)
            .await?
            .ok_or(ServiceError::PropertyNotFound)?;

        let deleted = self.db.delete_favorite(user.id, property.id).await?;
        if deleted == 0 {
            return Err(ServiceError::FavoriteNotFound);
        }

        Ok(())
    }

    pub async fn list(&self, user: &User) -> Result<Vec<FavoriteDto>, ServiceError> {
        let favorites = self
            .db
            .get_favorites_with_property(user.id)
            .await?
            .into_iter()
            .map(FavoriteDto::from)
            .collect();

        Ok(favorites)
    }

    /// Absence is a valid outcome here, never an error: an unknown listing
    /// code simply is not favorited.
    pub async fn check(&self, user: &User, code: &str) -> Result<bool, ServiceError> {
        match self.db.get_property_by_code(code).await? {
            Some(property) => Ok(self.db.favorite_exists(user.id, property.id).await?),
            None => Ok(false),
        }
    }
}
