use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::{
    db::{
        cache::{self, CacheHelper},
        db::DBClient,
        propertydb::PropertyExt,
    },
    dtos::propertydtos::{CreatePropertyDto, PropertyDetailDto, UpdatePropertyDto},
    models::usermodel::User,
    service::{error::ServiceError, filter::SearchQuery},
    utils::code_generator::generate_listing_code,
};

/// Keys dropped after an update or delete on one listing: its detail entry
/// and the full list. Search entries are left to age out by TTL.
pub fn stale_keys_after_write(code: &str) -> [String; 2] {
    [cache::detail_key(code), cache::list_key()]
}

/// Cache-aside orchestration for listing reads and writes. Reads check the
/// cache first and repopulate it on a miss; writes mutate Postgres and then
/// drop whatever cached projections the write made stale.
#[derive(Debug, Clone)]
pub struct PropertyService {
    db: Arc<DBClient>,
}

impl PropertyService {
    pub fn new(db: Arc<DBClient>) -> Self {
        PropertyService { db }
    }

    pub async fn list(&self) -> Result<(Vec<PropertyDetailDto>, bool), ServiceError> {
        let key = cache::list_key();

        if let Some(cached) = self.read_cache::<Vec<PropertyDetailDto>>(&key).await {
            return Ok((cached, true));
        }

        let properties: Vec<PropertyDetailDto> = self
            .db
            .get_all_properties()
            .await?
            .into_iter()
            .map(PropertyDetailDto::from)
            .collect();

        self.write_cache(&key, &properties, cache::PROPERTY_LIST_TTL)
            .await;

        Ok((properties, false))
    }

    pub async fn detail(&self, code: &str) -> Result<(PropertyDetailDto, bool), ServiceError> {
        let key = cache::detail_key(code);

        if let Some(cached) = self.read_cache::<PropertyDetailDto>(&key).await {
            return Ok((cached, true));
        }

        // nothing is cached for an unknown code
        let row = self
            .db
            .get_property_with_owner(code)
            .await?
            .ok_or(ServiceError::PropertyNotFound)?;

        let property = PropertyDetailDto::from(row);
        self.write_cache(&key, &property, cache::PROPERTY_DETAIL_TTL)
            .await;

        Ok((property, false))
    }

    pub async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<(Vec<PropertyDetailDto>, bool), ServiceError> {
        let key = cache::search_key(&query.cache_key);

        if let Some(cached) = self.read_cache::<Vec<PropertyDetailDto>>(&key).await {
            return Ok((cached, true));
        }

        let properties: Vec<PropertyDetailDto> = self
            .db
            .search_properties(&query.filters)
            .await?
            .into_iter()
            .map(PropertyDetailDto::from)
            .collect();

        self.write_cache(&key, &properties, cache::PROPERTY_SEARCH_TTL)
            .await;

        Ok((properties, false))
    }

    pub async fn create(
        &self,
        owner: &User,
        data: CreatePropertyDto,
    ) -> Result<PropertyDetailDto, ServiceError> {
        let code = generate_listing_code();
        let property = self.db.insert_property(&code, owner.id, &data).await?;

        // a new listing could match any cached list or search result
        self.drop_namespace().await;

        Ok(PropertyDetailDto::from_property(
            &property,
            owner.name.clone(),
            owner.email.clone(),
        ))
    }

    pub async fn update(
        &self,
        requester: &User,
        code: &str,
        data: UpdatePropertyDto,
    ) -> Result<PropertyDetailDto, ServiceError> {
        let mut property = self
            .db
            .get_property_by_code(code)
            .await?
            .ok_or(ServiceError::PropertyNotFound)?;

        if property.created_by != requester.id {
            return Err(ServiceError::NotPropertyOwner);
        }

        data.apply_to(&mut property);
        let updated = self.db.update_property(&property).await?;

        self.drop_keys(&stale_keys_after_write(code)).await;

        Ok(PropertyDetailDto::from_property(
            &updated,
            requester.name.clone(),
            requester.email.clone(),
        ))
    }

    pub async fn delete(&self, requester: &User, code: &str) -> Result<(), ServiceError> {
        let property = self
            .db
            .get_property_by_code(code)
            .await?
            .ok_or(ServiceError::PropertyNotFound)?;

        if property.created_by != requester.id {
            return Err(ServiceError::NotPropertyOwner);
        }

        self.db.delete_property(property.id).await?;
        self.drop_keys(&stale_keys_after_write(code)).await;

        Ok(())
    }

    // Cache plumbing. Failures degrade to miss behavior and never surface to
    // the caller; the cache is an optimization, not a correctness dependency.

    async fn read_cache<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let redis = self.db.redis_client.as_ref()?;
        CacheHelper::get::<T>(redis, key).await.unwrap_or(None)
    }

    async fn write_cache<T: Serialize>(&self, key: &str, value: &T, ttl_seconds: usize) {
        if let Some(redis) = &self.db.redis_client {
            if let Err(e) = CacheHelper::set(redis, key, value, ttl_seconds).await {
                tracing::warn!("Cache SET failed for {}: {}", key, e);
            }
        }
    }

    async fn drop_keys(&self, keys: &[String]) {
        if let Some(redis) = &self.db.redis_client {
            for key in keys {
                if let Err(e) = CacheHelper::delete(redis, key).await {
                    tracing::warn!("Cache DELETE failed for {}: {}", key, e);
                }
            }
        }
    }

    async fn drop_namespace(&self) {
        if let Some(redis) = &self.db.redis_client {
            if let Err(e) =
                CacheHelper::delete_pattern(redis, cache::PROPERTY_NAMESPACE_PATTERN).await
            {
                tracing::warn!("Cache namespace invalidation failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[test]
    fn update_and_delete_invalidate_detail_and_list_only() {
        let keys = stale_keys_after_write("PROP-1A2B3C4D");
        assert_eq!(
            keys,
            [
                "property:detail:PROP-1A2B3C4D".to_string(),
                "property:list".to_string()
            ]
        );
        // search entries are deliberately absent; they expire by TTL
        assert!(keys.iter().all(|k| !k.starts_with("property:search:")));
    }

    #[test]
    fn create_invalidates_the_whole_namespace() {
        assert_eq!(cache::PROPERTY_NAMESPACE_PATTERN, "property:*");
    }

    #[tokio::test]
    async fn service_runs_without_a_cache() {
        let pool = PgPool::connect_lazy("postgres://localhost/proplist").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let service = PropertyService::new(db_client);

        // no redis configured: reads are misses, writes are no-ops
        assert!(service
            .read_cache::<Vec<PropertyDetailDto>>("property:list")
            .await
            .is_none());
        service
            .write_cache("property:list", &Vec::<PropertyDetailDto>::new(), 300)
            .await;
        service.drop_keys(&stale_keys_after_write("PROP-00000000")).await;
        service.drop_namespace().await;
    }
}
