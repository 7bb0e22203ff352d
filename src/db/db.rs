use redis::aio::ConnectionManager;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

#[derive(Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
    pub redis_client: Option<Arc<ConnectionManager>>,
}

impl std::fmt::Debug for DBClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DBClient")
            .field("pool", &"Pool<Postgres>")
            .field("redis_client", &self.redis_client.is_some())
            .finish()
    }
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient {
            pool,
            redis_client: None,
        }
    }

    /// Connect the cache as well. A failed Redis connection is not fatal:
    /// every cached read falls through to Postgres when the cache is absent.
    pub async fn with_redis(pool: Pool<Postgres>, redis_url: &str) -> Self {
        let conn = match redis::Client::open(redis_url) {
            Ok(client) => ConnectionManager::new(client).await.map_err(|e| {
                tracing::warn!("Failed to connect to Redis: {}. Continuing without cache.", e);
            }),
            Err(e) => {
                tracing::warn!("Failed to create Redis client: {}. Continuing without cache.", e);
                Err(())
            }
        };

        DBClient {
            pool,
            redis_client: conn.ok().map(Arc::new),
        }
    }

    pub fn is_redis_available(&self) -> bool {
        self.redis_client.is_some()
    }

    pub fn cache_status(&self) -> &str {
        if self.redis_client.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    }
}
