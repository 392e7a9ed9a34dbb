use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use redis::aio::MultiplexedConnection;
use redis::Client as RedisClient;
use tokio::sync::OnceCell;
use tracing::info;

use crate::errors::AppError;
use crate::usage::UsageStore;

/// Fixed-window counters in Redis (`INCR` + `EXPIRE`), shared by every
/// instance pointing at the same server.
pub struct RedisUsageStore {
    client: RedisClient,
    connection: OnceCell<MultiplexedConnection>,
}

impl RedisUsageStore {
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            connection: OnceCell::new(),
        }
    }

    async fn connection(&self) -> Result<MultiplexedConnection, AppError> {
        let conn = self
            .connection
            .get_or_try_init(|| async {
                let conn = self.client.get_multiplexed_async_connection().await?;
                info!("Redis usage store connected");
                Ok::<_, redis::RedisError>(conn)
            })
            .await
            .map_err(|e| AppError::Usage(format!("redis connection failed: {e}")))?;
        Ok(conn.clone())
    }
}

/// Key for the window bucket containing `now_secs`.
fn bucket_key(key: &str, window_secs: u64, now_secs: u64) -> String {
    format!("{key}:{}", now_secs / window_secs.max(1))
}

#[async_trait]
impl UsageStore for RedisUsageStore {
    async fn record(&self, key: &str, window: Duration) -> Result<u64, AppError> {
        let window_secs = window.as_secs().max(1);
        let now_secs = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        let redis_key = bucket_key(key, window_secs, now_secs);

        let mut conn = self.connection().await?;
        let (count,): (u64,) = redis::pipe()
            .atomic()
            .incr(&redis_key, 1)
            .expire(&redis_key, window_secs as i64)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::Usage(format!("redis INCR failed: {e}")))?;

        Ok(count)
    }
}
