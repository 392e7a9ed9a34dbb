//! Usage limiting for the metered endpoints.
//!
//! Counters sit behind the [`UsageStore`] trait so a single instance can keep
//! them in memory while a multi-instance deployment points at Redis.
//! `AppState` holds an `Arc<dyn UsageStore>`, chosen at startup from config.

pub mod memory;
pub mod redis_store;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::auth::{Caller, Plan};
use crate::config::Config;
use crate::errors::AppError;

pub use memory::InMemoryUsageStore;
pub use redis_store::RedisUsageStore;

#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Records one use of `key` and returns the number of uses inside the
    /// current window, this one included.
    async fn record(&self, key: &str, window: Duration) -> Result<u64, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLimits {
    pub free: u64,
    pub pro: u64,
    pub window: Duration,
}

impl PlanLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            free: config.free_plan_limit,
            pro: config.pro_plan_limit,
            window: Duration::from_secs(config.usage_window_secs.max(1)),
        }
    }

    pub fn limit_for(&self, plan: Plan) -> u64 {
        match plan {
            Plan::Free => self.free,
            Plan::Pro => self.pro,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UsageSnapshot {
    pub used: u64,
    pub limit: u64,
    pub remaining: u64,
}

/// Counts one use of `action` for the caller and rejects it once the plan's
/// limit for the window is exceeded.
pub async fn enforce_limit(
    store: &dyn UsageStore,
    limits: &PlanLimits,
    caller: &Caller,
    action: &str,
) -> Result<UsageSnapshot, AppError> {
    let limit = limits.limit_for(caller.plan);
    let key = format!("usage:{action}:{}", caller.user_id);
    let used = store.record(&key, limits.window).await?;

    if used > limit {
        warn!(
            user_id = %caller.user_id,
            plan = ?caller.plan,
            used,
            limit,
            "usage limit reached for {action}"
        );
        return Err(AppError::RateLimited {
            limit,
            window_secs: limits.window.as_secs(),
        });
    }

    Ok(UsageSnapshot {
        used,
        limit,
        remaining: limit - used,
    })
}
