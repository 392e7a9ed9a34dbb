use std::sync::Arc;

use crate::config::Config;
use crate::resumes::improve::ResumeImprover;
use crate::usage::{PlanLimits, UsageStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// In-memory or Redis, chosen at startup from `REDIS_URL`.
    pub usage: Arc<dyn UsageStore>,
    pub limits: PlanLimits,
    /// `None` when no API key is configured; the improve endpoint then
    /// answers 503.
    pub improver: Option<Arc<dyn ResumeImprover>>,
}
