use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{RecommendationGateway, Upstream},
};

/// Shared application state
///
/// Holds no mutable data: every request resolves independently.
#[derive(Clone)]
pub struct AppState {
    pub gateway: RecommendationGateway,
}

impl AppState {
    pub fn new(gateway: RecommendationGateway) -> Self {
        Self { gateway }
    }

    /// State backed by an arbitrary upstream, used by tests
    pub fn with_upstream(upstream: Arc<dyn Upstream>) -> Self {
        Self::new(RecommendationGateway::new(upstream))
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(RecommendationGateway::from_config(config)?))
    }
}
