use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppResult, AttemptError},
    models::{BookRecord, UserId},
    services::{
        fallback::{Resolved, ResolutionPolicy},
        substitutes,
        upstream::{self, paths, HttpUpstream, Upstream},
    },
};

/// Read-side entry point for the browsing front end
///
/// Every operation resolves to a value. Upstream outages only ever show up as
/// a lower-priority source or a substitute answering instead, never as an error.
#[derive(Clone)]
pub struct RecommendationGateway {
    upstream: Arc<dyn Upstream>,
}

impl RecommendationGateway {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let upstream = HttpUpstream::from_config(config)?;
        if !upstream.is_configured() {
            tracing::warn!("API_BASE_URL not set, serving substitutes only");
        }
        Ok(Self::new(Arc::new(upstream)))
    }

    async fn get<T>(&self, path: String) -> Result<T, AttemptError>
    where
        T: DeserializeOwned + Send,
    {
        upstream::fetch(self.upstream.as_ref(), &path)
            .await
            .into_result()
    }

    pub(crate) async fn fetch_popular(&self) -> Result<Vec<BookRecord>, AttemptError> {
        self.get(paths::POPULAR.to_string()).await
    }

    pub(crate) async fn fetch_content(&self, isbn: &str) -> Result<Vec<BookRecord>, AttemptError> {
        self.get(paths::content(isbn)).await
    }

    /// Users the front end can pick an identity from
    pub async fn list_active_users(&self) -> Resolved<Vec<UserId>> {
        ResolutionPolicy::new("active_users")
            .attempt("users_active", move || self.get(paths::ACTIVE_USERS.to_string()))
            .resolve(substitutes::active_users)
            .await
    }

    pub async fn popular_books(&self) -> Resolved<Vec<BookRecord>> {
        ResolutionPolicy::new("popular_books")
            .attempt("popular", move || self.fetch_popular())
            .resolve(substitutes::popular_books)
            .await
    }

    /// Books similar in content to `isbn`
    pub async fn content_recommendations(&self, isbn: &str) -> Resolved<Vec<BookRecord>> {
        ResolutionPolicy::new("content_recommendations")
            .attempt("content", move || self.fetch_content(isbn))
            .resolve(|| substitutes::content_recommendations(isbn))
            .await
    }

    /// Personalized recommendations for `user_id`
    ///
    /// When the personalized signal is unavailable this degrades to the
    /// popularity list before resorting to the substitute.
    pub async fn hybrid_recommendations(&self, user_id: &UserId) -> Resolved<Vec<BookRecord>> {
        ResolutionPolicy::new("hybrid_recommendations")
            .attempt("hybrid", move || self.get(paths::hybrid(user_id)))
            .attempt("popular", move || self.fetch_popular())
            .resolve(|| substitutes::hybrid_recommendations(user_id))
            .await
    }
}
