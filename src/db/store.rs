// src/db/store.rs
// DOCUMENTATION: Storage seam between services and persistence
// PURPOSE: One trait, implemented by the PostgreSQL and in-memory repositories

use crate::errors::RecommendationError;
use crate::models::{Recommendation, ScoreFilter};
use async_trait::async_trait;

/// Persistence operations for recommendations
/// DOCUMENTATION: Services depend on this trait, never on a concrete backend
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Insert a new recommendation with score 0
    async fn create(&self, name: &str, youtube_link: &str)
        -> Result<Recommendation, RecommendationError>;

    async fn find(&self, id: i32) -> Result<Option<Recommendation>, RecommendationError>;

    async fn find_by_name(&self, name: &str)
        -> Result<Option<Recommendation>, RecommendationError>;

    /// All recommendations, optionally restricted to a score band, ordered by id
    async fn find_all(
        &self,
        filter: Option<ScoreFilter>,
    ) -> Result<Vec<Recommendation>, RecommendationError>;

    /// Most recently created first
    async fn get_latest(&self, limit: i64) -> Result<Vec<Recommendation>, RecommendationError>;

    /// Highest score first, ties broken by id
    async fn get_top(&self, amount: i64) -> Result<Vec<Recommendation>, RecommendationError>;

    /// Add `delta` to the score and return the updated record, None if absent
    async fn update_score(
        &self,
        id: i32,
        delta: i32,
    ) -> Result<Option<Recommendation>, RecommendationError>;

    /// Returns true if a row was deleted
    async fn remove(&self, id: i32) -> Result<bool, RecommendationError>;

    /// Delete every recommendation, returning how many were removed
    async fn remove_all(&self) -> Result<u64, RecommendationError>;

    async fn count(&self) -> Result<i64, RecommendationError>;
}
