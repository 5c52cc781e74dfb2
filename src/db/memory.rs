// src/db/memory.rs
// DOCUMENTATION: In-memory recommendation store
// PURPOSE: Backend for local development (STORAGE_BACKEND=memory) and tests

use crate::db::RecommendationStore;
use crate::errors::{RecommendationError, DUPLICATE_NAME_MESSAGE};
use crate::models::{Recommendation, ScoreFilter};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Recommendation>,
    last_id: i32,
}

/// Thread-safe store keyed by id
/// DOCUMENTATION: Mirrors the table constraints: serial ids, unique names
#[derive(Clone, Default)]
pub struct InMemoryRecommendationRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryRecommendationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecommendationStore for InMemoryRecommendationRepository {
    async fn create(
        &self,
        name: &str,
        youtube_link: &str,
    ) -> Result<Recommendation, RecommendationError> {
        let mut table = self.table.write().await;

        if table.rows.values().any(|r| r.name == name) {
            return Err(RecommendationError::Conflict(DUPLICATE_NAME_MESSAGE.to_string()));
        }

        table.last_id += 1;
        let recommendation = Recommendation {
            id: table.last_id,
            name: name.to_string(),
            youtube_link: youtube_link.to_string(),
            score: 0,
        };
        table.rows.insert(recommendation.id, recommendation.clone());

        log::info!("Created recommendation with id: {}", recommendation.id);
        Ok(recommendation)
    }

    async fn find(&self, id: i32) -> Result<Option<Recommendation>, RecommendationError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Recommendation>, RecommendationError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|r| r.name == name).cloned())
    }

    async fn find_all(
        &self,
        filter: Option<ScoreFilter>,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|r| filter.map_or(true, |f| f.matches(r.score)))
            .cloned()
            .collect())
    }

    async fn get_latest(&self, limit: i64) -> Result<Vec<Recommendation>, RecommendationError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn get_top(&self, amount: i64) -> Result<Vec<Recommendation>, RecommendationError> {
        let table = self.table.read().await;
        let mut rows: Vec<Recommendation> = table.rows.values().cloned().collect();
        // BTreeMap yields ascending ids, and the sort is stable
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows.truncate(amount.max(0) as usize);
        Ok(rows)
    }

    async fn update_score(
        &self,
        id: i32,
        delta: i32,
    ) -> Result<Option<Recommendation>, RecommendationError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|r| {
            r.score += delta;
            r.clone()
        }))
    }

    async fn remove(&self, id: i32) -> Result<bool, RecommendationError> {
        let removed = self.table.write().await.rows.remove(&id).is_some();
        if removed {
            log::info!("Deleted recommendation: {}", id);
        }
        Ok(removed)
    }

    async fn remove_all(&self) -> Result<u64, RecommendationError> {
        let mut table = self.table.write().await;
        let deleted = table.rows.len() as u64;
        table.rows.clear();
        log::info!("Deleted {} recommendations", deleted);
        Ok(deleted)
    }

    async fn count(&self) -> Result<i64, RecommendationError> {
        Ok(self.table.read().await.rows.len() as i64)
    }
}
