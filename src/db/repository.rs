// src/db/repository.rs
// DOCUMENTATION: Database access layer - all SQL queries
// PURPOSE: PostgreSQL implementation of RecommendationStore

use crate::db::RecommendationStore;
use crate::errors::RecommendationError;
use crate::models::{Recommendation, ScoreFilter, POPULAR_SCORE};
use async_trait::async_trait;
use sqlx::PgPool;

/// PgRecommendationRepository: All database operations for recommendations
/// DOCUMENTATION: Uses query_as for typed SQL queries over the pool
#[derive(Clone)]
pub struct PgRecommendationRepository {
    pool: PgPool,
}

impl PgRecommendationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationStore for PgRecommendationRepository {
    /// Create new recommendation in database
    /// DOCUMENTATION: A unique-index violation converts to Conflict
    async fn create(
        &self,
        name: &str,
        youtube_link: &str,
    ) -> Result<Recommendation, RecommendationError> {
        let recommendation = sqlx::query_as::<_, Recommendation>(
            r#"
            INSERT INTO recommendations (name, youtube_link, score)
            VALUES ($1, $2, 0)
            RETURNING id, name, youtube_link, score
            "#,
        )
        .bind(name)
        .bind(youtube_link)
        .fetch_one(&self.pool)
        .await?;

        log::info!("Created recommendation with id: {}", recommendation.id);
        Ok(recommendation)
    }

    async fn find(&self, id: i32) -> Result<Option<Recommendation>, RecommendationError> {
        let row = sqlx::query_as::<_, Recommendation>(
            "SELECT id, name, youtube_link, score FROM recommendations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Recommendation>, RecommendationError> {
        let row = sqlx::query_as::<_, Recommendation>(
            "SELECT id, name, youtube_link, score FROM recommendations WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List recommendations, optionally by score band
    /// DOCUMENTATION: Used by the random pick
    async fn find_all(
        &self,
        filter: Option<ScoreFilter>,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        let sql = match filter {
            None => "SELECT id, name, youtube_link, score FROM recommendations ORDER BY id",
            Some(ScoreFilter::Gt) => {
                "SELECT id, name, youtube_link, score FROM recommendations WHERE score > $1 ORDER BY id"
            }
            Some(ScoreFilter::Lte) => {
                "SELECT id, name, youtube_link, score FROM recommendations WHERE score <= $1 ORDER BY id"
            }
        };

        let mut query = sqlx::query_as::<_, Recommendation>(sql);
        if filter.is_some() {
            query = query.bind(POPULAR_SCORE);
        }

        let rows = query.fetch_all(&self.pool).await?;
        log::debug!("find_all({:?}) returned {} rows", filter, rows.len());
        Ok(rows)
    }

    async fn get_latest(&self, limit: i64) -> Result<Vec<Recommendation>, RecommendationError> {
        let rows = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT id, name, youtube_link, score
            FROM recommendations
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_top(&self, amount: i64) -> Result<Vec<Recommendation>, RecommendationError> {
        let rows = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT id, name, youtube_link, score
            FROM recommendations
            ORDER BY score DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(amount)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Apply a vote
    /// DOCUMENTATION: Single UPDATE so concurrent votes never lose increments
    async fn update_score(
        &self,
        id: i32,
        delta: i32,
    ) -> Result<Option<Recommendation>, RecommendationError> {
        let row = sqlx::query_as::<_, Recommendation>(
            r#"
            UPDATE recommendations
            SET score = score + $1
            WHERE id = $2
            RETURNING id, name, youtube_link, score
            "#,
        )
        .bind(delta)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn remove(&self, id: i32) -> Result<bool, RecommendationError> {
        let rows = sqlx::query("DELETE FROM recommendations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows > 0 {
            log::info!("Deleted recommendation: {}", id);
        }
        Ok(rows > 0)
    }

    async fn remove_all(&self) -> Result<u64, RecommendationError> {
        let rows = sqlx::query("DELETE FROM recommendations")
            .execute(&self.pool)
            .await?
            .rows_affected();

        log::info!("Deleted {} recommendations", rows);
        Ok(rows)
    }

    async fn count(&self) -> Result<i64, RecommendationError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recommendations")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
