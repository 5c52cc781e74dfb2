// src/services/recommendation_service.rs
// DOCUMENTATION: Business logic for recommendations
// PURPOSE: Vote rules, uniqueness and the weighted random pick

use crate::db::RecommendationStore;
use crate::errors::{RecommendationError, DUPLICATE_NAME_MESSAGE};
use crate::models::{
    CreateRecommendationRequest, Recommendation, ResetResponse, ScoreFilter, StatsResponse,
    VoteResponse, MIN_SCORE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Share of random picks drawn from popular recommendations
pub const POPULAR_PICK_RATIO: f64 = 0.7;

/// How many recommendations GET /recommendations returns
pub const LATEST_LIMIT: i64 = 10;

pub struct RecommendationService;

impl RecommendationService {
    /// Create a recommendation
    /// DOCUMENTATION: Names are unique; a taken name fails with Conflict
    pub async fn insert(
        store: &dyn RecommendationStore,
        req: CreateRecommendationRequest,
    ) -> Result<Recommendation, RecommendationError> {
        if store.find_by_name(&req.name).await?.is_some() {
            log::warn!("Rejected duplicate recommendation name: {}", req.name);
            return Err(RecommendationError::Conflict(DUPLICATE_NAME_MESSAGE.to_string()));
        }

        store.create(&req.name, &req.youtube_link).await
    }

    pub async fn upvote(
        store: &dyn RecommendationStore,
        id: i32,
    ) -> Result<VoteResponse, RecommendationError> {
        Self::get_by_id_or_fail(store, id).await?;

        let updated = store
            .update_score(id, 1)
            .await?
            .ok_or_else(|| not_found(id))?;

        log::info!("Upvoted recommendation {} (score {})", id, updated.score);
        Ok(VoteResponse {
            id,
            score: updated.score,
            removed: false,
        })
    }

    /// Downvote a recommendation
    /// DOCUMENTATION: A score below MIN_SCORE after the decrement deletes the record
    pub async fn downvote(
        store: &dyn RecommendationStore,
        id: i32,
    ) -> Result<VoteResponse, RecommendationError> {
        Self::get_by_id_or_fail(store, id).await?;

        let updated = store
            .update_score(id, -1)
            .await?
            .ok_or_else(|| not_found(id))?;

        let removed = if updated.score < MIN_SCORE {
            store.remove(id).await?;
            log::info!("Removed recommendation {} after score fell to {}", id, updated.score);
            true
        } else {
            log::info!("Downvoted recommendation {} (score {})", id, updated.score);
            false
        };

        Ok(VoteResponse {
            id,
            score: updated.score,
            removed,
        })
    }

    pub async fn get_by_id_or_fail(
        store: &dyn RecommendationStore,
        id: i32,
    ) -> Result<Recommendation, RecommendationError> {
        store.find(id).await?.ok_or_else(|| {
            log::warn!("Recommendation not found with id: {}", id);
            not_found(id)
        })
    }

    /// Latest recommendations, newest first
    pub async fn list(
        store: &dyn RecommendationStore,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        store.get_latest(LATEST_LIMIT).await
    }

    pub async fn get_top(
        store: &dyn RecommendationStore,
        amount: i64,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        if amount < 1 {
            return Err(RecommendationError::ValidationError(
                "amount must be a positive integer".to_string(),
            ));
        }

        store.get_top(amount).await
    }

    /// Pick a random recommendation
    pub async fn get_random(
        store: &dyn RecommendationStore,
    ) -> Result<Recommendation, RecommendationError> {
        let mut rng = StdRng::from_entropy();
        Self::get_random_with_rng(store, &mut rng).await
    }

    /// Weighted random pick
    /// DOCUMENTATION: POPULAR_PICK_RATIO of draws come from the Gt band, the rest
    /// from Lte. An empty band falls back to every recommendation; an empty
    /// store fails with NotFound. The pick within the pool is uniform.
    pub async fn get_random_with_rng<R: Rng>(
        store: &dyn RecommendationStore,
        rng: &mut R,
    ) -> Result<Recommendation, RecommendationError> {
        let filter = pick_score_filter(rng.gen::<f64>());

        let mut pool = store.find_all(Some(filter)).await?;
        if pool.is_empty() {
            log::debug!("No recommendations in band {:?}, using all", filter);
            pool = store.find_all(None).await?;
        }

        if pool.is_empty() {
            return Err(RecommendationError::NotFound(
                "No recommendations available".to_string(),
            ));
        }

        let index = rng.gen_range(0..pool.len());
        Ok(pool.swap_remove(index))
    }

    /// Delete every recommendation
    pub async fn reset(
        store: &dyn RecommendationStore,
    ) -> Result<ResetResponse, RecommendationError> {
        let deleted = store.remove_all().await?;
        log::warn!("Recommendations reset: {} deleted", deleted);
        Ok(ResetResponse { deleted })
    }

    pub async fn stats(
        store: &dyn RecommendationStore,
    ) -> Result<StatsResponse, RecommendationError> {
        Ok(StatsResponse {
            total_recommendations: store.count().await?,
        })
    }
}

/// Map a uniform draw in [0, 1) to the score band to pick from
pub fn pick_score_filter(roll: f64) -> ScoreFilter {
    if roll < POPULAR_PICK_RATIO {
        ScoreFilter::Gt
    } else {
        ScoreFilter::Lte
    }
}

fn not_found(id: i32) -> RecommendationError {
    RecommendationError::NotFound(format!("Recommendation {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryRecommendationRepository;
    use tokio_test::{assert_err, assert_ok};

    const LINK: &str = "https://www.youtube.com/watch?v=bOhasdCq1OU";

    fn request(name: &str) -> CreateRecommendationRequest {
        CreateRecommendationRequest {
            name: name.to_string(),
            youtube_link: LINK.to_string(),
        }
    }

    async fn seeded(store: &InMemoryRecommendationRepository, name: &str, score: i32) -> i32 {
        let rec = RecommendationService::insert(store, request(name)).await.unwrap();
        store.update_score(rec.id, score).await.unwrap();
        rec.id
    }

    #[tokio::test]
    async fn test_insert_starts_at_zero() {
        let store = InMemoryRecommendationRepository::new();
        let rec = assert_ok!(RecommendationService::insert(&store, request("Song")).await);

        assert_eq!(rec.score, 0);
        assert_eq!(rec.name, "Song");
    }

    #[tokio::test]
    async fn test_insert_duplicate_name_conflicts() {
        let store = InMemoryRecommendationRepository::new();
        assert_ok!(RecommendationService::insert(&store, request("Song")).await);

        let err = assert_err!(RecommendationService::insert(&store, request("Song")).await);
        assert!(matches!(err, RecommendationError::Conflict(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upvote_missing_is_not_found() {
        let store = InMemoryRecommendationRepository::new();
        let err = assert_err!(RecommendationService::upvote(&store, 999999).await);
        assert!(matches!(err, RecommendationError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_upvote_increments_by_one() {
        let store = InMemoryRecommendationRepository::new();
        let id = seeded(&store, "Song", 4).await;

        let vote = assert_ok!(RecommendationService::upvote(&store, id).await);
        assert_eq!(vote.score, 5);
        assert!(!vote.removed);
        assert_eq!(store.find(id).await.unwrap().unwrap().score, 5);
    }

    #[tokio::test]
    async fn test_downvote_missing_is_not_found() {
        let store = InMemoryRecommendationRepository::new();
        let err = assert_err!(RecommendationService::downvote(&store, 1).await);
        assert!(matches!(err, RecommendationError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_downvote_decrements_by_one() {
        let store = InMemoryRecommendationRepository::new();
        let id = seeded(&store, "Song", 0).await;

        let vote = assert_ok!(RecommendationService::downvote(&store, id).await);
        assert_eq!(vote.score, -1);
        assert!(!vote.removed);
        assert!(store.find(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_downvote_at_minimum_keeps_record() {
        let store = InMemoryRecommendationRepository::new();
        let id = seeded(&store, "Song", MIN_SCORE + 1).await;

        let vote = assert_ok!(RecommendationService::downvote(&store, id).await);
        assert_eq!(vote.score, MIN_SCORE);
        assert!(!vote.removed);
        assert!(store.find(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_downvote_below_minimum_removes_record() {
        let store = InMemoryRecommendationRepository::new();
        let id = seeded(&store, "Song", 0).await;

        for _ in 0..5 {
            assert_ok!(RecommendationService::downvote(&store, id).await);
        }
        let vote = assert_ok!(RecommendationService::downvote(&store, id).await);

        assert_eq!(vote.score, -6);
        assert!(vote.removed);
        assert!(store.find(id).await.unwrap().is_none());

        let err = assert_err!(RecommendationService::downvote(&store, id).await);
        assert!(matches!(err, RecommendationError::NotFound(_)));
    }

    #[test]
    fn test_pick_score_filter_split() {
        assert_eq!(pick_score_filter(0.0), ScoreFilter::Gt);
        assert_eq!(pick_score_filter(0.69), ScoreFilter::Gt);
        assert_eq!(pick_score_filter(0.7), ScoreFilter::Lte);
        assert_eq!(pick_score_filter(0.99), ScoreFilter::Lte);
    }

    #[tokio::test]
    async fn test_random_on_empty_store_is_not_found() {
        let store = InMemoryRecommendationRepository::new();
        let err = assert_err!(RecommendationService::get_random(&store).await);
        assert!(matches!(err, RecommendationError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_random_falls_back_to_all() {
        let store = InMemoryRecommendationRepository::new();
        let id = seeded(&store, "Only unpopular", 0).await;
        let mut rng = StdRng::seed_from_u64(7);

        // Every draw must succeed even when the Gt band is empty
        for _ in 0..50 {
            let rec = assert_ok!(RecommendationService::get_random_with_rng(&store, &mut rng).await);
            assert_eq!(rec.id, id);
        }
    }

    #[tokio::test]
    async fn test_random_prefers_popular() {
        let store = InMemoryRecommendationRepository::new();
        let popular = seeded(&store, "Popular", 50).await;
        seeded(&store, "Unpopular", 1).await;
        let mut rng = StdRng::seed_from_u64(42);

        let mut popular_hits = 0;
        for _ in 0..1000 {
            let rec = RecommendationService::get_random_with_rng(&store, &mut rng)
                .await
                .unwrap();
            if rec.id == popular {
                popular_hits += 1;
            }
        }

        assert!(
            (620..=780).contains(&popular_hits),
            "popular picked {} times out of 1000",
            popular_hits
        );
    }

    #[tokio::test]
    async fn test_get_top() {
        let store = InMemoryRecommendationRepository::new();
        seeded(&store, "Low", -2).await;
        seeded(&store, "High", 30).await;
        seeded(&store, "Mid", 8).await;

        let top = assert_ok!(RecommendationService::get_top(&store, 2).await);
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid"]);

        let err = assert_err!(RecommendationService::get_top(&store, 0).await);
        assert!(matches!(err, RecommendationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_list_caps_at_latest_limit() {
        let store = InMemoryRecommendationRepository::new();
        for i in 0..12 {
            seeded(&store, &format!("Song {}", i), 0).await;
        }

        let latest = assert_ok!(RecommendationService::list(&store).await);
        assert_eq!(latest.len() as i64, LATEST_LIMIT);
        assert_eq!(latest[0].name, "Song 11");
    }

    #[tokio::test]
    async fn test_reset_and_stats() {
        let store = InMemoryRecommendationRepository::new();
        seeded(&store, "A", 0).await;
        seeded(&store, "B", 0).await;

        assert_eq!(RecommendationService::stats(&store).await.unwrap().total_recommendations, 2);
        assert_eq!(RecommendationService::reset(&store).await.unwrap().deleted, 2);
        assert_eq!(RecommendationService::stats(&store).await.unwrap().total_recommendations, 0);
    }
}
