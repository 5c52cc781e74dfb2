// src/handlers/recommendations.rs
// DOCUMENTATION: HTTP handlers for recommendation operations
// PURPOSE: Parse requests, call services, return responses

use crate::db::RecommendationStore;
use crate::errors::RecommendationError;
use crate::models::CreateRecommendationRequest;
use crate::services::RecommendationService;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// POST /recommendations
/// Create a new recommendation
pub async fn create_recommendation(
    store: web::Data<dyn RecommendationStore>,
    req: web::Json<CreateRecommendationRequest>,
) -> Result<impl Responder, RecommendationError> {
    req.validate()?;

    let recommendation = RecommendationService::insert(store.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(recommendation))
}

/// POST /recommendations/{id}/upvote
pub async fn upvote(
    store: web::Data<dyn RecommendationStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, RecommendationError> {
    let vote = RecommendationService::upvote(store.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(vote))
}

/// POST /recommendations/{id}/downvote
/// The record is deleted when its score drops below the minimum
pub async fn downvote(
    store: web::Data<dyn RecommendationStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, RecommendationError> {
    let vote = RecommendationService::downvote(store.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(vote))
}

/// GET /recommendations
/// Latest recommendations, newest first
pub async fn list_recommendations(
    store: web::Data<dyn RecommendationStore>,
) -> Result<impl Responder, RecommendationError> {
    let recommendations = RecommendationService::list(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(recommendations))
}

/// GET /recommendations/{id}
pub async fn get_recommendation(
    store: web::Data<dyn RecommendationStore>,
    path: web::Path<i32>,
) -> Result<impl Responder, RecommendationError> {
    let recommendation =
        RecommendationService::get_by_id_or_fail(store.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(recommendation))
}

/// GET /recommendations/random
pub async fn random_recommendation(
    store: web::Data<dyn RecommendationStore>,
) -> Result<impl Responder, RecommendationError> {
    let recommendation = RecommendationService::get_random(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(recommendation))
}

/// GET /recommendations/top/{amount}
pub async fn top_recommendations(
    store: web::Data<dyn RecommendationStore>,
    path: web::Path<i64>,
) -> Result<impl Responder, RecommendationError> {
    let recommendations =
        RecommendationService::get_top(store.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(recommendations))
}

/// Malformed bodies and path segments are reported as 422
fn extractor_configs() -> (web::JsonConfig, web::PathConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        RecommendationError::ValidationError(err.to_string()).into()
    });
    let path = web::PathConfig::default().error_handler(|err, _req| {
        RecommendationError::ValidationError(err.to_string()).into()
    });
    (json, path)
}

/// Configuration for recommendation routes
pub fn config(cfg: &mut web::ServiceConfig) {
    let (json_config, path_config) = extractor_configs();

    cfg.service(
        web::scope("/recommendations")
            .app_data(json_config)
            .app_data(path_config)
            .route("", web::post().to(create_recommendation))
            .route("", web::get().to(list_recommendations))
            .route("/random", web::get().to(random_recommendation))
            .route("/top/{amount}", web::get().to(top_recommendations))
            .route("/{id}", web::get().to(get_recommendation))
            .route("/{id}/upvote", web::post().to(upvote))
            .route("/{id}/downvote", web::post().to(downvote)),
    );
}
