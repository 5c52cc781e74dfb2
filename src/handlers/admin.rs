// src/handlers/admin.rs
// DOCUMENTATION: Admin handlers for maintenance operations
// PURPOSE: Reset the table between end-to-end runs and report counts

use crate::config::Config;
use crate::db::RecommendationStore;
use crate::errors::RecommendationError;
use crate::services::RecommendationService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};

/// POST /admin/reset
/// Delete every recommendation
///
/// DOCUMENTATION: Requires admin authentication via X-Admin-Token header
pub async fn reset(
    store: web::Data<dyn RecommendationStore>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, RecommendationError> {
    verify_admin_token(&req, &config)?;

    let result = RecommendationService::reset(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /admin/stats
pub async fn stats(
    store: web::Data<dyn RecommendationStore>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, RecommendationError> {
    verify_admin_token(&req, &config)?;

    let stats = RecommendationService::stats(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

fn verify_admin_token(req: &HttpRequest, config: &Config) -> Result<(), RecommendationError> {
    let token = req
        .headers()
        .get("X-Admin-Token")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            log::warn!("Admin request without token");
            RecommendationError::Unauthorized
        })?;

    if token != config.admin_token {
        log::warn!("Admin request with invalid token");
        return Err(RecommendationError::Forbidden);
    }

    Ok(())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/reset", web::post().to(reset))
            .route("/stats", web::get().to(stats)),
    );
}
