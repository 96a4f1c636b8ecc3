//! Rule-based PR suggestions per language

use axum::{
    extract::{Query, State},
    Json,
};
use fkig_common::recommend::{recommend, Recommendation, DEFAULT_TAG_LIMIT};
use serde::Serialize;

use super::query::{ApiError, DashboardQuery};
use crate::AppState;

/// Upper bound on the hashtag limit a client may request
const MAX_TAG_LIMIT: usize = 30;

/// One language segment's recommendation plus its rendered markdown block
#[derive(Debug, Serialize)]
pub struct RecommendationEntry {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub block: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub limit: usize,
    pub recommendations: Vec<RecommendationEntry>,
}

/// GET /api/recommendations?limit=8
///
/// One entry per `lang2` segment in the filtered set; empty when nothing matches.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let filter = query.to_filter()?;
    let posts = filter.apply(&state.dataset.posts);
    let limit = query.limit.unwrap_or(DEFAULT_TAG_LIMIT).min(MAX_TAG_LIMIT);

    let recommendations = recommend(&posts, limit)
        .into_iter()
        .map(|recommendation| RecommendationEntry {
            block: recommendation.render(),
            recommendation,
        })
        .collect();

    Ok(Json(RecommendationsResponse {
        limit,
        recommendations,
    }))
}
