//! Aggregate views over the filtered posts
//!
//! Each handler filters the shared dataset per request and recomputes its
//! view from scratch. An empty filtered set yields empty collections.

use axum::{
    extract::{Query, State},
    Json,
};
use fkig_common::analytics::{
    kpis, lang_area_pivot, lang_content_bars, popular_area_map, top_areas_by_language, ContentBar,
    DebugInfo, FilterOptions, Kpis, LangAreaPivot, LanguageTopAreas, PopularAreaMap, TopN,
};
use fkig_common::Post;
use tracing::debug;

use super::query::{ApiError, DashboardQuery};
use crate::AppState;

/// Apply the request's filter to the dataset
fn filtered<'a>(state: &'a AppState, query: &DashboardQuery) -> Result<Vec<&'a Post>, ApiError> {
    let filter = query.to_filter()?;
    let posts = filter.apply(&state.dataset.posts);
    debug!(
        "Filter {:?} kept {} of {} posts",
        filter,
        posts.len(),
        state.dataset.len()
    );
    Ok(posts)
}

/// GET /api/options
///
/// Distinct languages, areas, content types and the date span of the table.
pub async fn get_filter_options(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(FilterOptions::from_posts(&state.dataset.posts))
}

/// GET /api/kpis
pub async fn get_kpis(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Kpis>, ApiError> {
    let posts = filtered(&state, &query)?;
    Ok(Json(kpis(&posts)))
}

/// GET /api/pivot/lang-area
pub async fn get_lang_area_pivot(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<LangAreaPivot>, ApiError> {
    let posts = filtered(&state, &query)?;
    Ok(Json(lang_area_pivot(&posts)))
}

/// GET /api/top-areas?top_n=5
pub async fn get_top_areas(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<LanguageTopAreas>>, ApiError> {
    let posts = filtered(&state, &query)?;
    let top_n = query.top_n.map(TopN::new).unwrap_or_default();
    Ok(Json(top_areas_by_language(&posts, top_n)))
}

/// GET /api/lang-content
pub async fn get_lang_content(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<ContentBar>>, ApiError> {
    let posts = filtered(&state, &query)?;
    Ok(Json(lang_content_bars(&posts)))
}

/// GET /api/map
pub async fn get_map(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<PopularAreaMap>, ApiError> {
    let posts = filtered(&state, &query)?;
    Ok(Json(popular_area_map(&posts)))
}

/// GET /api/debug
pub async fn get_debug_info(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DebugInfo>, ApiError> {
    let posts = filtered(&state, &query)?;
    Ok(Json(DebugInfo::new(&state.dataset, &posts)))
}
