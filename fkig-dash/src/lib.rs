//! fkig-dash library - read-only insights dashboard
//!
//! Serves JSON views over the refined posts table plus a static UI.

use axum::Router;
use fkig_common::Dataset;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded posts table (read-only, refined at load time)
    pub dataset: Arc<Dataset>,
}

impl AppState {
    /// Create new application state
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }
}

/// Build application router
///
/// Every route is a read-only GET; there is no authentication layer.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/options", get(api::get_filter_options))
        .route("/api/kpis", get(api::get_kpis))
        .route("/api/pivot/lang-area", get(api::get_lang_area_pivot))
        .route("/api/top-areas", get(api::get_top_areas))
        .route("/api/lang-content", get(api::get_lang_content))
        .route("/api/map", get(api::get_map))
        .route("/api/recommendations", get(api::get_recommendations))
        .route("/api/debug", get(api::get_debug_info));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
