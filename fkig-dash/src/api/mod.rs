//! HTTP API handlers for fkig-dash

pub mod buildinfo;
pub mod health;
pub mod query;
pub mod recommendations;
pub mod ui;
pub mod views;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use query::{ApiError, DashboardQuery};
pub use recommendations::get_recommendations;
pub use ui::{serve_app_js, serve_index};
pub use views::{
    get_debug_info, get_filter_options, get_kpis, get_lang_area_pivot, get_lang_content, get_map,
    get_top_areas,
};
