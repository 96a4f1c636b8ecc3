//! Shared query parameters and API errors
//!
//! Filter parameters are comma-separated lists (`lang=en,zh-tw`) and
//! `YYYY-MM-DD` dates (`from`, `to`). Absent or empty parameters mean
//! "no constraint".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use fkig_common::analytics::PostFilter;
use serde::Deserialize;
use serde_json::json;

/// Query parameters accepted by the dashboard views
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub lang: Option<String>,
    pub area: Option<String>,
    pub content_type: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Top-N slider for the attractions view
    pub top_n: Option<usize>,
    /// Hashtag limit for recommendations
    pub limit: Option<usize>,
}

impl DashboardQuery {
    /// Convert to a post filter, rejecting malformed dates
    pub fn to_filter(&self) -> Result<PostFilter, ApiError> {
        let filter = PostFilter {
            langs: split_list(self.lang.as_deref()),
            areas: split_list(self.area.as_deref()),
            content_types: split_list(self.content_type.as_deref()),
            date_from: parse_date("from", self.from.as_deref())?,
            date_to: parse_date("to", self.to.as_deref())?,
        };

        if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
            if from > to {
                return Err(ApiError::InvalidParameter(format!(
                    "from ({}) is after to ({})",
                    from, to
                )));
            }
        }

        Ok(filter)
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_date(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::InvalidParameter(format!("{}: invalid date '{}'", name, v))),
    }
}

/// Dashboard API errors
#[derive(Debug)]
pub enum ApiError {
    InvalidParameter(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidParameter(msg) => {
                (StatusCode::BAD_REQUEST, format!("Invalid parameter: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
