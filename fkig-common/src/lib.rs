//! # Fukuoka IG Insights Common Library
//!
//! Shared code for the insights dashboard including:
//! - Post model and CSV loading
//! - Chinese language refinement (zh → zh-cn / zh-tw)
//! - Filtering and engagement aggregation
//! - Rule-based hashtag and posting recommendations
//! - Configuration loading

pub mod analytics;
pub mod config;
pub mod error;
pub mod lang;
pub mod posts;
pub mod recommend;

pub use error::{Error, Result};
pub use posts::{Dataset, Post};
