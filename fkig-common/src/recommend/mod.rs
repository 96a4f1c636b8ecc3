//! Rule-based posting recommendations per language segment

pub mod engine;
pub mod presets;
pub mod tags;

pub use engine::{
    recommend, segment_stats, Recommendation, SegmentStat, PLACEHOLDER, POSTING_WINDOW,
};
pub use presets::{base_tags, content_tags, TagPreset, DEFAULT_BASE_TAGS};
pub use tags::{build_tags, lang_key, slug, DEFAULT_TAG_LIMIT};
