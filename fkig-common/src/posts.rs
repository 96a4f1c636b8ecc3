//! Post model and CSV loading
//!
//! The posts table is read once, refined (`lang2` assigned) and then treated
//! as read-only for the lifetime of the process. Every column is optional;
//! blank or unparseable cells become `None` rather than failing the load.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::lang::refine_posts;
use crate::Result;

/// One social-media post after loading and language refinement
#[derive(Debug, Clone, Default, Serialize)]
pub struct Post {
    pub post_id: Option<String>,
    pub post_url: Option<String>,
    pub caption: Option<String>,
    /// Raw comma-delimited hashtag string
    pub hashtags: Option<String>,
    /// `hashtags` split on commas, trimmed, blanks dropped
    pub hashtags_list: Vec<String>,
    /// Coarse language code from the source table (empty when missing)
    pub lang: String,
    /// Refined language tag; never `zh` once loading completes
    pub lang2: String,
    pub location_name: Option<String>,
    pub content_type: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub posted_at: Option<NaiveDateTime>,
    pub likes: f64,
    pub comments: f64,
    pub engagement: f64,
}

/// Row as it appears in the CSV; all cells optional
#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(default)]
    post_id: Option<String>,
    #[serde(default)]
    post_url: Option<String>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    hashtags: Option<String>,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    location_name: Option<String>,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    lng: Option<f64>,
    #[serde(default)]
    posted_at: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    likes: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    comments: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    engagement: Option<f64>,
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        let hashtags = non_blank(raw.hashtags);
        let hashtags_list = hashtags
            .as_deref()
            .map(split_hashtags)
            .unwrap_or_default();

        let likes = raw.likes.filter(|v| v.is_finite()).unwrap_or(0.0);
        let comments = raw.comments.filter(|v| v.is_finite()).unwrap_or(0.0);
        // A precomputed engagement column wins over the likes/comments formula
        let engagement = raw
            .engagement
            .filter(|v| v.is_finite())
            .unwrap_or(likes + 2.0 * comments);

        let posted_at = raw.posted_at.as_deref().and_then(|s| {
            let parsed = parse_timestamp(s);
            if parsed.is_none() && !s.trim().is_empty() {
                warn!("Unparseable posted_at '{}' - treating as missing", s);
            }
            parsed
        });

        let lang = non_blank(raw.lang).unwrap_or_default();

        Post {
            post_id: non_blank(raw.post_id),
            post_url: non_blank(raw.post_url),
            caption: non_blank(raw.caption),
            hashtags,
            hashtags_list,
            lang2: lang.clone(),
            lang,
            location_name: non_blank(raw.location_name),
            content_type: non_blank(raw.content_type),
            lat: raw.lat.filter(|v| v.is_finite()),
            lng: raw.lng.filter(|v| v.is_finite()),
            posted_at,
            likes,
            comments,
            engagement,
        }
    }
}

/// Loaded, refined posts table
#[derive(Debug, Default)]
pub struct Dataset {
    /// Source path (empty for in-memory datasets)
    pub source: PathBuf,
    pub posts: Vec<Post>,
}

impl Dataset {
    /// Build a dataset from already-constructed posts, running language refinement
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        refine_posts(&mut posts);
        Self {
            source: PathBuf::new(),
            posts,
        }
    }

    /// Parse CSV from any reader and refine languages
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut posts = Vec::new();
        for result in rdr.deserialize::<RawPost>() {
            posts.push(Post::from(result?));
        }

        Ok(Self::from_posts(posts))
    }

    /// Load and refine the posts table at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut dataset = Self::from_reader(file)?;
        dataset.source = path.to_path_buf();

        info!("Loaded {} posts from {}", dataset.posts.len(), path.display());
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

static DATASET_CACHE: Lazy<Mutex<HashMap<PathBuf, Arc<Dataset>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Load a dataset, reusing the cached copy for the same canonical path
///
/// The table is static input, so the first successful load is kept for the
/// rest of the process.
pub fn load_cached(path: &Path) -> Result<Arc<Dataset>> {
    let key = path.canonicalize()?;

    {
        let cache = DATASET_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(dataset) = cache.get(&key) {
            debug!("Dataset cache hit: {}", key.display());
            return Ok(Arc::clone(dataset));
        }
    }

    let dataset = Arc::new(Dataset::load(&key)?);

    let mut cache = DATASET_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    let entry = cache.entry(key).or_insert_with(|| Arc::clone(&dataset));
    Ok(Arc::clone(entry))
}

/// Trimmed value, or `None` when missing or blank
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Split a comma-delimited hashtag string
pub fn split_hashtags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a `posted_at` cell
///
/// Accepts RFC 3339 (offset dropped, local wall time kept), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS`, and bare dates (midnight).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
post_id,post_url,caption,hashtags,lang,location_name,content_type,lat,lng,posted_at,likes,comments
1,https://example.com/p/1,Great ramen,\"#ramen,#fukuoka\",en,Hakata,food,33.59,130.42,2025-09-01 19:30:00,100,10
2,,台北朋友來玩,#福岡,zh,Tenjin,night,33.59,130.40,2025-09-02,50,5
3,,,,zh,,,,,,,
";

    #[test]
    fn test_from_reader_parses_rows() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.posts[0];
        assert_eq!(first.post_id.as_deref(), Some("1"));
        assert_eq!(first.hashtags_list, vec!["#ramen", "#fukuoka"]);
        assert_eq!(first.engagement, 120.0);
        assert_eq!(first.lang2, "en");
        assert!(first.posted_at.is_some());
    }

    #[test]
    fn test_blank_cells_become_none() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let blank = &ds.posts[2];

        assert!(blank.caption.is_none());
        assert!(blank.location_name.is_none());
        assert!(blank.lat.is_none());
        assert!(blank.posted_at.is_none());
        assert_eq!(blank.engagement, 0.0);
        assert!(blank.hashtags_list.is_empty());
        assert_eq!(blank.lang2, "zh-cn");
    }

    #[test]
    fn test_chinese_rows_refined_on_load() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.posts[1].lang, "zh");
        assert_eq!(ds.posts[1].lang2, "zh-tw");
    }

    #[test]
    fn test_engagement_column_overrides_formula() {
        let csv = "lang,likes,comments,engagement\nen,10,10,7\nen,10,10,\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.posts[0].engagement, 7.0);
        assert_eq!(ds.posts[1].engagement, 30.0);
    }

    #[test]
    fn test_invalid_numbers_tolerated() {
        let csv = "lang,lat,lng,likes\nen,north,130.4,lots\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert!(ds.posts[0].lat.is_none());
        assert_eq!(ds.posts[0].lng, Some(130.4));
        assert_eq!(ds.posts[0].likes, 0.0);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2025-10-22T08:00:00+09:00").is_some());
        assert!(parse_timestamp("2025-10-22 08:00:00").is_some());
        assert!(parse_timestamp("2025-10-22T08:00:00").is_some());
        assert!(parse_timestamp("2025-10-22 08:00").is_some());
        assert_eq!(
            parse_timestamp("2025-10-22"),
            NaiveDate::from_ymd_opt(2025, 10, 22).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("  ").is_none());
    }

    #[test]
    fn test_split_hashtags() {
        assert_eq!(split_hashtags("#a, #b,,"), vec!["#a", "#b"]);
        assert!(split_hashtags("").is_empty());
    }
}
