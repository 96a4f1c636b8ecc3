//! Filtering and engagement aggregation over refined posts
//!
//! Everything here recomputes from scratch on each call; nothing is cached
//! between requests except the loaded dataset itself.

pub mod filter;
pub mod map;
pub mod views;

pub use filter::{FilterOptions, PostFilter};
pub use map::{popular_area_map, AreaMarker, PopularAreaMap};
pub use views::{
    example_posts, kpis, lang_area_pivot, lang_content_bars, top_areas_by_language, ContentBar,
    DebugInfo, ExamplePost, Kpis, LangAreaPivot, LanguageTopAreas, TopN,
};

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::posts::Post;

/// Mean engagement for one group key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean<K> {
    pub key: K,
    pub mean: f64,
    pub count: usize,
}

/// Mean engagement grouped by `key_fn`, in ascending key order
///
/// Rows for which `key_fn` returns `None` are skipped, so a group only exists
/// if at least one row has a usable key.
pub fn group_mean<'a, I, K, F>(posts: I, key_fn: F) -> Vec<GroupMean<K>>
where
    I: IntoIterator<Item = &'a Post>,
    K: Ord,
    F: Fn(&'a Post) -> Option<K>,
{
    let mut groups: BTreeMap<K, (f64, usize)> = BTreeMap::new();

    for post in posts {
        if let Some(key) = key_fn(post) {
            let entry = groups.entry(key).or_insert((0.0, 0));
            entry.0 += post.engagement;
            entry.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(key, (sum, count))| GroupMean {
            key,
            mean: sum / count as f64,
            count,
        })
        .collect()
}

/// Stable sort by mean engagement, highest first
///
/// Equal means keep their incoming (ascending key) order.
pub fn rank_descending<K>(groups: &mut [GroupMean<K>]) {
    groups.sort_by(|a, b| b.mean.partial_cmp(&a.mean).unwrap_or(Ordering::Equal));
}

/// Non-blank area name of a post
pub fn area_key(post: &Post) -> Option<&str> {
    non_blank(post.location_name.as_deref())
}

/// Non-blank content type of a post
pub fn content_key(post: &Post) -> Option<&str> {
    non_blank(post.content_type.as_deref())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Round to one decimal place for display tables
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
