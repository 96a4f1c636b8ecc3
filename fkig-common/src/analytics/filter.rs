//! Operator filters: language, area, content type, date range

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::posts::Post;

/// Filter selection; empty lists mean "no constraint"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostFilter {
    #[serde(default)]
    pub langs: Vec<String>,
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default)]
    pub content_types: Vec<String>,
    /// Inclusive first day
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Inclusive last day (the whole day is covered)
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}

impl PostFilter {
    /// True if no constraint is set
    pub fn is_unconstrained(&self) -> bool {
        self.langs.is_empty()
            && self.areas.is_empty()
            && self.content_types.is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Whether a single post passes every selected constraint
    ///
    /// Posts without a timestamp fail any date bound.
    pub fn matches(&self, post: &Post) -> bool {
        if !self.langs.is_empty() && !self.langs.iter().any(|l| *l == post.lang2) {
            return false;
        }
        if !selected(&self.areas, post.location_name.as_deref()) {
            return false;
        }
        if !selected(&self.content_types, post.content_type.as_deref()) {
            return false;
        }

        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(posted_at) = post.posted_at else {
                return false;
            };
            if let Some(from) = self.date_from {
                if posted_at.date() < from {
                    return false;
                }
            }
            if let Some(to) = self.date_to {
                if posted_at.date() > to {
                    return false;
                }
            }
        }

        true
    }

    /// Posts passing the filter, in table order
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|p| self.matches(p)).collect()
    }
}

fn selected(choices: &[String], value: Option<&str>) -> bool {
    if choices.is_empty() {
        return true;
    }
    value.map_or(false, |v| choices.iter().any(|c| c == v))
}

/// Values offered by the filter controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub langs: Vec<String>,
    pub areas: Vec<String>,
    pub content_types: Vec<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl FilterOptions {
    /// Sorted distinct values across the whole table
    pub fn from_posts<'a, I>(posts: I) -> Self
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut langs = BTreeSet::new();
        let mut areas = BTreeSet::new();
        let mut content_types = BTreeSet::new();
        let mut min_ts: Option<NaiveDateTime> = None;
        let mut max_ts: Option<NaiveDateTime> = None;

        for post in posts {
            if !post.lang2.is_empty() {
                langs.insert(post.lang2.clone());
            }
            if let Some(area) = &post.location_name {
                areas.insert(area.clone());
            }
            if let Some(content) = &post.content_type {
                content_types.insert(content.clone());
            }
            if let Some(ts) = post.posted_at {
                min_ts = Some(min_ts.map_or(ts, |m| m.min(ts)));
                max_ts = Some(max_ts.map_or(ts, |m| m.max(ts)));
            }
        }

        Self {
            langs: langs.into_iter().collect(),
            areas: areas.into_iter().collect(),
            content_types: content_types.into_iter().collect(),
            min_date: min_ts.map(|t| t.date()),
            max_date: max_ts.map(|t| t.date()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::parse_timestamp;

    fn post(lang2: &str, area: &str, content: &str, posted_at: Option<&str>) -> Post {
        Post {
            lang2: lang2.to_string(),
            location_name: Some(area.to_string()),
            content_type: Some(content.to_string()),
            posted_at: posted_at.and_then(parse_timestamp),
            ..Post::default()
        }
    }

    fn sample() -> Vec<Post> {
        vec![
            post("en", "Hakata", "food", Some("2025-09-01 10:00:00")),
            post("zh-tw", "Tenjin", "night", Some("2025-09-15 21:30:00")),
            post("ko", "Hakata", "night", Some("2025-09-30 23:59:00")),
            post("en", "Ohori Park", "nature", None),
        ]
    }

    #[test]
    fn test_unconstrained_keeps_everything() {
        let posts = sample();
        let filter = PostFilter::default();
        assert!(filter.is_unconstrained());
        assert_eq!(filter.apply(&posts).len(), 4);
    }

    #[test]
    fn test_language_and_area_filters() {
        let posts = sample();
        let filter = PostFilter {
            langs: vec!["en".into(), "ko".into()],
            areas: vec!["Hakata".into()],
            ..PostFilter::default()
        };

        let kept = filter.apply(&posts);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|p| p.location_name.as_deref() == Some("Hakata")));
    }

    #[test]
    fn test_content_filter() {
        let posts = sample();
        let filter = PostFilter {
            content_types: vec!["night".into()],
            ..PostFilter::default()
        };
        assert_eq!(filter.apply(&posts).len(), 2);
    }

    #[test]
    fn test_date_range_is_inclusive_of_whole_days() {
        let posts = sample();
        let filter = PostFilter {
            date_from: NaiveDate::from_ymd_opt(2025, 9, 15),
            date_to: NaiveDate::from_ymd_opt(2025, 9, 30),
            ..PostFilter::default()
        };

        let kept = filter.apply(&posts);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].lang2, "zh-tw");
        assert_eq!(kept[1].lang2, "ko");
    }

    #[test]
    fn test_date_bound_excludes_undated_posts() {
        let posts = sample();
        let filter = PostFilter {
            date_from: NaiveDate::from_ymd_opt(2000, 1, 1),
            ..PostFilter::default()
        };
        assert_eq!(filter.apply(&posts).len(), 3);
    }

    #[test]
    fn test_filter_options() {
        let posts = sample();
        let options = FilterOptions::from_posts(&posts);

        assert_eq!(options.langs, vec!["en", "ko", "zh-tw"]);
        assert_eq!(options.areas, vec!["Hakata", "Ohori Park", "Tenjin"]);
        assert_eq!(options.content_types, vec!["food", "nature", "night"]);
        assert_eq!(options.min_date, NaiveDate::from_ymd_opt(2025, 9, 1));
        assert_eq!(options.max_date, NaiveDate::from_ymd_opt(2025, 9, 30));
    }
}
