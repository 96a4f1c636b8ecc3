//! Dashboard views over a filtered post set
//!
//! Each function takes the already-filtered posts (`&[&Post]`) and returns a
//! serializable view. Empty input always yields an empty view.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::{area_key, content_key, group_mean, rank_descending, round1, FilterOptions, GroupMean};
use crate::posts::{Dataset, Post};

/// Headline numbers for the current filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub posts: usize,
    /// `None` when no posts match
    pub avg_engagement: Option<f64>,
    pub unique_areas: usize,
}

pub fn kpis(posts: &[&Post]) -> Kpis {
    let avg_engagement = if posts.is_empty() {
        None
    } else {
        Some(posts.iter().map(|p| p.engagement).sum::<f64>() / posts.len() as f64)
    };

    let unique_areas = posts
        .iter()
        .filter_map(|p| p.location_name.as_deref())
        .collect::<BTreeSet<_>>()
        .len();

    Kpis {
        posts: posts.len(),
        avg_engagement,
        unique_areas,
    }
}

/// Language × area table of mean engagement (one decimal, missing = 0)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LangAreaPivot {
    /// Row labels (`lang2`)
    pub langs: Vec<String>,
    /// Column labels (area names)
    pub areas: Vec<String>,
    /// `cells[row][col]`
    pub cells: Vec<Vec<f64>>,
}

pub fn lang_area_pivot(posts: &[&Post]) -> LangAreaPivot {
    let groups = group_mean(posts.iter().copied(), |p| {
        area_key(p).map(|area| (p.lang2.as_str(), area))
    });

    let langs: Vec<&str> = groups
        .iter()
        .map(|g| g.key.0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let areas: Vec<&str> = groups
        .iter()
        .map(|g| g.key.1)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut cells = vec![vec![0.0; areas.len()]; langs.len()];
    for g in &groups {
        // Both lists are sorted, so binary search always hits
        if let (Ok(row), Ok(col)) = (langs.binary_search(&g.key.0), areas.binary_search(&g.key.1)) {
            cells[row][col] = round1(g.mean);
        }
    }

    LangAreaPivot {
        langs: langs.into_iter().map(str::to_string).collect(),
        areas: areas.into_iter().map(str::to_string).collect(),
        cells,
    }
}

/// "Top N" slider value, clamped to 3..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopN(usize);

impl TopN {
    pub const MIN: usize = 3;
    pub const MAX: usize = 10;
    pub const DEFAULT: usize = 5;

    pub fn new(n: usize) -> Self {
        Self(n.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// A high-engagement post shown as an example for a language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamplePost {
    pub location_name: Option<String>,
    pub post_url: String,
    pub engagement: f64,
    pub hashtags: Vec<String>,
}

/// Ranked areas plus example posts for one language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageTopAreas {
    pub lang2: String,
    pub areas: Vec<GroupMean<String>>,
    pub examples: Vec<ExamplePost>,
}

/// Number of example posts listed per language
pub const EXAMPLE_POSTS: usize = 5;

/// Per language (ascending), the `top_n` areas by mean engagement
pub fn top_areas_by_language(posts: &[&Post], top_n: TopN) -> Vec<LanguageTopAreas> {
    let langs: BTreeSet<&str> = posts
        .iter()
        .filter(|p| area_key(p).is_some())
        .map(|p| p.lang2.as_str())
        .collect();

    langs
        .into_iter()
        .map(|lang2| {
            let segment: Vec<&Post> = posts.iter().copied().filter(|p| p.lang2 == lang2).collect();

            let mut areas = group_mean(segment.iter().copied(), area_key);
            rank_descending(&mut areas);
            areas.truncate(top_n.get());

            LanguageTopAreas {
                lang2: lang2.to_string(),
                areas: areas
                    .into_iter()
                    .map(|g| GroupMean {
                        key: g.key.to_string(),
                        mean: g.mean,
                        count: g.count,
                    })
                    .collect(),
                examples: example_posts(&segment, EXAMPLE_POSTS),
            }
        })
        .collect()
}

/// Highest-engagement posts that have a URL, best first
pub fn example_posts(posts: &[&Post], limit: usize) -> Vec<ExamplePost> {
    let mut ranked: Vec<&Post> = posts.to_vec();
    ranked.sort_by(|a, b| {
        b.engagement
            .partial_cmp(&a.engagement)
            .unwrap_or(Ordering::Equal)
    });

    ranked
        .into_iter()
        .filter_map(|p| {
            p.post_url.as_ref().map(|url| ExamplePost {
                location_name: p.location_name.clone(),
                post_url: url.clone(),
                engagement: p.engagement,
                hashtags: p.hashtags_list.clone(),
            })
        })
        .take(limit)
        .collect()
}

/// One bar of the language × content-type chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBar {
    pub lang2: String,
    pub content_type: String,
    pub mean: f64,
}

/// Mean engagement per (language, content type), language ascending then
/// engagement descending
pub fn lang_content_bars(posts: &[&Post]) -> Vec<ContentBar> {
    let mut groups = group_mean(posts.iter().copied(), |p| {
        content_key(p).map(|content| (p.lang2.as_str(), content))
    });

    // Stable: sort by mean first, then by language keeps the mean order within a language
    rank_descending(&mut groups);
    groups.sort_by(|a, b| a.key.0.cmp(b.key.0));

    groups
        .into_iter()
        .map(|g| ContentBar {
            lang2: g.key.0.to_string(),
            content_type: g.key.1.to_string(),
            mean: g.mean,
        })
        .collect()
}

/// Debug panel contents
#[derive(Debug, Clone, Serialize)]
pub struct DebugInfo {
    /// Path the table was loaded from (empty for in-memory data)
    pub source: String,
    pub dataset_posts: usize,
    pub filtered_posts: usize,
    pub options: FilterOptions,
}

impl DebugInfo {
    pub fn new(dataset: &Dataset, filtered: &[&Post]) -> Self {
        Self {
            source: dataset.source.display().to_string(),
            dataset_posts: dataset.len(),
            filtered_posts: filtered.len(),
            options: FilterOptions::from_posts(&dataset.posts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::post;
    use super::*;

    fn sample() -> Vec<Post> {
        vec![
            post("en", Some("Hakata"), Some("food"), 100.0),
            post("en", Some("Hakata"), Some("night"), 50.0),
            post("en", Some("Tenjin"), Some("food"), 20.0),
            post("ko", Some("Tenjin"), Some("night"), 80.0),
            post("ko", None, Some("food"), 10.0),
        ]
    }

    #[test]
    fn test_kpis() {
        let posts = sample();
        let refs: Vec<&Post> = posts.iter().collect();
        let k = kpis(&refs);

        assert_eq!(k.posts, 5);
        assert_eq!(k.avg_engagement, Some(52.0));
        assert_eq!(k.unique_areas, 2);
    }

    #[test]
    fn test_kpis_empty() {
        let k = kpis(&[]);
        assert_eq!(k.posts, 0);
        assert!(k.avg_engagement.is_none());
        assert_eq!(k.unique_areas, 0);
    }

    #[test]
    fn test_pivot_fills_missing_with_zero() {
        let posts = sample();
        let refs: Vec<&Post> = posts.iter().collect();
        let pivot = lang_area_pivot(&refs);

        assert_eq!(pivot.langs, vec!["en", "ko"]);
        assert_eq!(pivot.areas, vec!["Hakata", "Tenjin"]);
        assert_eq!(pivot.cells, vec![vec![75.0, 20.0], vec![0.0, 80.0]]);
    }

    #[test]
    fn test_top_n_clamps() {
        assert_eq!(TopN::new(1).get(), 3);
        assert_eq!(TopN::new(7).get(), 7);
        assert_eq!(TopN::new(50).get(), 10);
        assert_eq!(TopN::default().get(), 5);
    }

    #[test]
    fn test_top_areas_by_language() {
        let posts = sample();
        let refs: Vec<&Post> = posts.iter().collect();
        let top = top_areas_by_language(&refs, TopN::default());

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].lang2, "en");
        assert_eq!(top[0].areas[0].key, "Hakata");
        assert_eq!(top[0].areas[0].mean, 75.0);
        assert_eq!(top[1].areas.len(), 1);
    }

    #[test]
    fn test_example_posts_require_url() {
        let mut posts = sample();
        posts[0].post_url = Some("https://example.com/a".into());
        posts[3].post_url = Some("https://example.com/b".into());
        let refs: Vec<&Post> = posts.iter().collect();

        let examples = example_posts(&refs, 5);
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].post_url, "https://example.com/a");
        assert_eq!(examples[1].engagement, 80.0);
    }

    #[test]
    fn test_example_posts_carry_hashtags() {
        let mut posts = sample();
        posts[0].post_url = Some("https://example.com/a".into());
        posts[0].hashtags_list = vec!["#hakata".to_string(), "#ramen".to_string()];
        let refs: Vec<&Post> = posts.iter().collect();

        let examples = example_posts(&refs, 5);
        assert_eq!(examples[0].hashtags, vec!["#hakata", "#ramen"]);
    }

    #[test]
    fn test_debug_info_reports_source() {
        let mut dataset = Dataset::from_posts(sample());
        dataset.source = std::path::PathBuf::from("/srv/fkig/posts.csv");
        let filtered: Vec<&Post> = dataset.posts.iter().filter(|p| p.lang2 == "ko").collect();

        let info = DebugInfo::new(&dataset, &filtered);
        assert_eq!(info.source, "/srv/fkig/posts.csv");
        assert_eq!(info.dataset_posts, 5);
        assert_eq!(info.filtered_posts, 2);
        assert_eq!(info.options.langs, vec!["en", "ko"]);
    }

    #[test]
    fn test_lang_content_bars_order() {
        let posts = sample();
        let refs: Vec<&Post> = posts.iter().collect();
        let bars = lang_content_bars(&refs);

        let labels: Vec<(&str, &str)> = bars
            .iter()
            .map(|b| (b.lang2.as_str(), b.content_type.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![("en", "food"), ("en", "night"), ("ko", "night"), ("ko", "food")]
        );
        assert_eq!(bars[0].mean, 60.0);
    }
}
