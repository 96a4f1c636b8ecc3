//! Per-language recommendation records
//!
//! For every `lang2` segment in the filtered set: rank areas and content types
//! by mean engagement, pick the top of each, build the hashtag line and render
//! a guidance block.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::tags::build_tags;
use crate::analytics::{area_key, content_key, group_mean, rank_descending};
use crate::posts::Post;

/// Shown in place of a missing top area / content type
pub const PLACEHOLDER: &str = "-";

/// Recommended posting window, identical for every segment
pub const POSTING_WINDOW: &str = "金/土 19–22時";

/// Top area and content type for one language segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStat {
    pub lang2: String,
    pub top_area: Option<String>,
    pub top_area_engagement: Option<f64>,
    pub top_content: Option<String>,
    pub top_content_engagement: Option<f64>,
}

/// Highest mean-engagement key within a segment, if any row is rankable
fn top_by<'a, F>(segment: &[&'a Post], key_fn: F) -> Option<(String, f64)>
where
    F: Fn(&'a Post) -> Option<&'a str>,
{
    let mut ranked = group_mean(segment.iter().copied(), key_fn);
    rank_descending(&mut ranked);
    ranked
        .into_iter()
        .next()
        .map(|g| (g.key.to_string(), g.mean))
}

/// One stat per distinct `lang2`, in ascending tag order
///
/// A segment appears even when none of its rows has an area or content type;
/// the missing side is simply `None`.
pub fn segment_stats(posts: &[&Post]) -> Vec<SegmentStat> {
    let langs: BTreeSet<&str> = posts.iter().map(|p| p.lang2.as_str()).collect();

    langs
        .into_iter()
        .map(|lang2| {
            let segment: Vec<&Post> = posts.iter().copied().filter(|p| p.lang2 == lang2).collect();
            let top_area = top_by(&segment, area_key);
            let top_content = top_by(&segment, content_key);

            SegmentStat {
                lang2: lang2.to_string(),
                top_area_engagement: top_area.as_ref().map(|(_, e)| *e),
                top_area: top_area.map(|(a, _)| a),
                top_content_engagement: top_content.as_ref().map(|(_, e)| *e),
                top_content: top_content.map(|(c, _)| c),
            }
        })
        .collect()
}

/// Guidance for one language segment, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub lang2: String,
    /// Top area or [`PLACEHOLDER`]
    pub top_area: String,
    /// Top content type or [`PLACEHOLDER`]
    pub top_content: String,
    pub posting_window: String,
    /// Space-joined hashtags, at most `limit` of them
    pub hashtags: String,
    pub content_example: String,
}

impl Recommendation {
    pub fn from_stat(stat: &SegmentStat, limit: usize) -> Self {
        let hashtags = build_tags(
            &stat.lang2,
            stat.top_area.as_deref(),
            stat.top_content.as_deref(),
            limit,
        );

        let top_area = stat.top_area.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
        let top_content = stat
            .top_content
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        Self {
            content_example: format!(
                "{} の {} の魅力が伝わる1枚（人物＋背景）",
                top_area, top_content
            ),
            lang2: stat.lang2.clone(),
            top_area,
            top_content,
            posting_window: POSTING_WINDOW.to_string(),
            hashtags,
        }
    }

    /// Markdown guidance block
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**[{}] 推し資源**  ", self.lang2)?;
        writeln!(f, "・**エリアTop1**：{}  ", self.top_area)?;
        writeln!(f, "・**コンテンツTop1**：{}  ", self.top_content)?;
        writeln!(f)?;
        writeln!(f, "**推奨運用**  ")?;
        writeln!(f, "・投稿時間：{}  ", self.posting_window)?;
        writeln!(f, "・推奨タグ：{}  ", self.hashtags)?;
        write!(f, "・内容例：{}", self.content_example)
    }
}

/// Recommendations for every segment in the filtered set; empty in, empty out
pub fn recommend(posts: &[&Post], limit: usize) -> Vec<Recommendation> {
    segment_stats(posts)
        .iter()
        .map(|stat| Recommendation::from_stat(stat, limit))
        .collect()
}
