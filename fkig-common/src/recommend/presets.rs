//! Per-language hashtag presets
//!
//! Keys are normalized language keys (see [`super::tags::lang_key`]).
//! Content-type keys match the `content_type` column verbatim.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Base tags used when a language key has no preset
pub const DEFAULT_BASE_TAGS: &[&str] = &["#fukuoka"];

/// Base hashtags for one language plus content-type specific extras
#[derive(Debug)]
pub struct TagPreset {
    pub base: Vec<&'static str>,
    pub content: HashMap<&'static str, Vec<&'static str>>,
}

impl TagPreset {
    fn new(base: &[&'static str], content: &[(&'static str, &[&'static str])]) -> Self {
        Self {
            base: base.to_vec(),
            content: content
                .iter()
                .map(|(key, tags)| (*key, tags.to_vec()))
                .collect(),
        }
    }

    /// Content tags for a content type; empty when unknown
    pub fn content_tags(&self, content_type: &str) -> &[&'static str] {
        self.content
            .get(content_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

static TAG_PRESETS: Lazy<HashMap<&'static str, TagPreset>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert(
        "en",
        TagPreset::new(
            &["#fukuoka", "#japantravel", "#visitjapan"],
            &[
                ("food", &["#food", "#ramen", "#streetfood"]),
                ("nature", &["#nature", "#beach", "#sunset"]),
                ("night", &["#nightview", "#lanterns", "#nightlife"]),
                ("culture", &["#shrine", "#temple", "#castle"]),
            ],
        ),
    );

    m.insert(
        "ko",
        TagPreset::new(
            &["#후쿠오카", "#후쿠오카여행", "#일본여행"],
            &[
                ("food", &["#맛집", "#라멘", "#야타이"]),
                ("nature", &["#자연", "#바다", "#노을"]),
                ("night", &["#야경", "#나이트라이프", "#야타이"]),
                ("culture", &["#신社", "#사찰", "#성곽"]),
            ],
        ),
    );

    m.insert(
        "zh-cn",
        TagPreset::new(
            &["#福冈", "#日本旅行", "#福冈旅行"],
            &[
                ("food", &["#美食", "#拉面", "#路边摊"]),
                ("nature", &["#自然", "#海滩", "#日落"]),
                ("night", &["#夜景", "#街头小吃", "#夜生活"]),
                ("culture", &["#神社", "#寺庙", "#城堡"]),
            ],
        ),
    );

    m.insert(
        "zh-tw",
        TagPreset::new(
            &["#福岡", "#日本旅遊", "#福岡旅遊"],
            &[
                ("food", &["#美食", "#拉麵", "#攤販"]),
                ("nature", &["#自然", "#海邊", "#日落"]),
                ("night", &["#夜景", "#街頭小吃", "#夜生活"]),
                ("culture", &["#神社", "#寺廟", "#城堡"]),
            ],
        ),
    );

    m.insert(
        "ja",
        TagPreset::new(
            &["#福岡", "#福岡旅行"],
            &[
                ("food", &["#福岡グルメ", "#博多ラーメン", "#屋台"]),
                ("nature", &["#糸島", "#海", "#夕日"]),
                ("night", &["#中洲", "#夜景", "#提灯"]),
                ("culture", &["#太宰府", "#神社", "#城跡"]),
            ],
        ),
    );

    m
});

/// Preset for a normalized language key, if one exists
pub fn preset(key: &str) -> Option<&'static TagPreset> {
    TAG_PRESETS.get(key)
}

/// Base tags for a key, falling back to [`DEFAULT_BASE_TAGS`]
pub fn base_tags(key: &str) -> &'static [&'static str] {
    preset(key)
        .map(|p| p.base.as_slice())
        .unwrap_or(DEFAULT_BASE_TAGS)
}

/// Content tags for (key, content type); empty when either is unknown
pub fn content_tags(key: &str, content_type: &str) -> &'static [&'static str] {
    preset(key)
        .map(|p| p.content_tags(content_type))
        .unwrap_or(&[])
}
