//! Hashtag construction

use std::collections::HashSet;

use super::presets::{base_tags, content_tags};
use crate::lang::{ZH, ZH_CN, ZH_TW};

/// Default number of hashtags in a recommendation
pub const DEFAULT_TAG_LIMIT: usize = 8;

/// Language roots that collapse regional suffixes (`en-US` → `en`)
const ROOT_KEYED_LANGS: &[&str] = &["en", "ko", "ja"];

/// Normalize a refined language tag into a preset lookup key
///
/// `zh`/`zh-cn` → `zh-cn`, `zh-tw` → `zh-tw`, `en-*`/`ko-*`/`ja-*` → root,
/// anything else is returned unchanged.
pub fn lang_key(lang2: &str) -> String {
    if lang2 == ZH || lang2 == ZH_CN {
        return ZH_CN.to_string();
    }
    if lang2 == ZH_TW {
        return ZH_TW.to_string();
    }

    let root = lang2.split('-').next().unwrap_or(lang2);
    if ROOT_KEYED_LANGS.contains(&root) {
        root.to_string()
    } else {
        lang2.to_string()
    }
}

/// `Ohori Park` → `ohoripark`
pub fn slug(s: &str) -> String {
    s.trim().to_lowercase().replace(' ', "")
}

/// Build the recommended hashtag line for a segment
///
/// Order is base tags, then dynamic area/content tags, then content-specific
/// preset tags. Duplicates keep their first position; the result is cut to
/// `limit` tags and space-joined. Missing or blank area/content simply adds
/// no dynamic tag.
pub fn build_tags(lang2: &str, area: Option<&str>, content: Option<&str>, limit: usize) -> String {
    let key = lang_key(lang2);

    let base = base_tags(&key).iter().map(|t| t.to_string());

    let dynamic = [area, content]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("#{}", slug(s)));

    let content_list = content
        .map(|c| content_tags(&key, c))
        .unwrap_or(&[])
        .iter()
        .map(|t| t.to_string());

    let mut seen = HashSet::new();
    base.chain(dynamic)
        .chain(content_list)
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}
