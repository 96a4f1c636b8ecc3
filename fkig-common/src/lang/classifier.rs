//! Chinese variant classifier
//!
//! Layered heuristic, first match wins:
//! 1. Empty text → unresolved
//! 2. Taiwan hint → Traditional
//! 3. Hong Kong hint → Traditional (Hong Kong content is grouped with
//!    Traditional; this is a deliberate simplification, not a misclassification)
//! 4. Mainland hint → Simplified
//! 5. Character tally: more Traditional-set chars → Traditional, more
//!    Simplified-set chars → Simplified, tie → unresolved

use serde::Serialize;

use super::hints::{
    contains_any, HONG_KONG_HINTS, MAINLAND_HINTS, SIMPLIFIED_SET, TAIWAN_HINTS, TRADITIONAL_SET,
};

/// Generic Chinese tag as it appears in the raw `lang` column
pub const ZH: &str = "zh";
/// Simplified Chinese (Mainland)
pub const ZH_CN: &str = "zh-cn";
/// Traditional Chinese (Taiwan, and Hong Kong by policy)
pub const ZH_TW: &str = "zh-tw";

/// Result of classifying one generic-Chinese post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChineseVariant {
    /// No signal either way; resolved to Simplified by the batch pass
    Unresolved,
    Simplified,
    Traditional,
}

impl ChineseVariant {
    /// Language tag for this variant (`zh`, `zh-cn`, `zh-tw`)
    pub fn as_tag(self) -> &'static str {
        match self {
            ChineseVariant::Unresolved => ZH,
            ChineseVariant::Simplified => ZH_CN,
            ChineseVariant::Traditional => ZH_TW,
        }
    }
}

/// Simplified/Traditional character tallies for a piece of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptTally {
    pub simplified: usize,
    pub traditional: usize,
}

impl ScriptTally {
    /// Count both sets independently; a char in both sets counts twice
    pub fn of(text: &str) -> Self {
        text.chars().fold(Self::default(), |mut tally, c| {
            if SIMPLIFIED_SET.contains(&c) {
                tally.simplified += 1;
            }
            if TRADITIONAL_SET.contains(&c) {
                tally.traditional += 1;
            }
            tally
        })
    }

    fn verdict(self) -> ChineseVariant {
        use std::cmp::Ordering;

        match self.traditional.cmp(&self.simplified) {
            Ordering::Greater => ChineseVariant::Traditional,
            Ordering::Less => ChineseVariant::Simplified,
            Ordering::Equal => ChineseVariant::Unresolved,
        }
    }
}

/// Classify generic-Chinese text into a variant
///
/// Total over all input: empty text yields `Unresolved`, never an error.
pub fn classify(text: &str) -> ChineseVariant {
    if text.is_empty() {
        return ChineseVariant::Unresolved;
    }

    if contains_any(text, TAIWAN_HINTS) || contains_any(text, HONG_KONG_HINTS) {
        return ChineseVariant::Traditional;
    }
    if contains_any(text, MAINLAND_HINTS) {
        return ChineseVariant::Simplified;
    }

    ScriptTally::of(text).verdict()
}

/// Build the text examined for a post: caption and hashtags, space-joined
///
/// Missing fields contribute empty text. When both are missing the result
/// is a single space, which carries no hint and no tallied characters.
pub fn classification_text(caption: Option<&str>, hashtags: Option<&str>) -> String {
    format!("{} {}", caption.unwrap_or(""), hashtags.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_unresolved() {
        assert_eq!(classify(""), ChineseVariant::Unresolved);
    }

    #[test]
    fn test_taiwan_hint_beats_simplified_chars() {
        assert_eq!(classify("台北 国门"), ChineseVariant::Traditional);
    }

    #[test]
    fn test_hong_kong_grouped_with_traditional() {
        assert_eq!(classify("香港 Kowloon"), ChineseVariant::Traditional);
        assert_eq!(classify("weekend trip from HK"), ChineseVariant::Traditional);
    }

    #[test]
    fn test_mainland_hint() {
        assert_eq!(classify("来自成都的朋友"), ChineseVariant::Simplified);
        assert_eq!(classify("Shanghai → Fukuoka"), ChineseVariant::Simplified);
    }

    #[test]
    fn test_taiwan_checked_before_mainland() {
        assert_eq!(classify("Taiwan CN"), ChineseVariant::Traditional);
    }

    #[test]
    fn test_hong_kong_checked_before_mainland() {
        assert_eq!(classify("香港 中国"), ChineseVariant::Traditional);
    }

    #[test]
    fn test_character_tally_fallback() {
        assert_eq!(classify("爱吃饭"), ChineseVariant::Simplified);
        assert_eq!(classify("愛吃飯"), ChineseVariant::Traditional);
    }

    #[test]
    fn test_character_tie_is_unresolved() {
        assert_eq!(classify("国國"), ChineseVariant::Unresolved);
        assert_eq!(classify("拉面好吃"), ChineseVariant::Unresolved);
    }

    #[test]
    fn test_script_tally_counts_every_occurrence() {
        let tally = ScriptTally::of("国国國");
        assert_eq!(tally.simplified, 2);
        assert_eq!(tally.traditional, 1);
    }

    #[test]
    fn test_classification_text_tolerates_missing_fields() {
        assert_eq!(classification_text(None, None), " ");
        assert_eq!(classification_text(Some("台北"), None), "台北 ");
        assert_eq!(classification_text(None, Some("#美食")), " #美食");
        assert_eq!(classify(&classification_text(None, None)), ChineseVariant::Unresolved);
    }

    #[test]
    fn test_tags() {
        assert_eq!(ChineseVariant::Unresolved.as_tag(), "zh");
        assert_eq!(ChineseVariant::Simplified.as_tag(), "zh-cn");
        assert_eq!(ChineseVariant::Traditional.as_tag(), "zh-tw");
    }
}
