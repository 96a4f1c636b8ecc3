//! Region hint lists and character sets for Chinese variant detection
//!
//! Tables are plain data so the classifier stays a pure function over text.
//! Order inside each hint list does not matter; the lists themselves are
//! checked in a fixed order by the classifier (Taiwan, Hong Kong, Mainland).

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Substrings that mark a post as Taiwanese (place names, flag, codes)
pub const TAIWAN_HINTS: &[&str] = &[
    "台灣", "臺灣", "🇹🇼", "TW", "Taiwan", "台北", "高雄", "新北", "台中", "台南", "花蓮", "桃園",
    "嘉義", "宜蘭", "澎湖",
];

/// Substrings that mark a post as Hong Kong
pub const HONG_KONG_HINTS: &[&str] = &["香港", "🇭🇰", "HK", "HongKong", "Kowloon", "九龍"];

/// Substrings that mark a post as Mainland Chinese
pub const MAINLAND_HINTS: &[&str] = &[
    "中国", "中國", "大陆", "大陸", "🇨🇳", "CN", "Beijing", "Shanghai", "Shenzhen", "广州", "廣州",
    "成都", "重庆", "重慶",
];

const SIMPLIFIED_CHARS: &str =
    "国门体级线风广车饭饮馆厦观爱历乐医铁龙鲜汉阳湾岛际气购麦当劳云宝丽点话网产证飞刘";

const TRADITIONAL_CHARS: &str =
    "國門體級線風廣車飯飲館廈觀愛歷樂醫鐵龍鮮漢臺灣島際氣購麥當勞雲寶麗點話網產證飛劉香港";

/// Characters whose presence suggests Simplified script
pub static SIMPLIFIED_SET: Lazy<HashSet<char>> = Lazy::new(|| SIMPLIFIED_CHARS.chars().collect());

/// Characters whose presence suggests Traditional script
pub static TRADITIONAL_SET: Lazy<HashSet<char>> =
    Lazy::new(|| TRADITIONAL_CHARS.chars().collect());

/// True if any hint occurs as a substring of `text`
pub fn contains_any(text: &str, hints: &[&str]) -> bool {
    hints.iter().any(|hint| text.contains(hint))
}
