//! Popular-areas map: one circle marker per area
//!
//! Marker size tracks post count, colour tracks mean engagement on a
//! blue → red scale. Rendering the tiles is the UI's job; this module only
//! produces the marker geometry.

use serde::Serialize;
use std::collections::BTreeMap;

use super::area_key;
use crate::posts::Post;

/// Map centre used when no filtered post has coordinates (Fukuoka city)
pub const DEFAULT_CENTER: (f64, f64) = (33.5902, 130.4017);

/// Colour used when every area has the same engagement
pub const UNIFORM_COLOR: &str = "#3186cc";

const BASE_RADIUS: f64 = 6.0;
const RADIUS_SPAN: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaMarker {
    pub location_name: String,
    pub lat: f64,
    pub lng: f64,
    pub posts: usize,
    pub engagement: f64,
    pub radius: f64,
    pub color: String,
    /// HTML snippet for the marker popup; the area name is escaped
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularAreaMap {
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<AreaMarker>,
}

#[derive(Default)]
struct AreaAccumulator {
    posts: usize,
    engagement_sum: f64,
    lat_sum: f64,
    lat_n: usize,
    lng_sum: f64,
    lng_n: usize,
}

/// Build the map for a filtered post set
///
/// Areas whose posts carry no coordinates are left off the map but still
/// count toward nothing else; the centre is the mean of all known
/// coordinates in the filtered set.
pub fn popular_area_map(posts: &[&Post]) -> PopularAreaMap {
    let mut areas: BTreeMap<&str, AreaAccumulator> = BTreeMap::new();

    for post in posts {
        let Some(area) = area_key(post) else {
            continue;
        };
        let acc = areas.entry(area).or_default();
        acc.posts += 1;
        acc.engagement_sum += post.engagement;
        if let Some(lat) = post.lat {
            acc.lat_sum += lat;
            acc.lat_n += 1;
        }
        if let Some(lng) = post.lng {
            acc.lng_sum += lng;
            acc.lng_n += 1;
        }
    }

    let center = (
        mean(posts.iter().filter_map(|p| p.lat)).unwrap_or(DEFAULT_CENTER.0),
        mean(posts.iter().filter_map(|p| p.lng)).unwrap_or(DEFAULT_CENTER.1),
    );

    // Scale bounds cover every area, including ones without coordinates
    let engagements: Vec<f64> = areas
        .values()
        .map(|a| a.engagement_sum / a.posts as f64)
        .collect();
    let min_e = engagements.iter().copied().fold(f64::INFINITY, f64::min);
    let max_e = engagements.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_posts = areas.values().map(|a| a.posts).max().unwrap_or(1).max(1);

    let markers = areas
        .into_iter()
        .filter(|(_, a)| a.lat_n > 0 && a.lng_n > 0)
        .map(|(name, a)| {
            let engagement = a.engagement_sum / a.posts as f64;
            AreaMarker {
                location_name: name.to_string(),
                lat: a.lat_sum / a.lat_n as f64,
                lng: a.lng_sum / a.lng_n as f64,
                posts: a.posts,
                engagement,
                radius: BASE_RADIUS + RADIUS_SPAN * (a.posts as f64 / max_posts as f64),
                color: engagement_color(engagement, min_e, max_e),
                popup: format!(
                    "{}<br>Posts: {}<br>Avg engagement: {:.1}",
                    escape_html(name),
                    a.posts,
                    engagement
                ),
            }
        })
        .collect();

    PopularAreaMap {
        center,
        zoom: 10,
        markers,
    }
}

/// Linear colour between blue-ish (low) and red (high)
pub fn engagement_color(e: f64, min_e: f64, max_e: f64) -> String {
    if max_e == min_e {
        return UNIFORM_COLOR.to_string();
    }
    let t = ((e - min_e) / (max_e - min_e)).clamp(0.0, 1.0);
    let r = (255.0 * t) as u8;
    let g = (100.0 * (1.0 - t)) as u8;
    let b = (204.0 * (1.0 - t)) as u8;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Escape text for interpolation into HTML
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
