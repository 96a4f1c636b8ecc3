//! Language refinement for posts
//!
//! Splits the generic `zh` tag into `zh-cn` / `zh-tw` and assigns the refined
//! tag (`lang2`) to every post. Runs in two explicit passes:
//! 1. [`assign_refined_languages`] classifies raw `zh` rows; others pass through
//! 2. [`default_unresolved`] rewrites any remaining `zh` to `zh-cn`
//!
//! After [`refine_posts`] no post carries the bare `zh` tag.

pub mod classifier;
pub mod hints;

pub use classifier::{
    classification_text, classify, ChineseVariant, ScriptTally, ZH, ZH_CN, ZH_TW,
};

use tracing::debug;

use crate::posts::Post;

/// Pass 1: set `lang2` from the raw `lang`, classifying generic-Chinese rows
///
/// Returns the number of rows that went through the classifier.
pub fn assign_refined_languages(posts: &mut [Post]) -> usize {
    let mut classified = 0;

    for post in posts.iter_mut() {
        if post.lang == ZH {
            let text = classification_text(post.caption.as_deref(), post.hashtags.as_deref());
            post.lang2 = classify(&text).as_tag().to_string();
            classified += 1;
        } else {
            post.lang2 = post.lang.clone();
        }
    }

    classified
}

/// Pass 2: resolve any leftover generic tag to Simplified
///
/// Returns the number of rows rewritten.
pub fn default_unresolved(posts: &mut [Post]) -> usize {
    let mut rewritten = 0;

    for post in posts.iter_mut().filter(|p| p.lang2 == ZH) {
        post.lang2 = ZH_CN.to_string();
        rewritten += 1;
    }

    rewritten
}

/// Run both refinement passes over a post set
pub fn refine_posts(posts: &mut [Post]) {
    let classified = assign_refined_languages(posts);
    let defaulted = default_unresolved(posts);

    debug!(
        "Language refinement: {} posts, {} classified as generic Chinese, {} defaulted to {}",
        posts.len(),
        classified,
        defaulted,
        ZH_CN
    );
}
