//! Quality estimation for a generated week.
//!
//! The score rewards weeks whose posts are spread across the available
//! personas and whose template picks did not repeat themselves. Always in
//! [0, 1].

use std::collections::HashSet;

use crate::planning::generator::GeneratedPost;

#[derive(Debug, Clone)]
pub struct QualityWeights {
    pub persona_balance: f64,
    pub title_variety: f64,
    pub body_variety: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            persona_balance: 0.4,
            title_variety: 0.3,
            body_variety: 0.3,
        }
    }
}

/// Weighted blend of persona balance and title/body variety.
pub fn compute_quality_score(
    posts: &[GeneratedPost],
    persona_count: usize,
    weights: &QualityWeights,
) -> f64 {
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    let bodies: Vec<&str> = posts.iter().map(|p| p.body.as_str()).collect();

    (weights.persona_balance * persona_balance(posts, persona_count)
        + weights.title_variety * lexical_variety(&titles)
        + weights.body_variety * lexical_variety(&bodies))
    .clamp(0.0, 1.0)
}

/// Fraction of reachable personas that actually authored a post.
/// "Reachable" caps at the post count — one post cannot cover two personas.
pub fn persona_balance(posts: &[GeneratedPost], persona_count: usize) -> f64 {
    if posts.is_empty() || persona_count == 0 {
        return 0.0;
    }
    let distinct_authors: HashSet<_> = posts.iter().map(|p| p.persona_id).collect();
    distinct_authors.len() as f64 / posts.len().min(persona_count) as f64
}

/// Fraction of distinct strings in `texts`; 0.0 for an empty slice.
pub fn lexical_variety(texts: &[&str]) -> f64 {
    if texts.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<_> = texts.iter().collect();
    distinct.len() as f64 / texts.len() as f64
}
