//! Static template tables for post titles, bodies, and comments.
//!
//! Each intent category maps to a fixed list of templates carrying a
//! `{keyword}` placeholder; comments share a single category-agnostic list.
//! Plain data tables, no dispatch — one uniform pick per render call.

use rand::Rng;

use crate::models::keyword::IntentCategory;

pub const KEYWORD_PLACEHOLDER: &str = "{keyword}";

/// Which text slot of a post is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Title,
    Body,
    Comment,
}

const COMPARISON_TITLES: &[&str] = &[
    "Has anyone compared {keyword}?",
    "Best alternatives to {keyword}?",
    "{keyword} vs traditional approach?",
];

const RECOMMENDATION_TITLES: &[&str] = &[
    "What's the best {keyword}?",
    "Recommendations for {keyword}?",
    "Anyone used {keyword}?",
];

const HOW_TO_TITLES: &[&str] = &[
    "How to get started with {keyword}",
    "Tips for using {keyword}",
    "Guide to {keyword}",
];

const PROBLEM_DRIVEN_TITLES: &[&str] = &[
    "Issues with {keyword}?",
    "Anyone else struggling with {keyword}?",
    "Help with {keyword}",
];

const GENERAL_TITLES: &[&str] = &[
    "Thoughts on {keyword}?",
    "Discussing {keyword}",
    "{keyword} - what do you think?",
];

const COMPARISON_BODIES: &[&str] = &[
    "I've been looking into {keyword} lately. Has anyone here compared different options? I'd love to hear your thoughts.",
    "Trying to decide on {keyword}. What are your experiences compared to other solutions?",
];

const RECOMMENDATION_BODIES: &[&str] = &[
    "Looking for recommendations on {keyword}. What do you all suggest?",
    "Anyone have good suggestions for {keyword}? Would appreciate your input.",
];

const HOW_TO_BODIES: &[&str] = &[
    "I'm trying to get better at {keyword}. Any tips or resources you'd recommend?",
    "Looking for guidance on {keyword}. What's your approach?",
];

const PROBLEM_DRIVEN_BODIES: &[&str] = &[
    "I've been facing challenges with {keyword}. Anyone else experiencing this?",
    "Struggling with {keyword} - any solutions you've found?",
];

const GENERAL_BODIES: &[&str] = &[
    "Thoughts on {keyword}? Interested in hearing the community's perspective.",
    "Let's discuss {keyword}. What's your take on it?",
];

const COMMENTS: &[&str] = &[
    "I've had similar thoughts about {keyword}. Great question!",
    "This is something I've been curious about too. Good discussion.",
    "Interesting perspective on {keyword}. Worth exploring more.",
    "I agree, {keyword} is definitely worth considering.",
    "Thanks for bringing up {keyword}. Helpful to see others' views.",
    "I've found that {keyword} can vary a lot depending on your use case.",
];

/// Renders one template: a uniform pick from the resolved list with the
/// keyword substituted.
pub fn render(
    kind: TemplateKind,
    category: IntentCategory,
    keyword: &str,
    rng: &mut impl Rng,
) -> String {
    let candidates = match kind {
        TemplateKind::Title => title_templates(category),
        TemplateKind::Body => body_templates(category),
        TemplateKind::Comment => COMMENTS,
    };

    let template = candidates[rng.gen_range(0..candidates.len())];
    template.replace(KEYWORD_PLACEHOLDER, keyword)
}

fn title_templates(category: IntentCategory) -> &'static [&'static str] {
    match category {
        IntentCategory::Comparison => COMPARISON_TITLES,
        IntentCategory::Recommendation => RECOMMENDATION_TITLES,
        IntentCategory::HowTo => HOW_TO_TITLES,
        IntentCategory::ProblemDriven => PROBLEM_DRIVEN_TITLES,
        IntentCategory::General => GENERAL_TITLES,
    }
}

fn body_templates(category: IntentCategory) -> &'static [&'static str] {
    match category {
        IntentCategory::Comparison => COMPARISON_BODIES,
        IntentCategory::Recommendation => RECOMMENDATION_BODIES,
        IntentCategory::HowTo => HOW_TO_BODIES,
        IntentCategory::ProblemDriven => PROBLEM_DRIVEN_BODIES,
        IntentCategory::General => GENERAL_BODIES,
    }
}
