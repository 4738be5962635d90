//! Weekly calendar generation — selects keywords, assigns personas, and
//! schedules each post with its comment batch.
//!
//! The generator is pure: all I/O happens in the handlers and the repository.
//! Randomness comes in through the `rng` parameter so callers can run seeded.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::keyword::{IntentCategory, KeywordRow};
use crate::models::persona::PersonaRow;
use crate::planning::quality::{compute_quality_score, QualityWeights};
use crate::planning::schedule::{allocate_comment_time, allocate_post_time, comment_count};
use crate::planning::templates::{render, TemplateKind};

pub const MIN_POSTS_PER_WEEK: u32 = 1;
pub const MAX_POSTS_PER_WEEK: u32 = 10;

/// Every generated post currently lands in the same subreddit.
/// TODO: pick from the authoring persona's subreddit list once a selection
/// rule is agreed on.
pub const DEFAULT_SUBREDDIT: &str = "r/technology";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A scheduled post, not yet persisted. Comments are nested under the post
/// they were scheduled against.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPost {
    pub subreddit: String,
    pub persona_id: Uuid,
    pub keyword_id: Uuid,
    pub title: String,
    pub body: String,
    pub scheduled_time: DateTime<Utc>,
    pub comments: Vec<GeneratedComment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedComment {
    pub persona_id: Uuid,
    pub text: String,
    pub scheduled_time: DateTime<Utc>,
}

/// One week's generated content, ready for the repository.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedCalendar {
    pub week_start: NaiveDate,
    pub quality_score: f64,
    pub posts: Vec<GeneratedPost>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Generates a week of posts and comments from the owner's personas and
/// keywords.
///
/// Keyword selection is first-N and deterministic; persona assignment is
/// round-robin; timing, template picks, and comment counts are randomized
/// through `rng`. Fails before doing any work when either input is empty.
pub fn generate_calendar(
    personas: &[PersonaRow],
    keywords: &[KeywordRow],
    week_start: NaiveDate,
    posts_per_week: u32,
    rng: &mut impl Rng,
) -> Result<GeneratedCalendar, AppError> {
    if personas.is_empty() {
        return Err(AppError::Precondition(
            "Need at least 1 persona configured".to_string(),
        ));
    }
    if keywords.is_empty() {
        return Err(AppError::Precondition(
            "Need at least one keyword configured".to_string(),
        ));
    }

    let posts_per_week = posts_per_week.clamp(MIN_POSTS_PER_WEEK, MAX_POSTS_PER_WEEK) as usize;
    let selected = &keywords[..posts_per_week.min(keywords.len())];

    let mut posts = Vec::with_capacity(selected.len());
    for (index, keyword) in selected.iter().enumerate() {
        let author_index = index % personas.len();
        let author = &personas[author_index];
        let category = IntentCategory::parse(&keyword.intent_category);
        let scheduled_time = allocate_post_time(week_start, index, rng);

        let mut comments = Vec::new();
        for i in 0..comment_count(rng) {
            // Commenters start one past the author, so a persona only
            // comments on its own post when it is the sole persona.
            let commenter = &personas[(author_index + i + 1) % personas.len()];
            comments.push(GeneratedComment {
                persona_id: commenter.id,
                text: render(TemplateKind::Comment, category, &keyword.keyword, rng),
                scheduled_time: allocate_comment_time(scheduled_time, i, rng),
            });
        }

        posts.push(GeneratedPost {
            subreddit: DEFAULT_SUBREDDIT.to_string(),
            persona_id: author.id,
            keyword_id: keyword.id,
            title: render(TemplateKind::Title, category, &keyword.keyword, rng),
            body: render(TemplateKind::Body, category, &keyword.keyword, rng),
            scheduled_time,
            comments,
        });
    }

    let quality_score = compute_quality_score(&posts, personas.len(), &QualityWeights::default());

    Ok(GeneratedCalendar {
        week_start,
        quality_score,
        posts,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_persona(username: &str) -> PersonaRow {
        PersonaRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            username: username.to_string(),
            bio: None,
            subreddits: vec![],
            created_at: Utc::now(),
        }
    }

    fn make_keyword(text: &str, category: &str) -> KeywordRow {
        KeywordRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            keyword: text.to_string(),
            search_intent: None,
            intent_category: category.to_string(),
            created_at: Utc::now(),
        }
    }

    fn week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_two_personas_four_keywords_three_posts() {
        let personas = vec![make_persona("p1"), make_persona("p2")];
        let keywords = vec![
            make_keyword("k1", "general"),
            make_keyword("k2", "general"),
            make_keyword("k3", "general"),
            make_keyword("k4", "general"),
        ];
        let mut rng = StdRng::seed_from_u64(42);

        let calendar =
            generate_calendar(&personas, &keywords, week_start(), 3, &mut rng).unwrap();

        assert_eq!(calendar.posts.len(), 3, "first 3 of 4 keywords become posts");
        for (post, keyword) in calendar.posts.iter().zip(&keywords) {
            assert_eq!(post.keyword_id, keyword.id, "keywords selected in order");
        }

        // Round-robin authorship: p1, p2, p1.
        assert_eq!(calendar.posts[0].persona_id, personas[0].id);
        assert_eq!(calendar.posts[1].persona_id, personas[1].id);
        assert_eq!(calendar.posts[2].persona_id, personas[0].id);

        let total_comments: usize = calendar.posts.iter().map(|p| p.comments.len()).sum();
        assert!(
            (6..=9).contains(&total_comments),
            "3 posts at 2-3 comments each, got {total_comments}"
        );
    }

    #[test]
    fn test_post_count_clamped_by_keyword_count() {
        let personas = vec![make_persona("p1")];
        let keywords = vec![make_keyword("k1", "general")];
        let mut rng = StdRng::seed_from_u64(1);

        let calendar =
            generate_calendar(&personas, &keywords, week_start(), 5, &mut rng).unwrap();

        assert_eq!(calendar.posts.len(), 1, "never more posts than keywords");
        // Sole persona comments on its own post: (0 + i + 1) mod 1 = 0.
        for comment in &calendar.posts[0].comments {
            assert_eq!(comment.persona_id, personas[0].id);
        }
    }

    #[test]
    fn test_posts_per_week_clamped_to_upper_bound() {
        let personas = vec![make_persona("p1")];
        let keywords: Vec<_> = (0..20)
            .map(|i| make_keyword(&format!("k{i}"), "general"))
            .collect();
        let mut rng = StdRng::seed_from_u64(2);

        let calendar =
            generate_calendar(&personas, &keywords, week_start(), 50, &mut rng).unwrap();
        assert_eq!(calendar.posts.len(), 10);
    }

    #[test]
    fn test_empty_personas_is_a_precondition_error() {
        let keywords = vec![make_keyword("k1", "general")];
        let mut rng = StdRng::seed_from_u64(3);
        let result = generate_calendar(&[], &keywords, week_start(), 3, &mut rng);
        assert!(matches!(result, Err(AppError::Precondition(_))));
    }

    #[test]
    fn test_empty_keywords_is_a_precondition_error() {
        let personas = vec![make_persona("p1")];
        let mut rng = StdRng::seed_from_u64(4);
        let result = generate_calendar(&personas, &[], week_start(), 3, &mut rng);
        assert!(matches!(result, Err(AppError::Precondition(_))));
    }

    #[test]
    fn test_all_referenced_personas_come_from_the_input() {
        let personas = vec![make_persona("p1"), make_persona("p2"), make_persona("p3")];
        let keywords: Vec<_> = (0..8)
            .map(|i| make_keyword(&format!("k{i}"), "recommendation"))
            .collect();
        let mut rng = StdRng::seed_from_u64(5);

        let calendar =
            generate_calendar(&personas, &keywords, week_start(), 8, &mut rng).unwrap();

        let known: Vec<Uuid> = personas.iter().map(|p| p.id).collect();
        for post in &calendar.posts {
            assert!(known.contains(&post.persona_id));
            for comment in &post.comments {
                assert!(known.contains(&comment.persona_id));
            }
        }
    }

    #[test]
    fn test_posts_stay_within_the_first_five_days() {
        let personas = vec![make_persona("p1")];
        let keywords: Vec<_> = (0..10)
            .map(|i| make_keyword(&format!("k{i}"), "general"))
            .collect();
        let mut rng = StdRng::seed_from_u64(6);

        let calendar =
            generate_calendar(&personas, &keywords, week_start(), 10, &mut rng).unwrap();

        for post in &calendar.posts {
            let offset = (post.scheduled_time.date_naive() - week_start()).num_days();
            assert!((0..5).contains(&offset), "post on day offset {offset}");
        }
    }

    #[test]
    fn test_comments_are_strictly_after_their_post() {
        let personas = vec![make_persona("p1"), make_persona("p2")];
        let keywords: Vec<_> = (0..5)
            .map(|i| make_keyword(&format!("k{i}"), "problem-driven"))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);

        let calendar =
            generate_calendar(&personas, &keywords, week_start(), 5, &mut rng).unwrap();

        for post in &calendar.posts {
            assert!(!post.comments.is_empty());
            assert!(post.comments.len() <= 3);
            for comment in &post.comments {
                assert!(comment.scheduled_time > post.scheduled_time);
            }
        }
    }

    #[test]
    fn test_commenter_rotation_starts_one_past_the_author() {
        let personas: Vec<_> = (0..4).map(|i| make_persona(&format!("p{i}"))).collect();
        let keywords: Vec<_> = (0..6)
            .map(|i| make_keyword(&format!("k{i}"), "general"))
            .collect();
        let mut rng = StdRng::seed_from_u64(8);

        let calendar =
            generate_calendar(&personas, &keywords, week_start(), 6, &mut rng).unwrap();

        // With 4 personas and at most 3 comments the +1 rotation can never
        // wrap back to the author.
        for (index, post) in calendar.posts.iter().enumerate() {
            let author_index = index % personas.len();
            for (i, comment) in post.comments.iter().enumerate() {
                let expected = &personas[(author_index + i + 1) % personas.len()];
                assert_eq!(comment.persona_id, expected.id);
                assert_ne!(comment.persona_id, post.persona_id);
            }
        }
    }

    #[test]
    fn test_unknown_intent_category_renders_via_general() {
        let personas = vec![make_persona("p1")];
        let keywords = vec![make_keyword("mystery topic", "navigational")];
        let mut rng = StdRng::seed_from_u64(9);

        let calendar =
            generate_calendar(&personas, &keywords, week_start(), 1, &mut rng).unwrap();
        let post = &calendar.posts[0];
        assert!(!post.title.is_empty());
        assert!(!post.body.is_empty());
        assert!(post.title.contains("mystery topic"));
    }

    #[test]
    fn test_quality_score_stays_in_unit_interval() {
        let personas = vec![make_persona("p1"), make_persona("p2")];
        let keywords: Vec<_> = (0..10)
            .map(|i| make_keyword(&format!("k{i}"), "comparison"))
            .collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let calendar =
                generate_calendar(&personas, &keywords, week_start(), 10, &mut rng).unwrap();
            assert!(
                (0.0..=1.0).contains(&calendar.quality_score),
                "quality {} out of range",
                calendar.quality_score
            );
        }
    }

    #[test]
    fn test_subreddit_is_the_fixed_default() {
        let personas = vec![make_persona("p1")];
        let keywords = vec![make_keyword("k1", "general")];
        let mut rng = StdRng::seed_from_u64(10);

        let calendar =
            generate_calendar(&personas, &keywords, week_start(), 1, &mut rng).unwrap();
        assert_eq!(calendar.posts[0].subreddit, DEFAULT_SUBREDDIT);
    }
}
