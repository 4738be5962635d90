use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KeywordRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub keyword: String,
    pub search_intent: Option<String>,
    /// Stored as text; parsed leniently on read so legacy values never break
    /// generation.
    pub intent_category: String,
    pub created_at: DateTime<Utc>,
}

/// Search intent behind a keyword. Selects which template set seeds the post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntentCategory {
    Comparison,
    Recommendation,
    HowTo,
    ProblemDriven,
    #[default]
    General,
}

impl IntentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            IntentCategory::Comparison => "comparison",
            IntentCategory::Recommendation => "recommendation",
            IntentCategory::HowTo => "how-to",
            IntentCategory::ProblemDriven => "problem-driven",
            IntentCategory::General => "general",
        }
    }

    /// Parses a stored category string; anything unrecognized is `General`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "comparison" => IntentCategory::Comparison,
            "recommendation" => IntentCategory::Recommendation,
            "how-to" => IntentCategory::HowTo,
            "problem-driven" => IntentCategory::ProblemDriven,
            _ => IntentCategory::General,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_wire_format() {
        let json = serde_json::to_string(&IntentCategory::HowTo).unwrap();
        assert_eq!(json, "\"how-to\"");
        let parsed: IntentCategory = serde_json::from_str("\"problem-driven\"").unwrap();
        assert_eq!(parsed, IntentCategory::ProblemDriven);
    }

    #[test]
    fn test_parse_round_trips_every_category() {
        for category in [
            IntentCategory::Comparison,
            IntentCategory::Recommendation,
            IntentCategory::HowTo,
            IntentCategory::ProblemDriven,
            IntentCategory::General,
        ] {
            assert_eq!(IntentCategory::parse(category.as_str()), category);
        }
    }

    #[test]
    fn test_unknown_category_falls_back_to_general() {
        assert_eq!(IntentCategory::parse("navigational"), IntentCategory::General);
        assert_eq!(IntentCategory::parse(""), IntentCategory::General);
    }

    #[test]
    fn test_default_is_general() {
        assert_eq!(IntentCategory::default(), IntentCategory::General);
    }
}
