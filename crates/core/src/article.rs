use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Soft ceiling shown next to the title input. Never enforced.
pub const TITLE_DISPLAY_LIMIT: usize = 200;

/// Soft ceiling shown next to the content input. Never enforced.
pub const CONTENT_DISPLAY_LIMIT: usize = 2000;

/// Number of content characters shown on a preview card
pub const PREVIEW_EXCERPT_LENGTH: usize = 200;

/// Identifier assigned by the article API on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArticleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ArticleId)
            .map_err(|_| format!("Invalid article ID: {s}"))
    }
}

/// Lifecycle state of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Not publicly visible
    Draft,
    /// Visible in the public preview
    Publish,
    /// Soft-deleted, kept in storage
    Thrash,
}

impl ArticleStatus {
    /// Wire representation used by the article API
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Publish => "publish",
            ArticleStatus::Thrash => "thrash",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ArticleStatus::Draft),
            "publish" => Ok(ArticleStatus::Publish),
            "thrash" => Ok(ArticleStatus::Thrash),
            other => Err(format!(
                "Invalid status: {other}. Valid statuses: draft, publish, thrash"
            )),
        }
    }
}

/// The three user-editable text fields of an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleFields {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl ArticleFields {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
        }
    }

    /// Attach a status, producing the body sent on create/update
    pub fn into_payload(self, status: ArticleStatus) -> ArticlePayload {
        ArticlePayload {
            title: self.title,
            content: self.content,
            category: self.category,
            status,
        }
    }
}

/// Article as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: ArticleStatus,
    pub created_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
}

impl Article {
    pub fn fields(&self) -> ArticleFields {
        ArticleFields::new(
            self.title.clone(),
            self.content.clone(),
            self.category.clone(),
        )
    }

    /// Full record as currently stored
    pub fn to_payload(&self) -> ArticlePayload {
        self.fields().into_payload(self.status)
    }

    /// Full record with only the status replaced
    pub fn with_status(&self, status: ArticleStatus) -> ArticlePayload {
        self.fields().into_payload(status)
    }
}

/// Request body for create and update calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePayload {
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: ArticleStatus,
}

/// Render the "N/limit characters" hint shown under an input
pub fn character_counter(text: &str, limit: usize) -> String {
    format!("{}/{} characters", text.chars().count(), limit)
}

/// Shorten content for a preview card
///
/// Returns the content unchanged when it fits in `max_len` characters,
/// otherwise the first `max_len` characters followed by "...".
pub fn excerpt(content: &str, max_len: usize) -> String {
    if content.chars().count() <= max_len {
        content.to_string()
    } else {
        let cut: String = content.chars().take(max_len).collect();
        format!("{cut}...")
    }
}

/// Long date used on preview cards, e.g. "January 2, 2025"
pub fn format_long_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Compact date used in the management table
pub fn format_short_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_article(status: ArticleStatus) -> Article {
        Article {
            id: ArticleId(7),
            title: "Understanding ownership in practice".to_string(),
            content: "x".repeat(250),
            category: "Rust".to_string(),
            status,
            created_date: Utc.with_ymd_and_hms(2025, 1, 2, 10, 30, 0).unwrap(),
            updated_date: None,
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ArticleStatus::Publish).unwrap(),
            "\"publish\""
        );
        assert_eq!(
            serde_json::from_str::<ArticleStatus>("\"thrash\"").unwrap(),
            ArticleStatus::Thrash
        );
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!(serde_json::from_str::<ArticleStatus>("\"published\"").is_err());
        assert!("deleted".parse::<ArticleStatus>().is_err());
        assert!("Draft".parse::<ArticleStatus>().is_err());
    }

    #[test]
    fn test_article_deserializes_from_api_response() {
        let json = r#"{
            "id": 42,
            "title": "A title that is long enough",
            "content": "body",
            "category": "News",
            "status": "draft",
            "created_date": "2025-03-04T05:06:07Z",
            "updated_date": "2025-03-05T05:06:07Z"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();

        assert_eq!(article.id, ArticleId(42));
        assert_eq!(article.status, ArticleStatus::Draft);
        assert!(article.updated_date.is_some());
    }

    #[test]
    fn test_article_without_updated_date() {
        let json = r#"{
            "id": 1,
            "title": "t",
            "content": "c",
            "category": "News",
            "status": "publish",
            "created_date": "2025-03-04T05:06:07Z"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.updated_date, None);
    }

    #[test]
    fn test_with_status_preserves_other_fields() {
        let article = create_test_article(ArticleStatus::Draft);
        let payload = article.with_status(ArticleStatus::Thrash);

        assert_eq!(payload.title, article.title);
        assert_eq!(payload.content, article.content);
        assert_eq!(payload.category, article.category);
        assert_eq!(payload.status, ArticleStatus::Thrash);
    }

    #[test]
    fn test_payload_serializes_four_fields() {
        let payload = ArticleFields::new("t", "c", "News").into_payload(ArticleStatus::Publish);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value.as_object().unwrap().len(), 4);
        assert_eq!(value["status"], "publish");
    }

    #[test]
    fn test_article_id_parse() {
        assert_eq!("15".parse::<ArticleId>().unwrap(), ArticleId(15));
        assert!("abc".parse::<ArticleId>().is_err());
        assert_eq!(ArticleId(15).to_string(), "15");
    }

    #[test]
    fn test_character_counter() {
        assert_eq!(character_counter("hello", 200), "5/200 characters");
        assert_eq!(character_counter("", 2000), "0/2000 characters");
    }

    #[test]
    fn test_excerpt_short_content_unchanged() {
        assert_eq!(excerpt("short", 200), "short");
        let exact = "a".repeat(200);
        assert_eq!(excerpt(&exact, 200), exact);
    }

    #[test]
    fn test_excerpt_truncates_long_content() {
        let long = "b".repeat(250);
        let result = excerpt(&long, 200);
        assert_eq!(result.len(), 203);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let long = "é".repeat(10);
        assert_eq!(excerpt(&long, 4), "éééé...");
    }

    #[test]
    fn test_date_formats() {
        let article = create_test_article(ArticleStatus::Publish);
        assert_eq!(format_long_date(&article.created_date), "January 2, 2025");
        assert_eq!(format_short_date(&article.created_date), "2025-01-02");
    }
}
