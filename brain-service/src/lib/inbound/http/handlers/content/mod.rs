use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::content::errors::ContentError;
use crate::domain::content::models::Content;
use crate::domain::content::models::ContentCommand;
use crate::domain::content::models::Link;
use crate::domain::content::models::Tag;
use crate::domain::content::models::Title;

pub mod create_content;
pub mod delete_content;
pub mod list_content;
pub mod update_content;

pub use create_content::create_content;
pub use delete_content::delete_content;
pub use list_content::list_content;
pub use update_content::update_content;

/// HTTP request body for creating or replacing a content item (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentRequest {
    title: String,
    link: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl ContentRequest {
    fn try_into_command(self) -> Result<ContentCommand, ContentError> {
        let title = Title::new(self.title)?;
        let link = Link::new(&self.link)?;
        let kind = self.kind.parse()?;
        let tags = self
            .tags
            .into_iter()
            .map(Tag::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ContentCommand::new(title, link, kind, tags))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentData {
    pub id: String,
    pub title: String,
    pub link: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Content> for ContentData {
    fn from(content: &Content) -> Self {
        Self {
            id: content.id.to_string(),
            title: content.title.as_str().to_string(),
            link: content.link.as_str().to_string(),
            kind: content.kind.as_str().to_string(),
            tags: content
                .tags
                .iter()
                .map(|tag| tag.as_str().to_string())
                .collect(),
            created_at: content.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentListData {
    pub contents: Vec<ContentData>,
}

impl From<&[Content]> for ContentListData {
    fn from(contents: &[Content]) -> Self {
        Self {
            contents: contents.iter().map(ContentData::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: &str, tags: &[&str]) -> ContentRequest {
        ContentRequest {
            title: "Ferris".to_string(),
            link: "https://rustacean.net/assets/rustacean-flat-happy.png".to_string(),
            kind: kind.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    #[test]
    fn test_request_into_command() {
        let command = request("image", &["rust", "crab"])
            .try_into_command()
            .unwrap();

        assert_eq!(command.title.as_str(), "Ferris");
        assert_eq!(command.tags.len(), 2);
    }

    #[test]
    fn test_request_rejects_unknown_kind() {
        let result = request("gif", &[]).try_into_command();
        assert!(matches!(result, Err(ContentError::InvalidKind(_))));
    }

    #[test]
    fn test_request_rejects_blank_tag() {
        let result = request("image", &["rust", "  "]).try_into_command();
        assert!(matches!(result, Err(ContentError::InvalidTag(_))));
    }

    #[test]
    fn test_request_body_uses_type_field() {
        let body: ContentRequest = serde_json::from_value(serde_json::json!({
            "title": "Talk",
            "link": "https://www.youtube.com/watch?v=rAl-9HwD858",
            "type": "video"
        }))
        .unwrap();

        assert_eq!(body.kind, "video");
        assert!(body.tags.is_empty());
    }
}
