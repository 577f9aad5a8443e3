use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use url::Url;
use uuid::Uuid;

use crate::domain::content::errors::ContentIdError;
use crate::domain::content::errors::ContentKindError;
use crate::domain::content::errors::LinkError;
use crate::domain::content::errors::TagError;
use crate::domain::content::errors::TitleError;
use crate::domain::user::models::UserId;

/// Content unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub Uuid);

impl ContentId {
    /// Generate a new random content ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a content ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ContentIdError> {
        Uuid::parse_str(s)
            .map(ContentId)
            .map_err(|e| ContentIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A saved item in a user's collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub id: ContentId,
    pub owner: UserId,
    pub title: Title,
    pub link: Link,
    pub kind: ContentKind,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
}

/// Content title value object (1-200 characters, not blank).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    const MAX_LENGTH: usize = 200;

    /// # Errors
    /// * `Empty` - Title is empty or whitespace only
    /// * `TooLong` - More than 200 characters
    pub fn new(title: String) -> Result<Self, TitleError> {
        let length = title.chars().count();
        if title.trim().is_empty() {
            Err(TitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Absolute http(s) URL of the saved item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link(Url);

impl Link {
    /// # Errors
    /// * `InvalidUrl` - Not an absolute URL
    /// * `UnsupportedScheme` - Scheme other than http or https
    pub fn new(link: &str) -> Result<Self, LinkError> {
        let url = Url::parse(link).map_err(|e| LinkError::InvalidUrl(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(LinkError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Kind of saved item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Image,
    Video,
    Article,
    Audio,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Image => "image",
            ContentKind::Video => "video",
            ContentKind::Article => "article",
            ContentKind::Audio => "audio",
        }
    }
}

impl FromStr for ContentKind {
    type Err = ContentKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(ContentKind::Image),
            "video" => Ok(ContentKind::Video),
            "article" => Ok(ContentKind::Article),
            "audio" => Ok(ContentKind::Audio),
            other => Err(ContentKindError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form label on a content item (1-50 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    const MAX_LENGTH: usize = 50;

    /// # Errors
    /// * `Empty` - Tag is empty or whitespace only
    /// * `TooLong` - More than 50 characters
    pub fn new(tag: String) -> Result<Self, TagError> {
        let tag = tag.trim().to_string();
        let length = tag.chars().count();
        if tag.is_empty() {
            Err(TagError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TagError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(tag))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated fields of a content item, used for both create and full update.
#[derive(Debug, Clone)]
pub struct ContentCommand {
    pub title: Title,
    pub link: Link,
    pub kind: ContentKind,
    pub tags: Vec<Tag>,
}

impl ContentCommand {
    /// Construct a content command; duplicate tags are dropped, order kept.
    pub fn new(title: Title, link: Link, kind: ContentKind, tags: Vec<Tag>) -> Self {
        let mut unique: Vec<Tag> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        Self {
            title,
            link,
            kind,
            tags: unique,
        }
    }
}
