//! Media - images attached to a chapter
//!
//! Every media item plays one of two roles:
//! - `Illustration`: artwork supplied by the story's author
//! - `Photo`: a picture submitted by a reader

use crate::{Error, Result};
use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role of a media item within its chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaRole {
    /// Reader-submitted photo
    Photo,
    /// Illustration supplied with the chapter
    Illustration,
}

impl MediaRole {
    /// Get the string representation stored in the media table
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaRole::Photo => "photo",
            MediaRole::Illustration => "illustration",
        }
    }

    /// Get all media roles
    pub fn all() -> &'static [MediaRole] {
        &[MediaRole::Photo, MediaRole::Illustration]
    }
}

impl FromStr for MediaRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "photo" | "picture" => Ok(MediaRole::Photo),
            "illustration" | "ill" => Ok(MediaRole::Illustration),
            _ => Err(Error::InvalidMediaRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for MediaRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An image attached to a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: EntityId,
    /// Chapter this media belongs to
    pub chapter_id: EntityId,
    /// Local file path or URI of the image
    pub path: String,
    pub role: MediaRole,
}

impl Media {
    /// Create a new media item with a freshly generated id
    pub fn new(chapter_id: EntityId, path: impl Into<String>, role: MediaRole) -> Self {
        Self {
            id: EntityId::generate(),
            chapter_id,
            path: path.into(),
            role,
        }
    }

    pub fn is_photo(&self) -> bool {
        self.role == MediaRole::Photo
    }

    pub fn is_illustration(&self) -> bool {
        self.role == MediaRole::Illustration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_role_roundtrip() {
        for role in MediaRole::all() {
            let parsed: MediaRole = role.as_str().parse().unwrap();
            assert_eq!(*role, parsed);
        }
    }

    #[test]
    fn test_media_role_aliases() {
        assert_eq!(MediaRole::from_str("Picture").unwrap(), MediaRole::Photo);
        assert_eq!(MediaRole::from_str("ILL").unwrap(), MediaRole::Illustration);
        assert!(MediaRole::from_str("video").is_err());
    }

    #[test]
    fn test_media_creation() {
        let chapter = EntityId::generate();
        let media = Media::new(chapter.clone(), "/sdcard/frog.jpg", MediaRole::Photo);

        assert_eq!(media.chapter_id, chapter);
        assert!(media.is_photo());
        assert!(!media.is_illustration());
    }
}
