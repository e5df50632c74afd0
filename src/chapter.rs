//! Chapter - a node in the story graph

use crate::choice::Choice;
use crate::id::EntityId;
use crate::media::{Media, MediaRole};
use serde::{Deserialize, Serialize};

/// A chapter of a story.
///
/// The persisted row only carries the id, owning story and text. The
/// outgoing choices and both media collections are filled in by graph
/// assembly and stay empty on a chapter read straight from its store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: EntityId,
    /// Story this chapter belongs to
    pub story_id: EntityId,
    /// Body text
    pub text: String,
    /// Outgoing choices, in the order they were stored
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub illustrations: Vec<Media>,
    #[serde(default)]
    pub photos: Vec<Media>,
}

impl Chapter {
    /// Create a new chapter with a freshly generated id
    pub fn new(story_id: EntityId, text: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(),
            story_id,
            text: text.into(),
            choices: Vec::new(),
            illustrations: Vec::new(),
            photos: Vec::new(),
        }
    }

    pub fn add_choice(&mut self, choice: Choice) {
        self.choices.push(choice);
    }

    /// Attach a media item to the collection matching its role
    pub fn add_media(&mut self, media: Media) {
        match media.role {
            MediaRole::Photo => self.photos.push(media),
            MediaRole::Illustration => self.illustrations.push(media),
        }
    }

    /// A chapter without outgoing choices ends the story
    pub fn is_ending(&self) -> bool {
        self.choices.is_empty()
    }

    /// Illustrations first, then photos
    pub fn media(&self) -> impl Iterator<Item = &Media> {
        self.illustrations.iter().chain(self.photos.iter())
    }

    /// Copy of this chapter without its hydrated collections
    pub fn shallow(&self) -> Self {
        Self {
            id: self.id.clone(),
            story_id: self.story_id.clone(),
            text: self.text.clone(),
            choices: Vec::new(),
            illustrations: Vec::new(),
            photos: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_choice() {
        let mut chapter = Chapter::new(EntityId::generate(), "hello there");
        assert!(chapter.is_ending());

        let choice = Choice::new(chapter.id.clone(), EntityId::generate(), "rawr");
        chapter.add_choice(choice);

        assert_eq!(chapter.choices.len(), 1);
        assert!(!chapter.is_ending());
    }

    #[test]
    fn test_add_media_partitions_by_role() {
        let mut chapter = Chapter::new(EntityId::generate(), "pictures");
        chapter.add_media(Media::new(chapter.id.clone(), "a.png", MediaRole::Illustration));
        chapter.add_media(Media::new(chapter.id.clone(), "b.jpg", MediaRole::Photo));
        chapter.add_media(Media::new(chapter.id.clone(), "c.jpg", MediaRole::Photo));

        assert_eq!(chapter.illustrations.len(), 1);
        assert_eq!(chapter.photos.len(), 2);

        let paths: Vec<_> = chapter.media().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["a.png", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_shallow_drops_collections() {
        let mut chapter = Chapter::new(EntityId::generate(), "text");
        chapter.add_choice(Choice::new(chapter.id.clone(), chapter.id.clone(), "loop"));

        let shallow = chapter.shallow();
        assert_eq!(shallow.id, chapter.id);
        assert!(shallow.choices.is_empty());
    }
}
