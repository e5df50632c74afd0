//! Story - the top-level narrative unit
//!
//! A bare story row carries metadata and the id of its entry chapter.
//! After graph assembly the story also owns every chapter, keyed by id,
//! and can be walked from the entry chapter by following choices.

use std::collections::HashMap;
use crate::chapter::Chapter;
use crate::choice::Choice;
use crate::id::EntityId;
use serde::{Deserialize, Serialize};

/// A branching story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: EntityId,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Tag of the device that created the story
    pub owner: String,
    /// Path or URI of the cover image
    pub cover_image: Option<String>,
    /// Chapter a reader starts from
    pub first_chapter_id: Option<EntityId>,
    /// Chapters keyed by id (empty until the story is assembled)
    #[serde(default)]
    pub chapters: HashMap<EntityId, Chapter>,
}

impl Story {
    /// Create a new story with a freshly generated id
    pub fn new(title: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(),
            title: title.into(),
            author: None,
            description: None,
            owner: owner.into(),
            cover_image: None,
            first_chapter_id: None,
            chapters: HashMap::new(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }

    pub fn with_entry_chapter(mut self, chapter_id: EntityId) -> Self {
        self.first_chapter_id = Some(chapter_id);
        self
    }

    /// Add a chapter to the in-memory chapter map
    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.chapters.insert(chapter.id.clone(), chapter);
    }

    pub fn chapter(&self, id: &EntityId) -> Option<&Chapter> {
        self.chapters.get(id)
    }

    /// The chapter a reader starts from, if set and present
    pub fn entry_chapter(&self) -> Option<&Chapter> {
        self.first_chapter_id.as_ref().and_then(|id| self.chapters.get(id))
    }

    /// Follow a choice to its destination chapter
    ///
    /// Returns `None` for a dangling choice whose destination is not part
    /// of this story (yet).
    pub fn follow(&self, choice: &Choice) -> Option<&Chapter> {
        self.chapters.get(&choice.chapter_to)
    }

    /// Chapters without outgoing choices
    pub fn endings(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.values().filter(|c| c.is_ending())
    }

    /// Choices whose destination chapter is not part of this story
    pub fn dangling_choices(&self) -> Vec<&Choice> {
        self.chapters
            .values()
            .flat_map(|c| c.choices.iter())
            .filter(|choice| !self.chapters.contains_key(&choice.chapter_to))
            .collect()
    }

    /// Copy of this story without its chapter map
    pub fn shallow(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
            owner: self.owner.clone(),
            cover_image: self.cover_image.clone(),
            first_chapter_id: self.first_chapter_id.clone(),
            chapters: HashMap::new(),
        }
    }
}
