//! Story Graph - hydrating stored rows into a navigable story
//!
//! Assembly follows ownership keys one level at a time:
//! 1. the story row by id
//! 2. every chapter whose story_id is the story
//! 3. per chapter: its choices (by origin) and its media (by owner)
//!
//! That is two round trips for the story plus three per chapter (row,
//! choices, media). Nothing walks the choice edges, so loops and dangling
//! destinations cost nothing and cannot fail assembly.

use crate::{Error, Result};
use crate::chapter::Chapter;
use crate::criteria::{ChapterFilter, ChoiceFilter, MediaFilter, StoryFilter};
use crate::id::EntityId;
use crate::storage::{Record, Store};
use crate::registry::Registry;
use crate::story::Story;
use tracing::{debug, warn};

/// Builds complete stories and chapters from the registry's stores
pub struct GraphAssembler<'a> {
    registry: &'a Registry,
}

impl<'a> GraphAssembler<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Load a chapter with its choices, illustrations and photos
    pub fn complete_chapter(&self, id: &EntityId) -> Result<Chapter> {
        let mut chapter = fetch_one(&self.registry.chapters(), &ChapterFilter::by_id(id.clone()), id)?;

        chapter.choices = self
            .registry
            .choices()
            .retrieve(&ChoiceFilter::from_chapter(id.clone()))?;

        for media in self.registry.media().retrieve(&MediaFilter::in_chapter(id.clone()))? {
            chapter.add_media(media);
        }

        debug!(
            chapter = %id,
            choices = chapter.choices.len(),
            illustrations = chapter.illustrations.len(),
            photos = chapter.photos.len(),
            "Assembled chapter"
        );
        Ok(chapter)
    }

    /// Load a story with every chapter fully hydrated
    pub fn complete_story(&self, id: &EntityId) -> Result<Story> {
        let mut story = fetch_one(&self.registry.stories(), &StoryFilter::by_id(id.clone()), id)?;

        let chapters = self
            .registry
            .chapters()
            .retrieve(&ChapterFilter::in_story(id.clone()))?;
        for shallow in chapters {
            let chapter = self.complete_chapter(&shallow.id)?;
            story.add_chapter(chapter);
        }

        if let Some(entry) = &story.first_chapter_id {
            if !story.chapters.contains_key(entry) {
                warn!(story = %id, entry = %entry, "Entry chapter is not part of the story");
            }
        }

        debug!(story = %id, chapters = story.chapters.len(), "Assembled story");
        Ok(story)
    }
}

/// Retrieve the single row a filter on `id` is expected to match
pub(crate) fn fetch_one<R: Record>(store: &Store<R>, filter: &R::Filter, id: &EntityId) -> Result<R> {
    let mut rows = store.retrieve(filter)?;
    match rows.len() {
        1 => Ok(rows.remove(0)),
        0 => Err(Error::NotFound { kind: R::KIND, id: id.clone() }),
        count => Err(Error::DuplicateIdentity { kind: R::KIND, id: id.clone(), count }),
    }
}

/// Statistics about an assembled story
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GraphStats {
    pub chapters: usize,
    pub choices: usize,
    pub illustrations: usize,
    pub photos: usize,
    pub endings: usize,
    pub dangling_choices: usize,
}

impl GraphStats {
    pub fn of(story: &Story) -> Self {
        let chapters = story.chapters.values();
        Self {
            chapters: story.chapters.len(),
            choices: chapters.clone().map(|c| c.choices.len()).sum(),
            illustrations: chapters.clone().map(|c| c.illustrations.len()).sum(),
            photos: chapters.map(|c| c.photos.len()).sum(),
            endings: story.endings().count(),
            dangling_choices: story.dangling_choices().len(),
        }
    }
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Story Graph Statistics:")?;
        writeln!(f, "  Chapters: {} (endings: {})", self.chapters, self.endings)?;
        writeln!(f, "  Choices: {} (dangling: {})", self.choices, self.dangling_choices)?;
        writeln!(f, "  Media: {} illustrations, {} photos", self.illustrations, self.photos)
    }
}
