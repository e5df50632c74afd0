//! Controller - the entry point used by screens and commands
//!
//! Wraps the registry with the reads a reader or author actually performs:
//! listing stories by ownership, searching by title, listing the pieces of a
//! chapter, adding and updating any entity by tag, and complete reads via
//! the graph assembler.

use std::sync::Arc;
use crate::{Error, Result};
use crate::chapter::Chapter;
use crate::choice::Choice;
use crate::criteria::{ChapterFilter, ChoiceFilter, MediaFilter, StoryFilter};
use crate::graph::{fetch_one, GraphAssembler};
use crate::id::EntityId;
use crate::media::{Media, MediaRole};
use crate::registry::{DbStats, EntityType, Registry, StoreHandle};
use crate::storage::{Record, Store};
use crate::story::Story;

/// Any persistable entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Story(Story),
    Chapter(Chapter),
    Choice(Choice),
    Media(Media),
}

impl Entity {
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Story(_) => Story::KIND,
            Entity::Chapter(_) => Chapter::KIND,
            Entity::Choice(_) => Choice::KIND,
            Entity::Media(_) => Media::KIND,
        }
    }

    pub fn id(&self) -> &EntityId {
        match self {
            Entity::Story(e) => &e.id,
            Entity::Chapter(e) => &e.id,
            Entity::Choice(e) => &e.id,
            Entity::Media(e) => &e.id,
        }
    }
}

impl From<Story> for Entity {
    fn from(story: Story) -> Self {
        Entity::Story(story)
    }
}

impl From<Chapter> for Entity {
    fn from(chapter: Chapter) -> Self {
        Entity::Chapter(chapter)
    }
}

impl From<Choice> for Entity {
    fn from(choice: Choice) -> Self {
        Entity::Choice(choice)
    }
}

impl From<Media> for Entity {
    fn from(media: Media) -> Self {
        Entity::Media(media)
    }
}

/// How a write is applied to the store selected by tag
#[derive(Clone, Copy)]
enum Write {
    Insert,
    Update,
}

/// Facade over the registry for one local owner
pub struct Controller {
    registry: Arc<Registry>,
    owner: String,
}

impl Controller {
    /// `owner` is the tag stories created on this device are stamped with
    pub fn new(registry: Arc<Registry>, owner: impl Into<String>) -> Self {
        Self {
            registry,
            owner: owner.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Stories visible under a story tag
    pub fn all_stories(&self, tag: EntityType) -> Result<Vec<Story>> {
        let filter = self.story_filter(tag)?;
        self.registry.stories().retrieve(&filter)
    }

    /// Stories under a story tag whose title matches exactly
    pub fn search_stories(&self, title: &str, tag: EntityType) -> Result<Vec<Story>> {
        let filter = self.story_filter(tag)?.title(title);
        self.registry.stories().retrieve(&filter)
    }

    fn story_filter(&self, tag: EntityType) -> Result<StoryFilter> {
        tag.story_filter(&self.owner).ok_or(Error::TypeMismatch {
            expected: tag,
            actual: Story::KIND,
        })
    }

    /// Shallow chapters of a story
    pub fn all_chapters(&self, story_id: &EntityId) -> Result<Vec<Chapter>> {
        self.registry
            .chapters()
            .retrieve(&ChapterFilter::in_story(story_id.clone()))
    }

    /// Choices offered in a chapter
    pub fn all_choices(&self, chapter_id: &EntityId) -> Result<Vec<Choice>> {
        self.registry
            .choices()
            .retrieve(&ChoiceFilter::from_chapter(chapter_id.clone()))
    }

    pub fn all_illustrations(&self, chapter_id: &EntityId) -> Result<Vec<Media>> {
        self.media_with_role(chapter_id, MediaRole::Illustration)
    }

    pub fn all_photos(&self, chapter_id: &EntityId) -> Result<Vec<Media>> {
        self.media_with_role(chapter_id, MediaRole::Photo)
    }

    /// First stored illustration of a chapter, if any
    pub fn first_illustration(&self, chapter_id: &EntityId) -> Result<Option<Media>> {
        Ok(self.all_illustrations(chapter_id)?.into_iter().next())
    }

    fn media_with_role(&self, chapter_id: &EntityId, role: MediaRole) -> Result<Vec<Media>> {
        let filter = MediaFilter::in_chapter(chapter_id.clone()).role(role);
        self.registry.media().retrieve(&filter)
    }

    /// Insert an entity into the store selected by `tag`
    pub fn add(&self, entity: impl Into<Entity>, tag: EntityType) -> Result<()> {
        self.write(entity.into(), tag, Write::Insert)
    }

    /// Overwrite an entity in the store selected by `tag`
    ///
    /// Updating an id that was never stored is a silent no-op.
    pub fn update(&self, entity: impl Into<Entity>, tag: EntityType) -> Result<()> {
        self.write(entity.into(), tag, Write::Update)
    }

    /// Insert a chapter and make it the entry chapter of its story
    ///
    /// The story is looked up first, so an unknown story id fails with
    /// `NotFound` before anything is written.
    pub fn add_entry_chapter(&self, chapter: &Chapter) -> Result<()> {
        let stories = self.registry.stories();
        let story = fetch_one(
            &stories,
            &StoryFilter::by_id(chapter.story_id.clone()),
            &chapter.story_id,
        )?;
        self.registry.chapters().insert(chapter)?;
        stories.update(&story.with_entry_chapter(chapter.id.clone()))?;
        Ok(())
    }

    fn write(&self, entity: Entity, tag: EntityType, mode: Write) -> Result<()> {
        match (self.registry.get_store(tag), &entity) {
            (StoreHandle::Story(store), Entity::Story(e)) => apply(&store, e, mode),
            (StoreHandle::Chapter(store), Entity::Chapter(e)) => apply(&store, e, mode),
            (StoreHandle::Choice(store), Entity::Choice(e)) => apply(&store, e, mode),
            (StoreHandle::Media(store), Entity::Media(e)) => apply(&store, e, mode),
            _ => Err(Error::TypeMismatch {
                expected: tag,
                actual: entity.kind(),
            }),
        }
    }

    pub fn complete_chapter(&self, id: &EntityId) -> Result<Chapter> {
        GraphAssembler::new(&self.registry).complete_chapter(id)
    }

    pub fn complete_story(&self, id: &EntityId) -> Result<Story> {
        GraphAssembler::new(&self.registry).complete_story(id)
    }

    pub fn stats(&self) -> Result<DbStats> {
        self.registry.stats()
    }
}

fn apply<R: Record>(store: &Store<R>, record: &R, mode: Write) -> Result<()> {
    match mode {
        Write::Insert => store.insert(record),
        Write::Update => store.update(record).map(|_| ()),
    }
}
