//! Store registry - one store per entity kind
//!
//! Callers select a store with an [`EntityType`] tag. The three story tags
//! (published, cached, created) all resolve to the same story store; they
//! only differ in the ownership filter applied when listing stories.
//!
//! The registry is an ordinary value: build it once on a [`Database`] and
//! share it (usually behind an `Arc`) with everything that needs a store.

use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{Error, Result};
use crate::chapter::Chapter;
use crate::choice::Choice;
use crate::criteria::StoryFilter;
use crate::media::Media;
use crate::storage::{Database, Record, Store};
use crate::story::Story;

/// Entity-type tags used to pick a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Chapter,
    Choice,
    Media,
    /// Every story, whoever wrote it
    PublishedStory,
    /// Stories written on another device
    CachedStory,
    /// Stories written on this device
    CreatedStory,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Chapter => "chapter",
            EntityType::Choice => "choice",
            EntityType::Media => "media",
            EntityType::PublishedStory => "published",
            EntityType::CachedStory => "cached",
            EntityType::CreatedStory => "created",
        }
    }

    pub fn all() -> &'static [EntityType] {
        &[
            EntityType::Chapter,
            EntityType::Choice,
            EntityType::Media,
            EntityType::PublishedStory,
            EntityType::CachedStory,
            EntityType::CreatedStory,
        ]
    }

    pub fn is_story(&self) -> bool {
        matches!(
            self,
            EntityType::PublishedStory | EntityType::CachedStory | EntityType::CreatedStory
        )
    }

    /// Default story filter for this tag relative to the local owner
    ///
    /// Cached stories are the ones *not* owned locally, created stories are
    /// the local ones and published means no ownership constraint. Non-story
    /// tags get no filter.
    pub fn story_filter(&self, owner: &str) -> Option<StoryFilter> {
        match self {
            EntityType::CachedStory => Some(StoryFilter::new().not_owned_by(owner)),
            EntityType::CreatedStory => Some(StoryFilter::new().owned_by(owner)),
            EntityType::PublishedStory => Some(StoryFilter::new()),
            _ => None,
        }
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "chapter" => Ok(EntityType::Chapter),
            "choice" => Ok(EntityType::Choice),
            "media" => Ok(EntityType::Media),
            "published" | "published_story" | "all" => Ok(EntityType::PublishedStory),
            "cached" | "cached_story" => Ok(EntityType::CachedStory),
            "created" | "created_story" | "mine" => Ok(EntityType::CreatedStory),
            _ => Err(Error::InvalidEntityType(s.to_string())),
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A strongly typed store selected by tag
#[derive(Clone)]
pub enum StoreHandle {
    Story(Arc<Store<Story>>),
    Chapter(Arc<Store<Chapter>>),
    Choice(Arc<Store<Choice>>),
    Media(Arc<Store<Media>>),
}

impl StoreHandle {
    /// Kind name of the records held by the store
    pub fn kind(&self) -> &'static str {
        match self {
            StoreHandle::Story(_) => Story::KIND,
            StoreHandle::Chapter(_) => Chapter::KIND,
            StoreHandle::Choice(_) => Choice::KIND,
            StoreHandle::Media(_) => Media::KIND,
        }
    }
}

/// Hands out exactly one store per entity kind.
///
/// Stores are created on first request. The slots are `OnceLock`s, so
/// concurrent first requests still observe a single instance.
pub struct Registry {
    db: Database,
    stories: OnceLock<Arc<Store<Story>>>,
    chapters: OnceLock<Arc<Store<Chapter>>>,
    choices: OnceLock<Arc<Store<Choice>>>,
    media: OnceLock<Arc<Store<Media>>>,
}

impl Registry {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            stories: OnceLock::new(),
            chapters: OnceLock::new(),
            choices: OnceLock::new(),
            media: OnceLock::new(),
        }
    }

    pub fn stories(&self) -> Arc<Store<Story>> {
        Arc::clone(self.stories.get_or_init(|| self.build()))
    }

    pub fn chapters(&self) -> Arc<Store<Chapter>> {
        Arc::clone(self.chapters.get_or_init(|| self.build()))
    }

    pub fn choices(&self) -> Arc<Store<Choice>> {
        Arc::clone(self.choices.get_or_init(|| self.build()))
    }

    pub fn media(&self) -> Arc<Store<Media>> {
        Arc::clone(self.media.get_or_init(|| self.build()))
    }

    fn build<R: Record>(&self) -> Arc<Store<R>> {
        debug!(kind = R::KIND, "Creating store");
        Arc::new(Store::new(self.db.clone()))
    }

    /// Store responsible for the given tag
    pub fn get_store(&self, tag: EntityType) -> StoreHandle {
        match tag {
            EntityType::Chapter => StoreHandle::Chapter(self.chapters()),
            EntityType::Choice => StoreHandle::Choice(self.choices()),
            EntityType::Media => StoreHandle::Media(self.media()),
            EntityType::PublishedStory | EntityType::CachedStory | EntityType::CreatedStory => {
                StoreHandle::Story(self.stories())
            }
        }
    }

    /// Row counts for every kind
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            stories: self.stories().count()?,
            chapters: self.chapters().count()?,
            choices: self.choices().count()?,
            media: self.media().count()?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbStats {
    pub stories: usize,
    pub chapters: usize,
    pub choices: usize,
    pub media: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Stories: {}", self.stories)?;
        writeln!(f, "  Chapters: {}", self.chapters)?;
        writeln!(f, "  Choices: {}", self.choices)?;
        writeln!(f, "  Media: {}", self.media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Criteria;
    use std::thread;

    fn registry() -> Registry {
        Registry::new(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_entity_type_roundtrip() {
        for tag in EntityType::all() {
            let parsed: EntityType = tag.as_str().parse().unwrap();
            assert_eq!(*tag, parsed);
        }
        assert!("novel".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_same_instance_on_repeated_calls() {
        let registry = registry();
        assert!(Arc::ptr_eq(&registry.chapters(), &registry.chapters()));
        assert!(Arc::ptr_eq(&registry.choices(), &registry.choices()));
        assert!(Arc::ptr_eq(&registry.media(), &registry.media()));
    }

    #[test]
    fn test_story_tags_share_one_store() {
        let registry = registry();
        let handles: Vec<_> = [
            EntityType::PublishedStory,
            EntityType::CachedStory,
            EntityType::CreatedStory,
        ]
        .into_iter()
        .map(|tag| match registry.get_store(tag) {
            StoreHandle::Story(store) => store,
            other => panic!("expected story store, got {}", other.kind()),
        })
        .collect();

        assert!(Arc::ptr_eq(&handles[0], &handles[1]));
        assert!(Arc::ptr_eq(&handles[1], &handles[2]));
    }

    #[test]
    fn test_handle_kinds() {
        let registry = registry();
        assert_eq!(registry.get_store(EntityType::Chapter).kind(), "chapter");
        assert_eq!(registry.get_store(EntityType::Choice).kind(), "choice");
        assert_eq!(registry.get_store(EntityType::Media).kind(), "media");
        assert_eq!(registry.get_store(EntityType::CachedStory).kind(), "story");
    }

    #[test]
    fn test_concurrent_first_access_yields_one_store() {
        let registry = Arc::new(registry());
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.stories())
            })
            .collect();

        let stores: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();
        for store in &stores {
            assert!(Arc::ptr_eq(store, &stores[0]));
        }
    }

    #[test]
    fn test_writes_are_visible_through_every_handle() {
        let registry = registry();
        let story = Story::new("Shared", "me");
        registry.stories().insert(&story).unwrap();

        match registry.get_store(EntityType::CachedStory) {
            StoreHandle::Story(store) => assert_eq!(store.count().unwrap(), 1),
            _ => unreachable!(),
        }
        assert_eq!(registry.stats().unwrap().stories, 1);
    }

    #[test]
    fn test_story_filters_per_tag() {
        let cached = EntityType::CachedStory.story_filter("me").unwrap();
        assert_eq!(cached.predicate().where_clause().unwrap(), "owner != ?1");

        let created = EntityType::CreatedStory.story_filter("me").unwrap();
        assert_eq!(created.predicate().where_clause().unwrap(), "owner = ?1");

        let published = EntityType::PublishedStory.story_filter("me").unwrap();
        assert!(published.predicate().is_empty());

        assert!(EntityType::Chapter.story_filter("me").is_none());
    }
}
