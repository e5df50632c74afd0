//! # StoryHoard - branching story persistence
//!
//! Stores and reconstructs choose-your-own-adventure stories: chapters
//! linked by reader choices, with attached photos and illustrations.
//!
//! StoryHoard provides:
//! - Entity records for stories, chapters, choices and media
//! - Per-kind filters translated into parameterised SQL predicates
//! - SQLite-backed entity stores with insert / update / retrieve
//! - A registry handing out exactly one store per entity kind
//! - Graph assembly that hydrates a story into a navigable chapter graph

pub mod id;
pub mod story;
pub mod chapter;
pub mod choice;
pub mod media;
pub mod criteria;
pub mod storage;
pub mod registry;
pub mod graph;
pub mod controller;
pub mod config;
pub mod ui;


// Re-exports for convenient access
pub use id::EntityId;
pub use story::Story;
pub use chapter::Chapter;
pub use choice::Choice;
pub use media::{Media, MediaRole};
pub use criteria::{ChapterFilter, ChoiceFilter, Criteria, MediaFilter, OwnerMatch, Predicate, StoryFilter};
pub use storage::{Database, Record, Store};
pub use registry::{EntityType, Registry, StoreHandle};
pub use graph::GraphAssembler;
pub use controller::{Controller, Entity};

/// Result type alias for StoryHoard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for StoryHoard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid media role: {0}")]
    InvalidMediaRole(String),

    #[error("Invalid entity type: {0}")]
    InvalidEntityType(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: EntityId },

    #[error("{count} {kind} rows share id {id}")]
    DuplicateIdentity {
        kind: &'static str,
        id: EntityId,
        count: usize,
    },

    #[error("Entity type mismatch: tag {expected} cannot hold a {actual}")]
    TypeMismatch {
        expected: EntityType,
        actual: &'static str,
    },
}
