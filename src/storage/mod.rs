//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with one table per entity kind:
//! - stories(story_id, title, author, description, owner, cover_image, first_chapter_id)
//! - chapters(chapter_id, story_id, text)
//! - choices(choice_id, chapter_from, chapter_to, text)
//! - media(media_id, chapter_id, path, role)

pub mod schema;
pub mod sqlite;
pub mod record;
pub mod store;

pub use sqlite::Database;
pub use record::Record;
pub use store::Store;
