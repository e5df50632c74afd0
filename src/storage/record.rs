//! Row mapping for the four entity kinds

use rusqlite::Row;
use rusqlite::types::{Type, Value};
use crate::Error;
use crate::chapter::Chapter;
use crate::choice::Choice;
use crate::criteria::{ChapterFilter, ChoiceFilter, Criteria, MediaFilter, StoryFilter};
use crate::id::EntityId;
use crate::media::{Media, MediaRole};
use crate::story::Story;
use super::schema::{chapters, choices, media, stories};

/// An entity kind that maps onto one table.
///
/// `to_values` and `from_row` follow the order of `COLUMNS`, whose first
/// entry is always the identity column.
pub trait Record: Sized {
    /// Filter type used to retrieve this kind
    type Filter: Criteria;

    /// Human-readable kind name used in errors and logs
    const KIND: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> &EntityId;

    /// Column values in `COLUMNS` order
    fn to_values(&self) -> Vec<Value>;

    /// Build a record from a row selected with `COLUMNS`
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text)
}

fn conversion_failure(idx: usize, err: Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn id_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<EntityId> {
    Ok(EntityId::from_stored(row.get(idx)?))
}

fn optional_id_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<EntityId>> {
    let raw: Option<String> = row.get(idx)?;
    Ok(raw.map(EntityId::from_stored))
}

impl Record for Story {
    type Filter = StoryFilter;

    const KIND: &'static str = "story";
    const TABLE: &'static str = stories::TABLE;
    const COLUMNS: &'static [&'static str] = stories::COLUMNS;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(&self.title),
            optional_text(self.author.as_deref()),
            optional_text(self.description.as_deref()),
            text(&self.owner),
            optional_text(self.cover_image.as_deref()),
            optional_text(self.first_chapter_id.as_ref().map(EntityId::as_str)),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Story {
            id: id_at(row, 0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            description: row.get(3)?,
            owner: row.get(4)?,
            cover_image: row.get(5)?,
            first_chapter_id: optional_id_at(row, 6)?,
            chapters: Default::default(),
        })
    }
}

impl Record for Chapter {
    type Filter = ChapterFilter;

    const KIND: &'static str = "chapter";
    const TABLE: &'static str = chapters::TABLE;
    const COLUMNS: &'static [&'static str] = chapters::COLUMNS;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(self.story_id.as_str()),
            text(&self.text),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Chapter {
            id: id_at(row, 0)?,
            story_id: id_at(row, 1)?,
            text: row.get(2)?,
            choices: Vec::new(),
            illustrations: Vec::new(),
            photos: Vec::new(),
        })
    }
}

impl Record for Choice {
    type Filter = ChoiceFilter;

    const KIND: &'static str = "choice";
    const TABLE: &'static str = choices::TABLE;
    const COLUMNS: &'static [&'static str] = choices::COLUMNS;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(self.chapter_from.as_str()),
            text(self.chapter_to.as_str()),
            text(&self.text),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Choice {
            id: id_at(row, 0)?,
            chapter_from: id_at(row, 1)?,
            chapter_to: id_at(row, 2)?,
            text: row.get(3)?,
        })
    }
}

impl Record for Media {
    type Filter = MediaFilter;

    const KIND: &'static str = "media";
    const TABLE: &'static str = media::TABLE;
    const COLUMNS: &'static [&'static str] = media::COLUMNS;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(self.chapter_id.as_str()),
            text(&self.path),
            text(self.role.as_str()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let role_str: String = row.get(3)?;
        let role: MediaRole = role_str.parse().map_err(|e| conversion_failure(3, e))?;

        Ok(Media {
            id: id_at(row, 0)?,
            chapter_id: id_at(row, 1)?,
            path: row.get(2)?,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_follow_column_order() {
        let story = Story::new("My Frog", "device-A").with_author("blueberry");
        let values = story.to_values();

        assert_eq!(values.len(), Story::COLUMNS.len());
        assert_eq!(values[0], Value::Text(story.id.to_string()));
        assert_eq!(values[2], Value::Text("blueberry".to_string()));
        assert_eq!(values[3], Value::Null);
        assert_eq!(values[6], Value::Null);
    }

    #[test]
    fn test_every_kind_lists_identity_first() {
        assert_eq!(Story::COLUMNS[0], stories::ID);
        assert_eq!(Chapter::COLUMNS[0], chapters::ID);
        assert_eq!(Choice::COLUMNS[0], choices::ID);
        assert_eq!(Media::COLUMNS[0], media::ID);
    }

    #[test]
    fn test_media_values() {
        let m = Media::new(EntityId::generate(), "/tmp/x.png", MediaRole::Illustration);
        let values = m.to_values();

        assert_eq!(values.len(), Media::COLUMNS.len());
        assert_eq!(values[3], Value::Text("illustration".to_string()));
    }
}
