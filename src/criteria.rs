//! Criteria - per-kind filters translated into SQL predicates
//!
//! Each entity kind has its own filter type whose fields are all optional.
//! A set field becomes one `column = ?N` clause, an unset field is left out,
//! and the clauses are joined with `AND`. An empty filter therefore matches
//! every row of its kind.
//!
//! The only negation is story ownership: [`OwnerMatch::IsNot`] renders
//! `owner != ?N`, which is how "cached" stories (written on another device)
//! are told apart from stories created locally.
//!
//! Clauses are emitted in field declaration order, so the same filter
//! always produces the same SQL text.

use crate::chapter::Chapter;
use crate::choice::Choice;
use crate::id::EntityId;
use crate::media::{Media, MediaRole};
use crate::storage::schema::{chapters, choices, media, stories};
use crate::story::Story;

/// Comparison applied by a single clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    NotEq,
}

impl Comparison {
    pub fn operator(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::NotEq => "!=",
        }
    }
}

/// One `column <op> ?` clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    pub column: &'static str,
    pub comparison: Comparison,
}

/// Conjunction of clauses plus the values bound to their placeholders.
///
/// `values()[i]` is bound to the placeholder of `clauses()[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
    values: Vec<String>,
}

impl Predicate {
    /// Create an empty predicate (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause and its bound value
    pub fn push(&mut self, column: &'static str, comparison: Comparison, value: impl Into<String>) {
        self.clauses.push(Clause { column, comparison });
        self.values.push(value.into());
    }

    /// Append an equality clause when the value is set
    pub fn push_eq(&mut self, column: &'static str, value: Option<&str>) {
        if let Some(value) = value {
            self.push(column, Comparison::Eq, value);
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render the WHERE body, e.g. `title = ?1 AND owner != ?2`
    ///
    /// Returns `None` for an empty predicate.
    pub fn where_clause(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let rendered: Vec<String> = self
            .clauses
            .iter()
            .enumerate()
            .map(|(i, clause)| format!("{} {} ?{}", clause.column, clause.comparison.operator(), i + 1))
            .collect();
        Some(rendered.join(" AND "))
    }
}

/// A retrieval filter that can be translated into a predicate
pub trait Criteria {
    fn predicate(&self) -> Predicate;
}

/// Ownership constraint on stories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerMatch {
    /// Stories created by this owner
    Is(String),
    /// Stories created by anyone else
    IsNot(String),
}

/// Filter over stored stories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryFilter {
    pub id: Option<EntityId>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub owner: Option<OwnerMatch>,
}

impl StoryFilter {
    /// Filter matching every story
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: EntityId) -> Self {
        Self { id: Some(id), ..Self::default() }
    }

    /// Filter matching every persisted field of `story`
    pub fn matching(story: &Story) -> Self {
        Self {
            id: Some(story.id.clone()),
            title: Some(story.title.clone()),
            author: story.author.clone(),
            description: story.description.clone(),
            owner: Some(OwnerMatch::Is(story.owner.clone())),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(OwnerMatch::Is(owner.into()));
        self
    }

    pub fn not_owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(OwnerMatch::IsNot(owner.into()));
        self
    }
}

impl Criteria for StoryFilter {
    fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::new();
        predicate.push_eq(stories::ID, self.id.as_ref().map(EntityId::as_str));
        predicate.push_eq(stories::TITLE, self.title.as_deref());
        predicate.push_eq(stories::AUTHOR, self.author.as_deref());
        predicate.push_eq(stories::DESCRIPTION, self.description.as_deref());
        match &self.owner {
            Some(OwnerMatch::Is(owner)) => predicate.push(stories::OWNER, Comparison::Eq, owner.as_str()),
            Some(OwnerMatch::IsNot(owner)) => predicate.push(stories::OWNER, Comparison::NotEq, owner.as_str()),
            None => {}
        }
        predicate
    }
}

/// Filter over stored chapters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterFilter {
    pub id: Option<EntityId>,
    pub story_id: Option<EntityId>,
    pub text: Option<String>,
}

impl ChapterFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: EntityId) -> Self {
        Self { id: Some(id), ..Self::default() }
    }

    /// All chapters of a story
    pub fn in_story(story_id: EntityId) -> Self {
        Self { story_id: Some(story_id), ..Self::default() }
    }

    pub fn matching(chapter: &Chapter) -> Self {
        Self {
            id: Some(chapter.id.clone()),
            story_id: Some(chapter.story_id.clone()),
            text: Some(chapter.text.clone()),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl Criteria for ChapterFilter {
    fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::new();
        predicate.push_eq(chapters::ID, self.id.as_ref().map(EntityId::as_str));
        predicate.push_eq(chapters::STORY_ID, self.story_id.as_ref().map(EntityId::as_str));
        predicate.push_eq(chapters::TEXT, self.text.as_deref());
        predicate
    }
}

/// Filter over stored choices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceFilter {
    pub id: Option<EntityId>,
    pub chapter_from: Option<EntityId>,
    pub chapter_to: Option<EntityId>,
    pub text: Option<String>,
}

impl ChoiceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: EntityId) -> Self {
        Self { id: Some(id), ..Self::default() }
    }

    /// All choices offered in a chapter
    pub fn from_chapter(chapter_id: EntityId) -> Self {
        Self { chapter_from: Some(chapter_id), ..Self::default() }
    }

    pub fn matching(choice: &Choice) -> Self {
        Self {
            id: Some(choice.id.clone()),
            chapter_from: Some(choice.chapter_from.clone()),
            chapter_to: Some(choice.chapter_to.clone()),
            text: Some(choice.text.clone()),
        }
    }
}

impl Criteria for ChoiceFilter {
    fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::new();
        predicate.push_eq(choices::ID, self.id.as_ref().map(EntityId::as_str));
        predicate.push_eq(choices::CHAPTER_FROM, self.chapter_from.as_ref().map(EntityId::as_str));
        predicate.push_eq(choices::CHAPTER_TO, self.chapter_to.as_ref().map(EntityId::as_str));
        predicate.push_eq(choices::TEXT, self.text.as_deref());
        predicate
    }
}

/// Filter over stored media
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaFilter {
    pub id: Option<EntityId>,
    pub chapter_id: Option<EntityId>,
    pub path: Option<String>,
    pub role: Option<MediaRole>,
}

impl MediaFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: EntityId) -> Self {
        Self { id: Some(id), ..Self::default() }
    }

    /// All media attached to a chapter, whatever the role
    pub fn in_chapter(chapter_id: EntityId) -> Self {
        Self { chapter_id: Some(chapter_id), ..Self::default() }
    }

    pub fn matching(media: &Media) -> Self {
        Self {
            id: Some(media.id.clone()),
            chapter_id: Some(media.chapter_id.clone()),
            path: Some(media.path.clone()),
            role: Some(media.role),
        }
    }

    pub fn role(mut self, role: MediaRole) -> Self {
        self.role = Some(role);
        self
    }
}

impl Criteria for MediaFilter {
    fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::new();
        predicate.push_eq(media::ID, self.id.as_ref().map(EntityId::as_str));
        predicate.push_eq(media::CHAPTER_ID, self.chapter_id.as_ref().map(EntityId::as_str));
        predicate.push_eq(media::PATH, self.path.as_deref());
        predicate.push_eq(media::ROLE, self.role.map(|r| r.as_str()));
        predicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_where_clause() {
        let predicate = StoryFilter::new().predicate();
        assert!(predicate.is_empty());
        assert!(predicate.where_clause().is_none());
        assert!(predicate.values().is_empty());
    }

    #[test]
    fn test_set_fields_are_conjoined_in_declaration_order() {
        // Builder calls in reverse order must not change the output
        let predicate = StoryFilter::new().author("Dr. Poe").title("My Cow").predicate();

        assert_eq!(predicate.where_clause().unwrap(), "title = ?1 AND author = ?2");
        assert_eq!(predicate.values(), &["My Cow".to_string(), "Dr. Poe".to_string()]);
    }

    #[test]
    fn test_negated_owner() {
        let predicate = StoryFilter::new().title("My Hen").not_owned_by("device-A").predicate();

        assert_eq!(predicate.where_clause().unwrap(), "title = ?1 AND owner != ?2");
        assert_eq!(predicate.clauses()[1].comparison, Comparison::NotEq);
        assert_eq!(predicate.values()[1], "device-A");
    }

    #[test]
    fn test_chapter_filter() {
        let id = EntityId::generate();
        let story = EntityId::generate();
        let filter = ChapterFilter { id: Some(id.clone()), story_id: Some(story.clone()), text: None };
        let predicate = filter.predicate();

        assert_eq!(predicate.clauses().len(), 2);
        assert_eq!(predicate.where_clause().unwrap(), "chapter_id = ?1 AND story_id = ?2");
        assert_eq!(predicate.values(), &[id.to_string(), story.to_string()]);
    }

    #[test]
    fn test_media_role_is_bound_as_text() {
        let chapter = EntityId::generate();
        let predicate = MediaFilter::in_chapter(chapter).role(MediaRole::Illustration).predicate();

        assert_eq!(predicate.where_clause().unwrap(), "chapter_id = ?1 AND role = ?2");
        assert_eq!(predicate.values()[1], "illustration");
    }

    #[test]
    fn test_matching_story_skips_absent_optionals() {
        let story = Story::new("Untitled", "device-B");
        let predicate = StoryFilter::matching(&story).predicate();

        assert_eq!(predicate.where_clause().unwrap(), "story_id = ?1 AND title = ?2 AND owner = ?3");
    }

    #[test]
    fn test_same_filter_renders_identically() {
        let filter = ChoiceFilter::from_chapter(EntityId::generate());
        assert_eq!(filter.predicate(), filter.predicate());
    }
}
