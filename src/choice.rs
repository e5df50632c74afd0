//! Choice - a directed, labelled edge between two chapters
//!
//! Several choices may leave the same chapter (branching) or lead to the
//! same chapter (convergence). The destination is never validated: it may
//! be the origin itself or a chapter that has not been written yet.

use crate::id::EntityId;
use serde::{Deserialize, Serialize};

/// A reader choice leading from one chapter to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: EntityId,
    /// Chapter the choice is offered in
    pub chapter_from: EntityId,
    /// Chapter the choice leads to
    pub chapter_to: EntityId,
    /// Text shown to the reader
    pub text: String,
}

impl Choice {
    /// Create a new choice with a freshly generated id
    pub fn new(chapter_from: EntityId, chapter_to: EntityId, text: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(),
            chapter_from,
            chapter_to,
            text: text.into(),
        }
    }

    /// Whether the choice leads back into the chapter it is offered in
    pub fn is_self_loop(&self) -> bool {
        self.chapter_from == self.chapter_to
    }
}
