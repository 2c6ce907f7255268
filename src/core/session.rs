//! In-memory conversation bookkeeping for one browser session.
//!
//! A [`Session`] always has exactly one active [`Conversation`] receiving
//! turns, plus an ordered archive of earlier ones. Nothing here survives a
//! restart.

use std::fmt;

use serde::Serialize;

use crate::core::message::Turn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    pub name: String,
    pub turns: Vec<Turn>,
}

impl Conversation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            turns: Vec::new(),
        }
    }

    /// Empty conversation carrying the positional label for `position`
    /// (1-based).
    pub fn numbered(position: usize) -> Self {
        Self::new(default_name(position))
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

pub fn default_name(position: usize) -> String {
    format!("Chat {position}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    NoSuchConversation { index: usize, len: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoSuchConversation { index, len } => write!(
                f,
                "no archived conversation at index {index} (archive holds {len})"
            ),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    active: Conversation,
    archive: Vec<Conversation>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            active: Conversation::numbered(1),
            archive: Vec::new(),
        }
    }

    pub fn active(&self) -> &Conversation {
        &self.active
    }

    pub fn archive(&self) -> &[Conversation] {
        &self.archive
    }

    /// Archived conversations whose name matches the active one are flagged
    /// as in use by the sidebar.
    pub fn is_in_use(&self, index: usize) -> bool {
        self.archive
            .get(index)
            .is_some_and(|conversation| conversation.name == self.active.name)
    }

    pub fn append_turn(&mut self, turn: Turn) {
        self.active.turns.push(turn);
    }

    /// Archive the active conversation if it has any turns, then start a
    /// fresh one. An empty active conversation is simply replaced.
    pub fn start_new_conversation(&mut self) {
        if !self.active.is_empty() {
            let finished = std::mem::replace(&mut self.active, Conversation::new(String::new()));
            self.archive.push(finished);
        }
        self.active = Conversation::numbered(self.archive.len() + 1);
    }

    /// Activate the archived conversation at `index`. The current active
    /// conversation goes to the end of the archive first, even when empty.
    pub fn select_conversation(&mut self, index: usize) -> Result<(), SessionError> {
        self.check_index(index)?;
        let selected = self.archive.remove(index);
        let previous = std::mem::replace(&mut self.active, selected);
        self.archive.push(previous);
        Ok(())
    }

    /// Remove the archived conversation at `index` and relabel the rest
    /// `Chat 1..=N` by position. Custom names are overwritten.
    pub fn delete_conversation(&mut self, index: usize) -> Result<Conversation, SessionError> {
        self.check_index(index)?;
        let removed = self.archive.remove(index);
        for (position, conversation) in self.archive.iter_mut().enumerate() {
            conversation.name = default_name(position + 1);
        }
        Ok(removed)
    }

    pub fn rename_conversation(
        &mut self,
        index: usize,
        new_name: impl Into<String>,
    ) -> Result<(), SessionError> {
        let len = self.archive.len();
        let conversation = self
            .archive
            .get_mut(index)
            .ok_or(SessionError::NoSuchConversation { index, len })?;
        conversation.name = new_name.into();
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.archive.len() {
            Ok(())
        } else {
            Err(SessionError::NoSuchConversation {
                index,
                len: self.archive.len(),
            })
        }
    }
}
