use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::NoteStore;
use crate::models::Note;

/// In-memory [`NoteStore`] backing the service and handler tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    notes: Vec<Note>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a note with an explicit creation time, for ordering cases.
    pub fn seed(&self, user_id: &str, content: &str, created_at: DateTime<Utc>) -> Note {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let note = Note {
            id: inner.next_id,
            user_id: user_id.to_owned(),
            content: content.to_owned(),
            created_at,
        };
        inner.notes.push(note.clone());
        note
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn insert_note(
        &self,
        user_id: &str,
        content: &str,
    ) -> Result<Note, tokio_postgres::Error> {
        Ok(self.seed(user_id, content, Utc::now()))
    }

    async fn notes_for_user(&self, user_id: &str) -> Result<Vec<Note>, tokio_postgres::Error> {
        let inner = self.inner.lock().unwrap();
        let mut notes: Vec<Note> = inner
            .notes
            .iter()
            .filter(|note| note.user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }

    async fn delete_note(&self, user_id: &str, id: i64) -> Result<bool, tokio_postgres::Error> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.notes.len();
        inner
            .notes
            .retain(|note| !(note.id == id && note.user_id == user_id));
        Ok(inner.notes.len() != before)
    }
}
