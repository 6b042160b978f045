use crate::{
    dto::{CreateNoteRequest, NoteResponse},
    repository::NoteStore,
};

use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("note content must not be empty")]
    EmptyContent,
    #[error(transparent)]
    Database(#[from] tokio_postgres::Error),
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Creates a note owned by `user_id`. Content that is empty after
    /// trimming is rejected; accepted content is stored as supplied.
    pub async fn create_note(
        &self,
        user_id: &str,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, NoteError> {
        if request.content.trim().is_empty() {
            return Err(NoteError::EmptyContent);
        }

        self.store
            .insert_note(user_id, &request.content)
            .await
            .map(|note| NoteResponse {
                id: note.id,
                user_id: note.user_id,
                content: note.content,
                created_at: note.created_at,
            })
            .map_err(NoteError::from)
    }

    pub async fn list_notes(&self, user_id: &str) -> Result<Vec<NoteResponse>, NoteError> {
        self.store
            .notes_for_user(user_id)
            .await
            .map(|notes| {
                notes
                    .into_iter()
                    .map(|note| NoteResponse {
                        id: note.id,
                        user_id: note.user_id,
                        content: note.content,
                        created_at: note.created_at,
                    })
                    .collect()
            })
            .map_err(NoteError::from)
    }

    /// Returns whether a row was removed. Zero matches (unknown id, or a
    /// note owned by a different user) is success, not an error.
    pub async fn delete_note(&self, user_id: &str, id: i64) -> Result<bool, NoteError> {
        self.store
            .delete_note(user_id, id)
            .await
            .map_err(NoteError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;

    fn service() -> NoteService {
        NoteService::new(Arc::new(MemoryStore::new()))
    }

    fn create_request(content: &str) -> CreateNoteRequest {
        CreateNoteRequest {
            content: content.to_owned(),
        }
    }

    #[tokio::test]
    async fn create_rejects_empty_content() {
        let service = service();

        let err = service
            .create_note("alice", create_request(""))
            .await
            .unwrap_err();

        assert!(matches!(err, NoteError::EmptyContent));
        assert!(service.list_notes("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_whitespace_only_content() {
        let service = service();

        let err = service
            .create_note("alice", create_request("  \t\n  "))
            .await
            .unwrap_err();

        assert!(matches!(err, NoteError::EmptyContent));
        assert!(service.list_notes("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_stores_content_as_supplied() {
        let service = service();

        let note = service
            .create_note("alice", create_request("  buy milk  "))
            .await
            .unwrap();

        assert_eq!(note.content, "  buy milk  ");
        assert_eq!(note.user_id, "alice");
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_requesting_user() {
        let service = service();

        service
            .create_note("alice", create_request("alice's note"))
            .await
            .unwrap();
        service
            .create_note("bob", create_request("bob's note"))
            .await
            .unwrap();

        let notes = service.list_notes("alice").await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "alice's note");

        assert!(service.list_notes("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_matched() {
        let service = service();

        let note = service
            .create_note("alice", create_request("to delete"))
            .await
            .unwrap();

        assert!(service.delete_note("alice", note.id).await.unwrap());
        assert!(!service.delete_note("alice", note.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_ignores_other_users_notes() {
        let service = service();

        let note = service
            .create_note("alice", create_request("mine"))
            .await
            .unwrap();

        assert!(!service.delete_note("bob", note.id).await.unwrap());
        assert_eq!(service.list_notes("alice").await.unwrap().len(), 1);
    }
}
