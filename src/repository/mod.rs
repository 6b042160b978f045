mod embedded;
#[cfg(test)]
pub mod memory;

use embedded::migrations;

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls};

use crate::models::Note;

/// Storage contract for notes. Every operation is scoped to the
/// caller-supplied user id; rows owned by other ids stay invisible.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn insert_note(
        &self,
        user_id: &str,
        content: &str,
    ) -> Result<Note, tokio_postgres::Error>;

    /// All notes owned by `user_id`, newest first.
    async fn notes_for_user(&self, user_id: &str) -> Result<Vec<Note>, tokio_postgres::Error>;

    /// Deletes at most one row matching both `id` and `user_id`. Returns
    /// whether a row matched; zero matches is not an error.
    async fn delete_note(&self, user_id: &str, id: i64) -> Result<bool, tokio_postgres::Error>;
}

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_dsn: String) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(&database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

#[async_trait]
impl NoteStore for Repository {
    async fn insert_note(
        &self,
        user_id: &str,
        content: &str,
    ) -> Result<Note, tokio_postgres::Error> {
        let row = self.client.query_one(
            "INSERT INTO notes (user_id, content) VALUES ($1, $2) RETURNING id, user_id, content, created_at",
            &[&user_id, &content],
        ).await?;

        Ok(Note {
            id: row.get("id"),
            user_id: row.get("user_id"),
            content: row.get("content"),
            created_at: row.get("created_at"),
        })
    }

    async fn notes_for_user(&self, user_id: &str) -> Result<Vec<Note>, tokio_postgres::Error> {
        let rows = self.client.query(
            "SELECT id, user_id, content, created_at FROM notes WHERE user_id = $1 ORDER BY created_at DESC",
            &[&user_id],
        ).await?;

        let mut vec: Vec<Note> = Vec::new();

        for row in rows {
            vec.push(Note {
                id: row.get("id"),
                user_id: row.get("user_id"),
                content: row.get("content"),
                created_at: row.get("created_at"),
            });
        }

        Ok(vec)
    }

    async fn delete_note(&self, user_id: &str, id: i64) -> Result<bool, tokio_postgres::Error> {
        let rows = self
            .client
            .execute(
                "DELETE FROM notes WHERE id = $1 AND user_id = $2",
                &[&id, &user_id],
            )
            .await?;

        Ok(rows == 1)
    }
}
