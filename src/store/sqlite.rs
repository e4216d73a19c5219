use super::todo::Todo;
use crate::error::StoreError;
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use std::path::Path;
use uuid::Uuid;

/// SQLite-backed todo store using an sqlx async pool.
///
/// One table, five operations. The pool is opened once at process start and
/// closed once on clean exit; operations never run concurrently, so no
/// per-operation transaction discipline is needed.
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    /// Create a store over an existing pool and run the schema migration.
    pub async fn new(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                 id         TEXT PRIMARY KEY,
                 title      TEXT NOT NULL,
                 created_at TEXT NOT NULL,
                 updated_at TEXT NOT NULL
             )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Open (or create) the database file at `db_path`.
    pub async fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        Self::new(pool).await
    }

    /// Release the underlying connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// All todos in insertion order. An empty list is not an error.
    pub async fn all(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, title, created_at, updated_at
             FROM todos
             ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_todo_row).collect()
    }

    /// Insert a new todo and return its freshly assigned id.
    pub async fn create(&self, title: &str) -> Result<String, StoreError> {
        let title = require_text(title, "title must be a non-empty string")?;

        let id = Uuid::new_v4().to_string();
        let timestamp = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO todos (id, title, created_at, updated_at)
             VALUES ($1, $2, $3, $3)",
        )
        .bind(&id)
        .bind(title)
        .bind(&timestamp)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Overwrite the title of an existing todo and return its id.
    pub async fn update(&self, id: &str, title: &str) -> Result<String, StoreError> {
        let id = require_text(id, "missing todo id")?;
        let title = require_text(title, "title must be a non-empty string")?;

        let timestamp = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE todos
             SET title = $1, updated_at = $2
             WHERE id = $3",
        )
        .bind(title)
        .bind(&timestamp)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        Ok(id.to_string())
    }

    /// Remove a todo and return its id.
    pub async fn delete(&self, id: &str) -> Result<String, StoreError> {
        let id = require_text(id, "missing todo id")?;

        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        Ok(id.to_string())
    }

    /// All todos whose title contains `term` as a substring. No match is an
    /// empty list, not an error.
    pub async fn search(&self, term: &str) -> Result<Vec<Todo>, StoreError> {
        let term = require_text(term, "search term must be a non-empty string")?;

        let pattern = format!("%{}%", escape_like(term));
        let rows = sqlx::query(
            "SELECT id, title, created_at, updated_at
             FROM todos
             WHERE title LIKE $1 ESCAPE '\\'
             ORDER BY created_at ASC",
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_todo_row).collect()
    }
}

fn require_text<'a>(value: &'a str, message: &str) -> Result<&'a str, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(message.to_string()));
    }
    Ok(trimmed)
}

/// Escape LIKE metacharacters so user terms match literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn map_todo_row(row: &SqliteRow) -> Result<Todo, StoreError> {
    Ok(Todo {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> TodoStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        TodoStore::new(pool).await.unwrap()
    }

    #[tokio::test]
    async fn create_then_all_contains_title_and_fresh_id() {
        let store = store().await;

        let id = store.create("buy milk").await.unwrap();
        let todos = store.all().await.unwrap();

        assert!(!id.is_empty());
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, id);
        assert_eq!(todos[0].title, "buy milk");
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let store = store().await;

        let first = store.create("one").await.unwrap();
        let second = store.create("two").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn all_on_empty_store_returns_empty_list() {
        let store = store().await;
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_blank_title_and_inserts_nothing() {
        let store = store().await;

        let empty = store.create("").await;
        let blank = store.create("   ").await;

        assert!(matches!(empty, Err(StoreError::Validation(_))));
        assert!(matches!(blank, Err(StoreError::Validation(_))));
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_changes_title_and_preserves_identity() {
        let store = store().await;
        let id = store.create("buy milk").await.unwrap();
        let created_at = store.all().await.unwrap()[0].created_at.clone();

        let returned = store.update(&id, "milk bought").await.unwrap();
        let todos = store.all().await.unwrap();

        assert_eq!(returned, id);
        assert_eq!(todos[0].id, id);
        assert_eq!(todos[0].title, "milk bought");
        assert_eq!(todos[0].created_at, created_at);
    }

    #[tokio::test]
    async fn update_unknown_id_fails_not_found() {
        let store = store().await;

        let result = store.update("no-such-id", "anything").await;

        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn update_blank_arguments_fail_validation() {
        let store = store().await;
        let id = store.create("keep me").await.unwrap();

        assert!(matches!(store.update("", "x").await, Err(StoreError::Validation(_))));
        assert!(matches!(store.update(&id, " ").await, Err(StoreError::Validation(_))));
        assert_eq!(store.all().await.unwrap()[0].title, "keep me");
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = store().await;
        let id = store.create("ephemeral").await.unwrap();

        let returned = store.delete(&id).await.unwrap();

        assert_eq!(returned, id);
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_id_fails_not_found() {
        let store = store().await;
        let result = store.delete("missing").await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn delete_blank_id_fails_validation() {
        let store = store().await;
        let result = store.delete("  ").await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn search_returns_exactly_the_matching_subset() {
        let store = store().await;
        store.create("buy milk").await.unwrap();
        store.create("walk the dog").await.unwrap();
        store.create("buy milk chocolate").await.unwrap();

        let hits = store.search("milk").await.unwrap();

        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|todo| todo.title.contains("milk")));
    }

    #[tokio::test]
    async fn search_without_match_returns_empty_not_error() {
        let store = store().await;
        store.create("buy milk").await.unwrap();

        let hits = store.search("groceries").await.unwrap();

        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn search_blank_term_fails_validation() {
        let store = store().await;
        let result = store.search("").await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn search_treats_like_wildcards_literally() {
        let store = store().await;
        store.create("sale at 100%").await.unwrap();
        store.create("sale at 100x").await.unwrap();

        let hits = store.search("100%").await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "sale at 100%");
    }

    #[tokio::test]
    async fn open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("todos.db");

        let store = TodoStore::open(&db_path).await.unwrap();
        store.create("persisted").await.unwrap();

        assert!(db_path.exists());
        store.close().await;
    }
}
