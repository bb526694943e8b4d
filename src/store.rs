//! Storage adapter: `todo` table DDL, connection pool setup and CRUD statements against SQLite.

use crate::error::AppError;
use crate::model::TodoTask;
use crate::sql::{select_all, select_by_ids, QueryBuf, CREATE_TODO_TABLE, DELETE_TODO, INSERT_TODO, UPDATE_TODO};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::time::Duration;

/// Persistence boundary used by [`crate::service::TodoService`].
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Every stored task, ordered by id.
    async fn list_all(&self) -> Result<Vec<TodoTask>, AppError>;

    /// Tasks whose id is in `ids`; empty `ids` behaves like [`TodoStore::list_all`].
    async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<TodoTask>, AppError>;

    /// Insert in a transaction, then read the row back. Duplicate id is `AppError::Conflict`.
    async fn create(&self, task: &TodoTask) -> Result<TodoTask, AppError>;

    /// One DELETE per id; a failing id is logged and skipped. Returns rows removed.
    async fn delete_by_ids(&self, ids: &[i64]) -> Result<u64, AppError>;

    /// Overwrite name/completed of `task.id`. Returns rows affected (0 when no such id).
    async fn update_by_id(&self, task: &TodoTask) -> Result<u64, AppError>;
}

/// Open (creating if missing) the database file. WAL journaling is set here, once per connection.
pub async fn connect_pool(path: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Create the `todo` table if it does not exist.
pub async fn ensure_todo_table(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(CREATE_TODO_TABLE).execute(pool).await?;
    Ok(())
}

#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteTodoStore { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<TodoTask>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, TodoTask>(&q.sql);
        for id in &q.params {
            query = query.bind(*id);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn list_all(&self) -> Result<Vec<TodoTask>, AppError> {
        self.query_many(&select_all()).await
    }

    async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<TodoTask>, AppError> {
        self.query_many(&select_by_ids(ids)).await
    }

    async fn create(&self, task: &TodoTask) -> Result<TodoTask, AppError> {
        tracing::debug!(sql = INSERT_TODO, id = task.id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        sqlx::query(INSERT_TODO)
            .bind(task.id)
            .bind(task.name.clone())
            .bind(task.completed)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_insert(e, task.id))?;
        tx.commit().await?;

        self.get_by_ids(&[task.id])
            .await?
            .into_iter()
            .next()
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn delete_by_ids(&self, ids: &[i64]) -> Result<u64, AppError> {
        let mut removed = 0u64;
        for &id in ids {
            tracing::debug!(sql = DELETE_TODO, id, "query");
            match sqlx::query(DELETE_TODO).bind(id).execute(&self.pool).await {
                Ok(done) => {
                    removed += done.rows_affected();
                    tracing::info!(id, rows = done.rows_affected(), "deleted todo");
                }
                Err(e) => tracing::warn!(id, error = %e, "failed to delete todo"),
            }
        }
        Ok(removed)
    }

    async fn update_by_id(&self, task: &TodoTask) -> Result<u64, AppError> {
        tracing::debug!(sql = UPDATE_TODO, id = task.id, "query");
        let done = sqlx::query(UPDATE_TODO)
            .bind(task.name.clone())
            .bind(task.completed)
            .bind(task.id)
            .execute(&self.pool)
            .await?;
        let rows = done.rows_affected();
        if rows > 0 {
            tracing::info!(id = task.id, "updated todo");
        } else {
            tracing::info!(id = task.id, "no todo found to update");
        }
        Ok(rows)
    }
}
