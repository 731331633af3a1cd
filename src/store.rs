use chrono::Utc;
use sqlx::{
    error::ErrorKind, migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Pool, Sqlite,
};

use crate::model::{Task, User};

const TASK_COLUMNS: &str = "id, content, completed, date_created";
const USER_COLUMNS: &str = "id, username, password";

/// Errors surfaced by [`Store`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task {id} not found")]
    NotFound { id: i64 },

    /// A required column was NULL or a unique column collided.
    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation | ErrorKind::NotNullViolation
            ) {
                return Self::Constraint(db_err.message().to_owned());
            }
        }
        Self::Database(err)
    }
}

/// Handle to the SQLite database holding the task list and the user slot.
#[derive(Debug, Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Open a file-backed store, creating the database file if it is missing.
    pub async fn open(db_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            tracing::info!(db_url, "creating database");
            Sqlite::create_database(db_url).await?;
        } else {
            tracing::debug!(db_url, "database already exists");
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(db_url)
            .await?;

        Ok(Self { pool })
    }

    /// Open a private in-memory store.
    ///
    /// Every SQLite connection to `:memory:` is its own database, so the pool
    /// is pinned to a single connection that is never recycled.
    #[cfg(test)]
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Create the `tasks` and `users` tables if they don't exist yet.
    pub async fn create_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content VARCHAR(200) NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            date_created TEXT NOT NULL
        );"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username VARCHAR(20) NOT NULL UNIQUE,
            password VARCHAR(20) NOT NULL UNIQUE
        );"#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All tasks, oldest first.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY date_created, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, StoreError> {
        sqlx::query_as::<_, Task>(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    /// Insert a task stamped with the current UTC time.
    ///
    /// A `None` content is bound as NULL and rejected by the column constraint.
    pub async fn insert_task(&self, content: Option<&str>) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (content, date_created) VALUES (?, ?) RETURNING {TASK_COLUMNS}"
        ))
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = task.id, "task inserted");
        Ok(task)
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), StoreError> {
        let rows_affected = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if rows_affected == 0 {
            return Err(StoreError::NotFound { id });
        }

        tracing::debug!(id, "task deleted");
        Ok(())
    }

    /// Overwrite the content of a task; `id`, `completed` and `date_created`
    /// are left untouched.
    pub async fn update_task_content(
        &self,
        id: i64,
        content: Option<&str>,
    ) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET content = ? WHERE id = ? RETURNING {TASK_COLUMNS}"
        ))
        .bind(content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { id })?;

        tracing::debug!(id, "task updated");
        Ok(task)
    }

    /// Replace the current user with a new row.
    ///
    /// The newest existing row is deleted and the new one inserted in a
    /// single transaction. The first statement is a write, so concurrent
    /// replaces queue on SQLite's writer lock and cannot interleave. If the
    /// insert fails the previous user is kept.
    pub async fn replace_user(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, StoreError> {
        let mut tx = self.pool.begin().await?;

        let replaced = sqlx::query("DELETE FROM users WHERE id = (SELECT MAX(id) FROM users)")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password) VALUES (?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(password)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(id = user.id, replaced, "user slot replaced");
        Ok(user)
    }
}
