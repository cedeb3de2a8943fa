//! User persistence behind a repository interface. The rest of the crate
//! only ever sees [`UserStore`]; the storage engine itself is opaque.

use std::fmt;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::models::user::{NewUser, User};

#[derive(Debug)]
pub enum StoreError {
    /// A record with the same unique key already exists.
    Duplicate,
    Unavailable(sqlx::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Duplicate => write!(f, "record already exists"),
            StoreError::Unavailable(e) => write!(f, "store unavailable: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(inner: sqlx::Error) -> Self {
        if let Some(db_err) = inner.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::Duplicate;
            }
        }
        StoreError::Unavailable(inner)
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
}

pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Bootstrap the users table on first run.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                role TEXT NOT NULL DEFAULT 'User',
                avatar_url TEXT,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)
             RETURNING id, name, email, role, avatar_url, password_hash, created_at",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}

/// In-memory store for exercising handlers without a database.
#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryUserStore {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.id == id).cloned())
        }

        async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(StoreError::Duplicate);
            }
            let user = User {
                id: users.len() as i64 + 1,
                name: user.name,
                email: user.email,
                role: "User".to_string(),
                avatar_url: None,
                password_hash: user.password_hash,
                created_at: chrono::Utc::now().naive_utc(),
            };
            users.push(user.clone());
            Ok(user)
        }
    }
}
