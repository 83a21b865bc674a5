use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::{Average, GenerationEvent, ALL_USERS};

pub struct GenerationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GenerationRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, event: &GenerationEvent) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO events (id, username, value, timestamp) VALUES (?1, ?2, ?3, ?4)")
            .bind(&event.id)
            .bind(&event.user)
            .bind(event.value)
            .bind(event.stored_timestamp())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Exact-match lookup. Users without events, including `All` on an empty
    /// store, yield `None`.
    pub async fn find_average(&self, username: &str) -> Result<Option<Average>> {
        let average = sqlx::query_as::<_, Average>(
            "SELECT username, count, average FROM averages WHERE username = ?1 AND count > 0",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(average)
    }

    pub async fn list_averages(&self) -> Result<Vec<Average>> {
        let averages = sqlx::query_as::<_, Average>(
            "SELECT username, count, average FROM averages WHERE username <> ?1 ORDER BY username",
        )
        .bind(ALL_USERS)
        .fetch_all(self.pool)
        .await?;

        Ok(averages)
    }

    pub async fn list_users(&self) -> Result<Vec<String>> {
        let users = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT username FROM events ORDER BY username",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<GenerationEvent>> {
        let events = sqlx::query_as::<_, GenerationEvent>(
            r#"
            SELECT id, username, value, timestamp
            FROM events
            ORDER BY timestamp DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
