use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::Summary;

use super::schema::SCHEMA;

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;

        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Insert a new record with an empty summary body and return its id.
    pub async fn create(&self, url: &str) -> Result<i64> {
        let url = url.to_string();
        let created_at = Utc::now().to_rfc3339();
        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO summaries (url, summary, created_at) VALUES (?1, '', ?2)",
                    params![url, created_at],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;
        Ok(id)
    }

    /// Fetch a single record. A missing row is `None`, not an error.
    pub async fn get(&self, id: i64) -> Result<Option<Summary>> {
        let summary = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, url, summary, created_at FROM summaries WHERE id = ?1",
                )?;
                let summary = stmt
                    .query_row(params![id], |row| Ok(summary_from_row(row)))
                    .optional()?;
                Ok(summary)
            })
            .await?;
        Ok(summary)
    }

    pub async fn get_all(&self) -> Result<Vec<Summary>> {
        let summaries = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, url, summary, created_at FROM summaries ORDER BY id",
                )?;
                let summaries = stmt
                    .query_map([], |row| Ok(summary_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(summaries)
            })
            .await?;
        Ok(summaries)
    }

    /// Replace `url` and `summary` of an existing record and return it.
    /// Returns `None` when no row matched. The write and the re-read run
    /// inside one connection call, so no partial update is ever observable.
    pub async fn update(&self, id: i64, url: &str, summary: &str) -> Result<Option<Summary>> {
        let url = url.to_string();
        let summary = summary.to_string();
        let updated = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE summaries SET url = ?1, summary = ?2 WHERE id = ?3",
                    params![url, summary, id],
                )?;
                if changed == 0 {
                    return Ok(None);
                }
                let mut stmt = conn.prepare(
                    "SELECT id, url, summary, created_at FROM summaries WHERE id = ?1",
                )?;
                let summary = stmt
                    .query_row(params![id], |row| Ok(summary_from_row(row)))
                    .optional()?;
                Ok(summary)
            })
            .await?;
        Ok(updated)
    }

    /// Remove a record. A single conditional DELETE, so success never
    /// depends on a prior read of the row.
    pub async fn delete(&self, id: i64) -> Result<Option<i64>> {
        let deleted = self
            .conn
            .call(move |conn| {
                let changed = conn.execute("DELETE FROM summaries WHERE id = ?1", params![id])?;
                Ok(if changed > 0 { Some(id) } else { None })
            })
            .await?;
        Ok(deleted)
    }

    /// Store a generated summary body, leaving `url` and `created_at`
    /// untouched. Used only by the background generator.
    pub async fn set_generated_summary(&self, id: i64, summary: String) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE summaries SET summary = ?1 WHERE id = ?2",
                    params![summary, id],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC3339 first (e.g., "2026-01-11T12:34:56+00:00")
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Try SQLite datetime format (e.g., "2026-01-11 12:34:56")
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

fn summary_from_row(row: &Row) -> Summary {
    Summary {
        id: row.get(0).unwrap(),
        url: row.get(1).unwrap(),
        summary: row.get(2).unwrap(),
        created_at: row
            .get::<_, String>(3)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(Utc::now),
    }
}
