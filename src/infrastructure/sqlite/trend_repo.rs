use crate::domain::entities::trend_candidate::TrendCandidate;
use crate::domain::error::DomainError;
use crate::domain::ports::trend_repository::TrendRepository;
use crate::domain::values::category::{NicheCategory, ProductIntent};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::Mutex;

/// Column list used in all SELECT queries.
const SELECT_COLS: &str = "storage_key, title, platform, score, url, asin, category, product_intent, created_date, created_time, created_at";

pub struct SqliteTrendRepo {
    conn: Mutex<Connection>,
}

impl SqliteTrendRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_candidate(row: &rusqlite::Row) -> Result<TrendCandidate, rusqlite::Error> {
        let platform_str: String = row.get(2)?;
        let category_str: String = row.get(6)?;
        let intent_str: String = row.get(7)?;
        let created_str: String = row.get(10)?;

        // A row with an unknown platform is corrupt; drop it rather
        // than invent a source for it.
        let platform = platform_str.parse().map_err(|_| {
            eprintln!("Warning: dropping trend row with unknown platform '{platform_str}'");
            rusqlite::Error::InvalidParameterName(platform_str.clone())
        })?;

        Ok(TrendCandidate {
            title: row.get(1)?,
            platform,
            score: row.get(3)?,
            url: row.get(4)?,
            asin: row.get(5)?,
            category: category_str.parse().unwrap_or_else(|_| {
                eprintln!(
                    "Warning: invalid category '{category_str}' in trend row, defaulting to general"
                );
                NicheCategory::General
            }),
            product_intent: intent_str.parse().unwrap_or(ProductIntent::None),
            created_date: row.get(8)?,
            created_time: row.get(9)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&Utc))
                .ok(),
        })
    }
}

impl TrendRepository for SqliteTrendRepo {
    fn upsert(&self, candidates: &[TrendCandidate]) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "INSERT INTO daily_trends (storage_key, title, platform, score, url, asin, category, product_intent, created_date, created_time, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                 ON CONFLICT(storage_key) DO UPDATE SET
                     title = excluded.title,
                     platform = excluded.platform,
                     score = excluded.score,
                     url = excluded.url,
                     asin = excluded.asin,
                     category = excluded.category,
                     product_intent = excluded.product_intent,
                     created_date = excluded.created_date,
                     created_time = excluded.created_time,
                     created_at = excluded.created_at",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;

        for c in candidates {
            stmt.execute(params![
                c.storage_key(),
                c.title,
                c.platform.to_string(),
                c.score,
                c.url,
                c.asin,
                c.category.to_string(),
                c.product_intent.to_string(),
                c.created_date,
                c.created_time,
                c.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            ])
            .map_err(|e| DomainError::Database(format!("Failed to upsert trend: {e}")))?;
        }
        Ok(())
    }

    fn recent_since(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<TrendCandidate>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!(
            "SELECT {SELECT_COLS} FROM daily_trends WHERE created_at >= ?1 ORDER BY created_at DESC LIMIT ?2"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(
                params![cutoff.to_rfc3339(), limit as i64],
                Self::row_to_candidate,
            )
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "DELETE FROM daily_trends WHERE created_at < ?1",
            params![cutoff.to_rfc3339()],
        )
        .map_err(|e| DomainError::Database(format!("Failed to clean trends: {e}")))
    }

    fn missing_asin(&self, limit: usize) -> Result<Vec<TrendCandidate>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!(
            "SELECT {SELECT_COLS} FROM daily_trends WHERE asin IS NULL OR asin = '' ORDER BY created_at ASC LIMIT ?1"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![limit as i64], Self::row_to_candidate)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    fn set_asin(&self, storage_key: &str, asin: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let changed = conn
            .execute(
                "UPDATE daily_trends SET asin = ?1 WHERE storage_key = ?2",
                params![asin, storage_key],
            )
            .map_err(|e| DomainError::Database(format!("Failed to set asin: {e}")))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!(
                "No trend row with key '{storage_key}'"
            )));
        }
        Ok(())
    }
}
