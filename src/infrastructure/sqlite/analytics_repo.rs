use crate::domain::error::DomainError;
use crate::domain::ports::analytics_repository::{AnalyticsRepository, RevenueEvent};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

pub struct SqliteAnalyticsRepo {
    conn: Mutex<Connection>,
}

impl SqliteAnalyticsRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_event(row: &rusqlite::Row) -> Result<RevenueEvent, rusqlite::Error> {
        let recorded_str: String = row.get(4)?;
        Ok(RevenueEvent {
            id: row.get(0)?,
            asin: row.get(1)?,
            revenue: row.get(2)?,
            click_rate: row.get(3)?,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

impl AnalyticsRepository for SqliteAnalyticsRepo {
    fn record_event(
        &self,
        asin: &str,
        revenue: f64,
        click_rate: f64,
    ) -> Result<RevenueEvent, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let event = RevenueEvent {
            id: uuid::Uuid::new_v4().to_string(),
            asin: asin.to_string(),
            revenue,
            click_rate,
            recorded_at: Utc::now(),
        };
        conn.execute(
            "INSERT INTO analytics_events (id, asin, revenue, click_rate, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id,
                event.asin,
                event.revenue,
                event.click_rate,
                event.recorded_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to record event: {e}")))?;
        Ok(event)
    }

    fn recent_events(&self, limit: usize) -> Result<Vec<RevenueEvent>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT id, asin, revenue, click_rate, recorded_at FROM analytics_events
                 ORDER BY recorded_at DESC LIMIT ?1",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let events = stmt
            .query_map(params![limit as i64], Self::row_to_event)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(events)
    }

    fn latest_revenue(&self, asin: &str) -> Result<Option<f64>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            "SELECT revenue FROM analytics_events WHERE asin = ?1
             ORDER BY recorded_at DESC LIMIT 1",
            params![asin],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "DELETE FROM analytics_events WHERE recorded_at < ?1",
            params![cutoff.to_rfc3339()],
        )
        .map_err(|e| DomainError::Database(format!("Failed to clean events: {e}")))
    }
}
