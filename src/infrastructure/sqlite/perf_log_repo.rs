use crate::domain::error::DomainError;
use crate::domain::ports::perf_log_repository::PerfLogRepository;
use crate::domain::values::localtime::local_stamp;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::Mutex;

pub struct SqlitePerfLogRepo {
    conn: Mutex<Connection>,
}

impl SqlitePerfLogRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl PerfLogRepository for SqlitePerfLogRepo {
    fn log(
        &self,
        level: &str,
        message: &str,
        context: &str,
        extra: Option<serde_json::Value>,
    ) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let now = Utc::now();
        let (created_date, created_time) = local_stamp(now);
        conn.execute(
            "INSERT INTO performance_logs (id, level, message, context, extra, created_date, created_time, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                uuid::Uuid::new_v4().to_string(),
                level,
                message,
                context,
                extra.map(|e| e.to_string()),
                created_date,
                created_time,
                now.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to log perf event: {e}")))?;
        Ok(())
    }

    fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "DELETE FROM performance_logs WHERE created_at < ?1",
            params![cutoff.to_rfc3339()],
        )
        .map_err(|e| DomainError::Database(format!("Failed to clean perf logs: {e}")))
    }
}
