//! Operational alerting with a per-type cooldown window. The cooldown
//! state is an explicit, constructed-per-process object with an
//! injectable clock, so tests control time deterministically.

use crate::domain::ports::perf_log_repository::PerfLogRepository;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

pub const ALERT_COOLDOWN_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertOutcome {
    /// Alert recorded through the telemetry sink.
    Sent,
    /// Suppressed: the same alert type fired within the cooldown window.
    Skipped,
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct AlertManager {
    perf: Arc<dyn PerfLogRepository>,
    cooldown: Duration,
    last_sent: HashMap<String, DateTime<Utc>>,
    clock: Clock,
}

impl AlertManager {
    pub fn new(perf: Arc<dyn PerfLogRepository>) -> Self {
        Self::with_clock(
            perf,
            Duration::minutes(ALERT_COOLDOWN_MINUTES),
            Box::new(Utc::now),
        )
    }

    pub fn with_clock(perf: Arc<dyn PerfLogRepository>, cooldown: Duration, clock: Clock) -> Self {
        Self {
            perf,
            cooldown,
            last_sent: HashMap::new(),
            clock,
        }
    }

    /// Record an alert unless one of the same type fired within the
    /// cooldown window. Telemetry failures are logged and swallowed; the
    /// cooldown still advances so a broken sink cannot cause a storm.
    pub fn send(
        &mut self,
        alert_type: &str,
        message: &str,
        details: Option<serde_json::Value>,
    ) -> AlertOutcome {
        let now = (self.clock)();

        if let Some(last) = self.last_sent.get(alert_type) {
            if now - *last < self.cooldown {
                eprintln!("Skipping duplicate alert: {alert_type}");
                return AlertOutcome::Skipped;
            }
        }
        self.last_sent.insert(alert_type.to_string(), now);

        let msg = sanitize(message);
        if let Err(e) = self.perf.log("error", &msg, alert_type, details) {
            eprintln!("Warning: failed to record alert '{alert_type}': {e}");
        }
        AlertOutcome::Sent
    }
}

/// Collapse newlines and double quotes so the message stays a single
/// safe line in the store and in log output.
fn sanitize(text: &str) -> String {
    text.replace(['\n', '\r'], " ").replace('"', "'").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_flattens_lines_and_quotes() {
        assert_eq!(sanitize("a\nb\r\"c\""), "a b 'c'");
    }
}
