use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS daily_trends (
            storage_key TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            platform TEXT NOT NULL,
            score REAL NOT NULL DEFAULT 0,
            url TEXT,
            asin TEXT,
            category TEXT NOT NULL DEFAULT 'general',
            product_intent TEXT NOT NULL DEFAULT 'none',
            created_date TEXT NOT NULL,
            created_time TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS analytics_events (
            id TEXT PRIMARY KEY,
            asin TEXT NOT NULL,
            revenue REAL NOT NULL DEFAULT 0,
            click_rate REAL NOT NULL DEFAULT 0,
            recorded_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS performance_logs (
            id TEXT PRIMARY KEY,
            level TEXT NOT NULL,
            message TEXT NOT NULL,
            context TEXT NOT NULL,
            extra TEXT,
            created_date TEXT NOT NULL,
            created_time TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_trends_created ON daily_trends(created_at);
        CREATE INDEX IF NOT EXISTS idx_trends_score ON daily_trends(score);
        CREATE INDEX IF NOT EXISTS idx_trends_asin ON daily_trends(asin);
        CREATE INDEX IF NOT EXISTS idx_analytics_asin ON analytics_events(asin);
        CREATE INDEX IF NOT EXISTS idx_analytics_recorded ON analytics_events(recorded_at);
        CREATE INDEX IF NOT EXISTS idx_perf_created ON performance_logs(created_at);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
