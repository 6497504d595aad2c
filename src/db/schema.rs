pub const SCHEMA: &str = r#"
-- summaries table
-- AUTOINCREMENT keeps ids monotonic: deleted ids are never reused.
CREATE TABLE IF NOT EXISTS summaries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    summary TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_summaries_url ON summaries(url);
"#;
