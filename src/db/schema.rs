pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    ID       INTEGER PRIMARY KEY AUTOINCREMENT,
    Name     TEXT NOT NULL,
    Category TEXT NOT NULL DEFAULT '',
    Value    TEXT NOT NULL,
    Date     TEXT NOT NULL,
    Created  TEXT NOT NULL,
    Updated  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(Date);
"#;
