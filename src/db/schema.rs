//! SQL DDL for the dataset and user tables.
//! SQLite-first design; `AUTOINCREMENT` keeps ids monotonic so a reset of
//! `sqlite_sequence` restarts them at 1 after a refresh.

pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS production (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NULL,
    name TEXT NULL,
    year TEXT NULL,
    value REAL NULL
);

CREATE TABLE IF NOT EXISTS processing (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NULL,
    subcategory TEXT NULL,
    name TEXT NULL,
    year TEXT NULL,
    value REAL NULL
);

CREATE TABLE IF NOT EXISTS commercialization (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NULL,
    name TEXT NULL,
    year TEXT NULL,
    liters REAL NULL
);

CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NULL,
    name TEXT NULL,
    year TEXT NULL,
    quantity INTEGER NULL,
    value REAL NULL
);

CREATE TABLE IF NOT EXISTS exports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NULL,
    name TEXT NULL,
    year TEXT NULL,
    quantity INTEGER NULL,
    value REAL NULL
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    hashed_password TEXT NOT NULL
);
"#;
