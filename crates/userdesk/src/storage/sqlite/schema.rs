//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create all tables.
///
/// `AUTOINCREMENT` keeps ids of deleted rows from being handed out again.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL
);
"#;

pub const SELECT_USERS: &str = r#"
SELECT id, name, email
FROM users
ORDER BY id
"#;

/// Substring match on either column. `instr` keeps `%` and `_` in the term literal.
pub const SELECT_USERS_BY_TERM: &str = r#"
SELECT id, name, email
FROM users
WHERE instr(name, ?1) > 0 OR instr(email, ?1) > 0
ORDER BY id
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, name, email
FROM users
WHERE id = ?1
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (name, email)
VALUES (?1, ?2)
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET name = ?2, email = ?3
WHERE id = ?1
"#;

pub const DELETE_USER: &str = r#"
DELETE FROM users
WHERE id = ?1
"#;

// Transaction control
pub const BEGIN: &str = "BEGIN";
pub const COMMIT: &str = "COMMIT";
pub const ROLLBACK: &str = "ROLLBACK";
