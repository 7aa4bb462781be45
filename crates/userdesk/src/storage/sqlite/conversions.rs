//! SQLite row conversion functions.

use rusqlite::Row;
use userdesk_core::user::{User, UserId};

/// Convert a SQLite row to a User.
///
/// Expected columns: id, name, email
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let email: String = row.get(2)?;

    Ok(User {
        id: UserId(id),
        name,
        email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::schema;

    #[test]
    fn test_row_to_user() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(schema::CREATE_TABLES).unwrap();
        conn.execute(schema::INSERT_USER, ["Ann", "ann@x.com"])
            .unwrap();

        let user = conn
            .query_row(schema::SELECT_USER_BY_ID, [1], row_to_user)
            .unwrap();

        assert_eq!(user, User::new(1, "Ann", "ann@x.com"));
    }
}
