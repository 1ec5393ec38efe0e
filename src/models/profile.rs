//! User profile model
//!
//! Stores the user's name and default age for report headers.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{Database, DbError, DbResult};

/// User profile (single row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub default_age: Option<u32>,
    pub created_at: String,
    pub updated_at: String,
}

impl UserProfile {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get("name")?,
            default_age: row.get("default_age")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the profile, if one has been set
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM user_profile WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set or update the profile (upsert)
    pub fn set(conn: &Connection, name: &str, default_age: Option<u32>) -> DbResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DbError::EmptyProfileName);
        }

        conn.execute(
            r#"
            INSERT INTO user_profile (id, name, default_age)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                default_age = excluded.default_age,
                updated_at = datetime('now')
            "#,
            params![name, default_age],
        )?;

        Self::get(conn)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}

/// Data access for the user profile.
///
/// Passed explicitly to the service and binaries; nothing holds a global handle.
pub trait ProfileStore: Send + Sync {
    fn load_profile(&self) -> DbResult<Option<UserProfile>>;
    fn save_profile(&self, name: &str, default_age: Option<u32>) -> DbResult<UserProfile>;
}

impl ProfileStore for Database {
    fn load_profile(&self) -> DbResult<Option<UserProfile>> {
        self.with_conn(UserProfile::get)
    }

    fn save_profile(&self, name: &str, default_age: Option<u32>) -> DbResult<UserProfile> {
        self.with_conn(|conn| UserProfile::set(conn, name, default_age))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn store() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        db
    }

    #[test]
    fn test_load_empty_profile() {
        assert_eq!(store().load_profile().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let db = store();
        let saved = db.save_profile("Asha", Some(31)).unwrap();
        assert_eq!(saved.name, "Asha");
        assert_eq!(saved.default_age, Some(31));

        let loaded = db.load_profile().unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_save_upserts_single_row() {
        let db = store();
        db.save_profile("Asha", Some(31)).unwrap();
        let updated = db.save_profile("  Asha K  ", None).unwrap();
        assert_eq!(updated.name, "Asha K");
        assert_eq!(updated.default_age, None);

        let count: i64 = db
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM user_profile", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let db = store();
        assert!(matches!(db.save_profile("   ", None), Err(DbError::EmptyProfileName)));
    }
}
