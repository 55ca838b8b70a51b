use super::db::{encode_timestamp, timestamp_column, Db};
use crate::libs::user::User;
use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

const INSERT_USER: &str =
    "INSERT INTO users (name, token, created_date) VALUES (?1, ?2, ?3) RETURNING id, name, token, created_date";
const SELECT_ALL_USERS: &str = "SELECT id, name, token, created_date FROM users ORDER BY name";
const SELECT_USER_BY_NAME: &str = "SELECT id, name, token, created_date FROM users WHERE name = ?1";
const SELECT_USER_BY_TOKEN: &str = "SELECT id, name, token, created_date FROM users WHERE token = ?1";

pub struct Users {
    db: Db,
}

impl Users {
    pub fn new(db: Db) -> Self {
        Users { db }
    }

    /// Creates a user with a freshly generated API token.
    pub fn create(&self, name: &str) -> Result<User> {
        let token = Uuid::new_v4().simple().to_string();
        let conn = self.db.conn();
        let user = conn.query_row(
            INSERT_USER,
            params![name, token, encode_timestamp(&Utc::now())],
            user_from_row,
        )?;
        Ok(user)
    }

    pub fn list(&self) -> Result<Vec<User>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_ALL_USERS)?;
        let users = stmt.query_map([], user_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<User>> {
        let conn = self.db.conn();
        conn.query_row(SELECT_USER_BY_NAME, params![name], user_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Resolves the principal behind an API token.
    pub fn find_by_token(&self, token: &str) -> Result<Option<User>> {
        let conn = self.db.conn();
        conn.query_row(SELECT_USER_BY_TOKEN, params![token], user_from_row)
            .optional()
            .map_err(Into::into)
    }
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        token: row.get(2)?,
        created_date: timestamp_column(row, 3)?,
    })
}
