use crate::db::models::{ActionRecord, User};
use crate::db::schema::{SQLITE_ADDITIVE_COLUMNS, SQLITE_INIT};
use crate::error::GarageError;
use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use subtle::ConstantTimeEq;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

/// All persistent state of the garage. Every query below, apart from the
/// user lookups, is filtered on the owning `utente_id`.
#[derive(Clone)]
pub struct GarageStorage {
    pool: SqlitePool,
}

impl GarageStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and bring
    /// the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, GarageError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), GarageError> {
        // execute statement by statement: sqlx::query runs a single command
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }

        for stmt in SQLITE_ADDITIVE_COLUMNS {
            match sqlx::query(stmt).execute(&self.pool).await {
                Ok(_) => info!(statement = %stmt, "schema column added"),
                Err(sqlx::Error::Database(e)) if e.message().contains("duplicate column") => {
                    debug!(statement = %stmt, "schema column already present");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Create the account unless the username is already taken.
    /// Returns true when a row was inserted.
    pub async fn ensure_user(
        &self,
        username: &str,
        password: &str,
        nome_reale: Option<&str>,
    ) -> Result<bool, GarageError> {
        let res = sqlx::query(
            "INSERT INTO utenti (username, password, nome_reale) VALUES (?, ?, ?)
             ON CONFLICT(username) DO NOTHING",
        )
        .bind(username)
        .bind(hash_password(password))
        .bind(nome_reale)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, GarageError> {
        let user: Option<User> = sqlx::query_as(
            "SELECT id, username, password, nome_reale FROM utenti WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let digest = hash_password(password);
        Ok(user.filter(|u| bool::from(u.password.as_bytes().ct_eq(digest.as_bytes()))))
    }

    /// Append to the user's activity log.
    pub async fn record_action(
        &self,
        user_id: i64,
        azione: &str,
        dettagli: &str,
    ) -> Result<(), GarageError> {
        sqlx::query(
            "INSERT INTO storico_azioni (utente_id, azione, dettagli, data) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(azione)
        .bind(dettagli)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn recent_actions(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<ActionRecord>, GarageError> {
        let rows = sqlx::query_as(
            "SELECT id, azione, dettagli, data FROM storico_azioni
             WHERE utente_id = ? ORDER BY id DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// Hex encoded SHA-256, the format stored in `utenti.password`.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_digest_is_sha256_hex() {
        assert_eq!(
            hash_password("password1"),
            "0b14d501a594442a01c6859541bcb3e8164d183d32937b851835442f69d5c94e"
        );
    }
}
