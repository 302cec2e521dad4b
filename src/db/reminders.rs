use chrono::Utc;

use crate::db::models::Reminder;
use crate::db::sqlite::GarageStorage;
use crate::error::GarageError;

impl GarageStorage {
    pub async fn list_reminders(&self, user_id: i64) -> Result<Vec<Reminder>, GarageError> {
        let rows = sqlx::query_as(
            r#"SELECT id, titolo, info, data_creazione FROM promemoria
               WHERE utente_id = ? ORDER BY data_creazione DESC, id DESC"#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn insert_reminder(
        &self,
        user_id: i64,
        titolo: &str,
        info: &str,
    ) -> Result<i64, GarageError> {
        let res = sqlx::query(
            "INSERT INTO promemoria (titolo, info, data_creazione, utente_id) VALUES (?, ?, ?, ?)",
        )
        .bind(titolo)
        .bind(info)
        .bind(Utc::now())
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn delete_reminder(&self, user_id: i64, id: i64) -> Result<bool, GarageError> {
        let res = sqlx::query("DELETE FROM promemoria WHERE id = ? AND utente_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
