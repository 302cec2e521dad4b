use crate::db::catalog::Decrement;
use crate::db::models::Tire;
use crate::db::sqlite::GarageStorage;
use crate::error::GarageError;
use crate::types::forms::TireForm;

impl GarageStorage {
    pub async fn list_tires(&self, user_id: i64) -> Result<Vec<Tire>, GarageError> {
        let rows = sqlx::query_as(
            r#"SELECT id, marca, modello, misura, stagione, quantita, posizione, utente_id
               FROM gomme WHERE utente_id = ? ORDER BY marca, misura"#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn get_tire(&self, user_id: i64, id: i64) -> Result<Option<Tire>, GarageError> {
        let row = sqlx::query_as(
            r#"SELECT id, marca, modello, misura, stagione, quantita, posizione, utente_id
               FROM gomme WHERE id = ? AND utente_id = ?"#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn insert_tire(
        &self,
        user_id: i64,
        form: &TireForm,
        quantita: i64,
    ) -> Result<i64, GarageError> {
        let res = sqlx::query(
            r#"INSERT INTO gomme (marca, modello, misura, stagione, quantita, posizione, utente_id)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&form.marca)
        .bind(&form.modello)
        .bind(&form.misura)
        .bind(&form.stagione)
        .bind(quantita)
        .bind(&form.posizione)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update_tire(
        &self,
        user_id: i64,
        id: i64,
        form: &TireForm,
        quantita: i64,
    ) -> Result<bool, GarageError> {
        let res = sqlx::query(
            r#"UPDATE gomme SET
                marca = ?, modello = ?, misura = ?, stagione = ?, quantita = ?, posizione = ?
               WHERE id = ? AND utente_id = ?"#,
        )
        .bind(&form.marca)
        .bind(&form.modello)
        .bind(&form.misura)
        .bind(&form.stagione)
        .bind(quantita)
        .bind(&form.posizione)
        .bind(id)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_tire(&self, user_id: i64, id: i64) -> Result<bool, GarageError> {
        let res = sqlx::query("DELETE FROM gomme WHERE id = ? AND utente_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn decrement_tire(&self, user_id: i64, id: i64) -> Result<Decrement, GarageError> {
        self.decrement_stock("gomme", "marca || ' ' || misura", user_id, id)
            .await
    }
}
