//! Vehicle model catalog, spare parts and the links between them.

use crate::db::models::{CarModel, SparePart};
use crate::db::sqlite::GarageStorage;
use crate::error::GarageError;
use crate::types::forms::{CarModelForm, SparePartForm};

/// Outcome of taking one unit out of a stock table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decrement {
    /// One unit taken; `left` is what remains.
    Taken { name: String, left: i64 },
    /// The row exists but is already at zero.
    OutOfStock { name: String },
    Missing,
}

impl GarageStorage {
    pub async fn list_car_models(&self, user_id: i64) -> Result<Vec<CarModel>, GarageError> {
        let rows = sqlx::query_as(
            r#"SELECT id, marca, modello, cilindrata, kw, carburante, codice_motore, utente_id
               FROM modelli WHERE utente_id = ? ORDER BY id DESC"#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn get_car_model(
        &self,
        user_id: i64,
        id: i64,
    ) -> Result<Option<CarModel>, GarageError> {
        let row = sqlx::query_as(
            r#"SELECT id, marca, modello, cilindrata, kw, carburante, codice_motore, utente_id
               FROM modelli WHERE id = ? AND utente_id = ?"#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn insert_car_model(
        &self,
        user_id: i64,
        form: &CarModelForm,
    ) -> Result<i64, GarageError> {
        let res = sqlx::query(
            r#"INSERT INTO modelli (marca, modello, cilindrata, kw, carburante, codice_motore, utente_id)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&form.marca)
        .bind(&form.modello)
        .bind(&form.cilindrata)
        .bind(&form.kw)
        .bind(&form.carburante)
        .bind(&form.codice_motore)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update_car_model(
        &self,
        user_id: i64,
        id: i64,
        form: &CarModelForm,
    ) -> Result<bool, GarageError> {
        let res = sqlx::query(
            r#"UPDATE modelli SET
                marca = ?, modello = ?, cilindrata = ?, kw = ?,
                carburante = ?, codice_motore = ?
               WHERE id = ? AND utente_id = ?"#,
        )
        .bind(&form.marca)
        .bind(&form.modello)
        .bind(&form.cilindrata)
        .bind(&form.kw)
        .bind(&form.carburante)
        .bind(&form.codice_motore)
        .bind(id)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_car_model(&self, user_id: i64, id: i64) -> Result<bool, GarageError> {
        let res = sqlx::query("DELETE FROM modelli WHERE id = ? AND utente_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn count_parts_of_model(
        &self,
        user_id: i64,
        model_id: i64,
    ) -> Result<i64, GarageError> {
        let rec: (i64,) = sqlx::query_as(
            r#"SELECT COUNT(*) FROM modello_ricambi mr
               JOIN modelli m ON m.id = mr.modello_id
               WHERE mr.modello_id = ? AND m.utente_id = ?"#,
        )
        .bind(model_id)
        .bind(user_id)
        .fetch_one(self.pool())
        .await?;
        Ok(rec.0)
    }

    pub async fn list_parts(&self, user_id: i64) -> Result<Vec<SparePart>, GarageError> {
        let rows = sqlx::query_as(
            "SELECT id, nome, codice, quantita, utente_id FROM ricambi WHERE utente_id = ? ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn get_part(&self, user_id: i64, id: i64) -> Result<Option<SparePart>, GarageError> {
        let row = sqlx::query_as(
            "SELECT id, nome, codice, quantita, utente_id FROM ricambi WHERE id = ? AND utente_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    /// Fails with a unique violation when the user already has this code.
    pub async fn insert_part(
        &self,
        user_id: i64,
        form: &SparePartForm,
        quantita: i64,
    ) -> Result<i64, GarageError> {
        let res = sqlx::query(
            "INSERT INTO ricambi (nome, codice, quantita, utente_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&form.nome)
        .bind(&form.codice)
        .bind(quantita)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update_part(
        &self,
        user_id: i64,
        id: i64,
        form: &SparePartForm,
        quantita: i64,
    ) -> Result<bool, GarageError> {
        let res = sqlx::query(
            "UPDATE ricambi SET nome = ?, codice = ?, quantita = ? WHERE id = ? AND utente_id = ?",
        )
        .bind(&form.nome)
        .bind(&form.codice)
        .bind(quantita)
        .bind(id)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_part(&self, user_id: i64, id: i64) -> Result<bool, GarageError> {
        let res = sqlx::query("DELETE FROM ricambi WHERE id = ? AND utente_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn count_models_of_part(
        &self,
        user_id: i64,
        part_id: i64,
    ) -> Result<i64, GarageError> {
        let rec: (i64,) = sqlx::query_as(
            r#"SELECT COUNT(*) FROM modello_ricambi mr
               JOIN ricambi r ON r.id = mr.ricambio_id
               WHERE mr.ricambio_id = ? AND r.utente_id = ?"#,
        )
        .bind(part_id)
        .bind(user_id)
        .fetch_one(self.pool())
        .await?;
        Ok(rec.0)
    }

    pub async fn count_low_stock_parts(&self, user_id: i64, threshold: i64) -> Result<i64, GarageError> {
        let rec: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM ricambi WHERE utente_id = ? AND quantita <= ?")
                .bind(user_id)
                .bind(threshold)
                .fetch_one(self.pool())
                .await?;
        Ok(rec.0)
    }

    pub async fn decrement_part(&self, user_id: i64, id: i64) -> Result<Decrement, GarageError> {
        self.decrement_stock("ricambi", "nome", user_id, id).await
    }

    /// Parts linked to the model, by name.
    pub async fn parts_of_model(
        &self,
        user_id: i64,
        model_id: i64,
    ) -> Result<Vec<SparePart>, GarageError> {
        let rows = sqlx::query_as(
            r#"SELECT r.id, r.nome, r.codice, r.quantita, r.utente_id
               FROM modello_ricambi mr
               JOIN ricambi r ON r.id = mr.ricambio_id
               WHERE mr.modello_id = ? AND mr.utente_id = ? AND r.utente_id = ?
               ORDER BY r.nome"#,
        )
        .bind(model_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    /// The user's parts not yet linked to the model, by name.
    pub async fn parts_not_in_model(
        &self,
        user_id: i64,
        model_id: i64,
    ) -> Result<Vec<SparePart>, GarageError> {
        let rows = sqlx::query_as(
            r#"SELECT r.id, r.nome, r.codice, r.quantita, r.utente_id
               FROM ricambi r
               WHERE r.utente_id = ?
                 AND r.id NOT IN (
                     SELECT ricambio_id FROM modello_ricambi
                     WHERE modello_id = ? AND utente_id = ?
                 )
               ORDER BY r.nome"#,
        )
        .bind(user_id)
        .bind(model_id)
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    /// Fails with a unique violation when the link already exists.
    pub async fn link_part(
        &self,
        user_id: i64,
        model_id: i64,
        part_id: i64,
    ) -> Result<(), GarageError> {
        sqlx::query(
            "INSERT INTO modello_ricambi (modello_id, ricambio_id, utente_id) VALUES (?, ?, ?)",
        )
        .bind(model_id)
        .bind(part_id)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn unlink_part(
        &self,
        user_id: i64,
        model_id: i64,
        part_id: i64,
    ) -> Result<bool, GarageError> {
        let res = sqlx::query(
            "DELETE FROM modello_ricambi WHERE modello_id = ? AND ricambio_id = ? AND utente_id = ?",
        )
        .bind(model_id)
        .bind(part_id)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Take one unit from `table`, never going below zero.
    /// `table` and `label_expr` are compile-time SQL fragments, never user input.
    pub(crate) async fn decrement_stock(
        &self,
        table: &'static str,
        label_expr: &'static str,
        user_id: i64,
        id: i64,
    ) -> Result<Decrement, GarageError> {
        let taken: Option<(String, i64)> = sqlx::query_as(&format!(
            "UPDATE {table} SET quantita = quantita - 1
             WHERE id = ? AND utente_id = ? AND quantita > 0
             RETURNING {label_expr}, quantita"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        if let Some((name, left)) = taken {
            return Ok(Decrement::Taken { name, left });
        }

        let existing: Option<(String,)> = sqlx::query_as(&format!(
            "SELECT {label_expr} FROM {table} WHERE id = ? AND utente_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(match existing {
            Some((name,)) => Decrement::OutOfStock { name },
            None => Decrement::Missing,
        })
    }
}
