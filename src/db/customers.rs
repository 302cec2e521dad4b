use crate::db::models::{Customer, CustomerOption};
use crate::db::sqlite::GarageStorage;
use crate::error::GarageError;
use crate::types::forms::CustomerForm;

const CUSTOMER_COLUMNS: &str = "id, nome, cognome, data_nascita, provincia, comune, \
     codice_fiscale, telefono, email, utente_id";

impl GarageStorage {
    pub async fn list_customers(&self, user_id: i64) -> Result<Vec<Customer>, GarageError> {
        let rows = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM clienti WHERE utente_id = ? ORDER BY cognome, nome"
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn customer_options(&self, user_id: i64) -> Result<Vec<CustomerOption>, GarageError> {
        let rows = sqlx::query_as(
            "SELECT id, nome, cognome FROM clienti WHERE utente_id = ? ORDER BY cognome, nome",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn get_customer(
        &self,
        user_id: i64,
        id: i64,
    ) -> Result<Option<Customer>, GarageError> {
        let row = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM clienti WHERE id = ? AND utente_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn insert_customer(
        &self,
        user_id: i64,
        form: &CustomerForm,
    ) -> Result<i64, GarageError> {
        let res = sqlx::query(
            r#"
            INSERT INTO clienti (
                nome, cognome, data_nascita, provincia, comune,
                codice_fiscale, telefono, email, utente_id
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&form.nome)
        .bind(&form.cognome)
        .bind(&form.data_nascita)
        .bind(&form.provincia)
        .bind(&form.comune)
        .bind(&form.codice_fiscale)
        .bind(&form.telefono)
        .bind(&form.email)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.last_insert_rowid())
    }

    /// Returns false when no row owned by `user_id` has this id.
    pub async fn update_customer(
        &self,
        user_id: i64,
        id: i64,
        form: &CustomerForm,
    ) -> Result<bool, GarageError> {
        let res = sqlx::query(
            r#"
            UPDATE clienti SET
                nome = ?, cognome = ?, data_nascita = ?, provincia = ?, comune = ?,
                codice_fiscale = ?, telefono = ?, email = ?
            WHERE id = ? AND utente_id = ?
            "#,
        )
        .bind(&form.nome)
        .bind(&form.cognome)
        .bind(&form.data_nascita)
        .bind(&form.provincia)
        .bind(&form.comune)
        .bind(&form.codice_fiscale)
        .bind(&form.telefono)
        .bind(&form.email)
        .bind(id)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_customer(&self, user_id: i64, id: i64) -> Result<bool, GarageError> {
        let res = sqlx::query("DELETE FROM clienti WHERE id = ? AND utente_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn count_vehicles_of_customer(
        &self,
        user_id: i64,
        customer_id: i64,
    ) -> Result<i64, GarageError> {
        let rec: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM vetture WHERE cliente_id = ? AND utente_id = ?")
                .bind(customer_id)
                .bind(user_id)
                .fetch_one(self.pool())
                .await?;
        Ok(rec.0)
    }
}
