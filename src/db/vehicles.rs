use crate::db::models::{Vehicle, VehicleOption, VehicleSummary};
use crate::db::sqlite::GarageStorage;
use crate::error::GarageError;
use crate::types::forms::VehicleForm;

const VEHICLE_COLUMNS: &str = "id, cliente_id, targa, marca, modello, cilindrata, kw, carburante, \
     codice_motore, telaio, immatricolazione, km, cambio, utente_id";

impl GarageStorage {
    /// Newest first, owner shown as "nome cognome" or `—` when unassigned.
    pub async fn list_vehicles(&self, user_id: i64) -> Result<Vec<VehicleSummary>, GarageError> {
        let rows = sqlx::query_as(
            r#"
            SELECT v.id, v.targa, v.marca, v.modello, v.cilindrata, v.kw, v.carburante,
                   v.codice_motore,
                   COALESCE(c.nome || ' ' || c.cognome, '—') AS cliente_nome
            FROM vetture v
            LEFT JOIN clienti c ON v.cliente_id = c.id AND c.utente_id = v.utente_id
            WHERE v.utente_id = ?
            ORDER BY v.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn vehicle_options(&self, user_id: i64) -> Result<Vec<VehicleOption>, GarageError> {
        let rows = sqlx::query_as(
            "SELECT id, targa, marca, modello FROM vetture WHERE utente_id = ? ORDER BY targa",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn get_vehicle(&self, user_id: i64, id: i64) -> Result<Option<Vehicle>, GarageError> {
        let row = sqlx::query_as(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vetture WHERE id = ? AND utente_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn insert_vehicle(
        &self,
        user_id: i64,
        customer_id: Option<i64>,
        form: &VehicleForm,
    ) -> Result<i64, GarageError> {
        let res = sqlx::query(
            r#"
            INSERT INTO vetture (
                cliente_id, targa, marca, modello, cilindrata, kw, carburante,
                codice_motore, telaio, immatricolazione, km, cambio, utente_id
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(customer_id)
        .bind(&form.targa)
        .bind(&form.marca)
        .bind(&form.modello)
        .bind(&form.cilindrata)
        .bind(&form.kw)
        .bind(&form.carburante)
        .bind(&form.codice_motore)
        .bind(&form.telaio)
        .bind(&form.immatricolazione)
        .bind(&form.km)
        .bind(&form.cambio)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update_vehicle(
        &self,
        user_id: i64,
        id: i64,
        customer_id: Option<i64>,
        form: &VehicleForm,
    ) -> Result<bool, GarageError> {
        let res = sqlx::query(
            r#"
            UPDATE vetture SET
                cliente_id = ?, targa = ?, marca = ?, modello = ?,
                cilindrata = ?, kw = ?, carburante = ?,
                codice_motore = ?, telaio = ?,
                immatricolazione = ?, km = ?, cambio = ?
            WHERE id = ? AND utente_id = ?
            "#,
        )
        .bind(customer_id)
        .bind(&form.targa)
        .bind(&form.marca)
        .bind(&form.modello)
        .bind(&form.cilindrata)
        .bind(&form.kw)
        .bind(&form.carburante)
        .bind(&form.codice_motore)
        .bind(&form.telaio)
        .bind(&form.immatricolazione)
        .bind(&form.km)
        .bind(&form.cambio)
        .bind(id)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_vehicle(&self, user_id: i64, id: i64) -> Result<bool, GarageError> {
        let res = sqlx::query("DELETE FROM vetture WHERE id = ? AND utente_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn count_work_orders_of_vehicle(
        &self,
        user_id: i64,
        vehicle_id: i64,
    ) -> Result<i64, GarageError> {
        let rec: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM lavorazioni WHERE vettura_id = ? AND utente_id = ?",
        )
        .bind(vehicle_id)
        .bind(user_id)
        .fetch_one(self.pool())
        .await?;
        Ok(rec.0)
    }
}
