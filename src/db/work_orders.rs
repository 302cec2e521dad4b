use chrono::Utc;

use crate::db::models::{StatusCount, WorkOrder};
use crate::db::sqlite::GarageStorage;
use crate::error::GarageError;
use crate::types::WorkOrderStatus;

const WORK_ORDER_SELECT: &str = r#"
    SELECT l.id, l.vettura_id, l.descrizione, l.stato, l.note,
           l.creata_il, l.aggiornata_il, l.utente_id, v.targa
    FROM lavorazioni l
    LEFT JOIN vetture v ON v.id = l.vettura_id AND v.utente_id = l.utente_id
"#;

/// Editable fields of a work order.
#[derive(Debug, Clone)]
pub struct WorkOrderDraft<'a> {
    pub vettura_id: Option<i64>,
    pub descrizione: &'a str,
    pub stato: WorkOrderStatus,
    pub note: &'a str,
}

impl GarageStorage {
    /// Newest first, optionally restricted to one status.
    pub async fn list_work_orders(
        &self,
        user_id: i64,
        status: Option<WorkOrderStatus>,
    ) -> Result<Vec<WorkOrder>, GarageError> {
        let status = status.map(WorkOrderStatus::as_str);
        let rows = sqlx::query_as(&format!(
            "{WORK_ORDER_SELECT} WHERE l.utente_id = ? AND (? IS NULL OR l.stato = ?) ORDER BY l.id DESC"
        ))
        .bind(user_id)
        .bind(status)
        .bind(status)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn get_work_order(
        &self,
        user_id: i64,
        id: i64,
    ) -> Result<Option<WorkOrder>, GarageError> {
        let row = sqlx::query_as(&format!(
            "{WORK_ORDER_SELECT} WHERE l.id = ? AND l.utente_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn insert_work_order(
        &self,
        user_id: i64,
        draft: &WorkOrderDraft<'_>,
    ) -> Result<i64, GarageError> {
        let now = Utc::now();
        let res = sqlx::query(
            r#"INSERT INTO lavorazioni (
                   vettura_id, descrizione, stato, note, creata_il, aggiornata_il, utente_id
               ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(draft.vettura_id)
        .bind(draft.descrizione)
        .bind(draft.stato.as_str())
        .bind(draft.note)
        .bind(now)
        .bind(now)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update_work_order(
        &self,
        user_id: i64,
        id: i64,
        draft: &WorkOrderDraft<'_>,
    ) -> Result<bool, GarageError> {
        let res = sqlx::query(
            r#"UPDATE lavorazioni SET
                   vettura_id = ?, descrizione = ?, stato = ?, note = ?, aggiornata_il = ?
               WHERE id = ? AND utente_id = ?"#,
        )
        .bind(draft.vettura_id)
        .bind(draft.descrizione)
        .bind(draft.stato.as_str())
        .bind(draft.note)
        .bind(Utc::now())
        .bind(id)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn set_work_order_status(
        &self,
        user_id: i64,
        id: i64,
        status: WorkOrderStatus,
    ) -> Result<bool, GarageError> {
        let res = sqlx::query(
            "UPDATE lavorazioni SET stato = ?, aggiornata_il = ? WHERE id = ? AND utente_id = ?",
        )
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(id)
        .bind(user_id)
        .execute(self.pool())
        .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_work_order(&self, user_id: i64, id: i64) -> Result<bool, GarageError> {
        let res = sqlx::query("DELETE FROM lavorazioni WHERE id = ? AND utente_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Number of work orders per status; statuses with no orders are omitted.
    pub async fn status_counts(&self, user_id: i64) -> Result<Vec<StatusCount>, GarageError> {
        let rows = sqlx::query_as(
            r#"SELECT stato, COUNT(*) AS totale FROM lavorazioni
               WHERE utente_id = ? GROUP BY stato ORDER BY stato"#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }
}
