use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::types::WorkOrderStatus;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub nome_reale: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.nome_reale
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct Customer {
    pub id: i64,
    pub nome: String,
    pub cognome: String,
    pub data_nascita: String,
    pub provincia: String,
    pub comune: String,
    pub codice_fiscale: String,
    pub telefono: String,
    pub email: String,
    pub utente_id: i64,
}

/// Entry of the customer drop-down on vehicle forms.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerOption {
    pub id: i64,
    pub nome: String,
    pub cognome: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub cliente_id: Option<i64>,
    pub targa: String,
    pub marca: String,
    pub modello: String,
    pub cilindrata: String,
    pub kw: String,
    pub carburante: String,
    pub codice_motore: String,
    pub telaio: String,
    pub immatricolazione: String,
    pub km: String,
    pub cambio: String,
    pub utente_id: i64,
}

/// Row of the vehicle list, with the owner's name resolved.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleSummary {
    pub id: i64,
    pub targa: String,
    pub marca: String,
    pub modello: String,
    pub cilindrata: String,
    pub kw: String,
    pub carburante: String,
    pub codice_motore: String,
    pub cliente_nome: String,
}

/// Entry of the vehicle drop-down on work order forms.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleOption {
    pub id: i64,
    pub targa: String,
    pub marca: String,
    pub modello: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct CarModel {
    pub id: i64,
    pub marca: String,
    pub modello: String,
    pub cilindrata: String,
    pub kw: String,
    pub carburante: String,
    pub codice_motore: String,
    pub utente_id: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct SparePart {
    pub id: i64,
    pub nome: String,
    pub codice: String,
    pub quantita: i64,
    pub utente_id: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct Tire {
    pub id: i64,
    pub marca: String,
    pub modello: String,
    pub misura: String,
    pub stagione: String,
    pub quantita: i64,
    pub posizione: String,
    pub utente_id: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct WorkOrder {
    pub id: i64,
    pub vettura_id: Option<i64>,
    pub descrizione: String,
    #[sqlx(try_from = "String")]
    pub stato: WorkOrderStatus,
    pub note: String,
    pub creata_il: DateTime<Utc>,
    pub aggiornata_il: DateTime<Utc>,
    pub utente_id: i64,
    /// Plate of the linked vehicle, when there is one.
    pub targa: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StatusCount {
    #[sqlx(try_from = "String")]
    pub stato: WorkOrderStatus,
    pub totale: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct Reminder {
    pub id: i64,
    pub titolo: String,
    pub info: String,
    pub data_creazione: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ActionRecord {
    pub id: i64,
    pub azione: String,
    pub dettagli: String,
    pub data: DateTime<Utc>,
}
