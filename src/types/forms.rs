//! Request payloads: HTML form posts and the small JSON bodies.
//!
//! Every text field of a form is trimmed while deserializing; missing fields
//! deserialize as empty strings.

use serde::{Deserialize, Deserializer};

use crate::error::GarageError;

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

macro_rules! text_form {
    ($(#[$meta:meta])* $name:ident { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, Deserialize)]
        #[serde(default)]
        pub struct $name {
            $(
                #[serde(deserialize_with = "trimmed")]
                pub $field: String,
            )+
        }
    };
}

text_form!(LoginForm { username, password });

text_form!(CustomerForm {
    nome,
    cognome,
    data_nascita,
    provincia,
    comune,
    codice_fiscale,
    telefono,
    email,
});

text_form!(VehicleForm {
    cliente_id,
    targa,
    marca,
    modello,
    cilindrata,
    kw,
    carburante,
    codice_motore,
    telaio,
    immatricolazione,
    km,
    cambio,
});

text_form!(CarModelForm {
    marca,
    modello,
    cilindrata,
    kw,
    carburante,
    codice_motore,
});

text_form!(SparePartForm { nome, codice, quantita });

text_form!(TireForm {
    marca,
    modello,
    misura,
    stagione,
    quantita,
    posizione,
});

text_form!(
    /// `stato` may be empty on creation, meaning "ordine inviato".
    WorkOrderForm {
        vettura_id,
        descrizione,
        stato,
        note,
    }
);

text_form!(PartPickForm { ricambio_id });

impl VehicleForm {
    pub fn customer_id(&self) -> Result<Option<i64>, GarageError> {
        parse_optional_id("cliente_id", &self.cliente_id)
    }
}

impl WorkOrderForm {
    pub fn vehicle_id(&self) -> Result<Option<i64>, GarageError> {
        parse_optional_id("vettura_id", &self.vettura_id)
    }
}

impl SparePartForm {
    pub fn quantity(&self) -> Result<i64, GarageError> {
        parse_quantity("quantita", &self.quantita)
    }
}

impl TireForm {
    pub fn quantity(&self) -> Result<i64, GarageError> {
        parse_quantity("quantita", &self.quantita)
    }
}

impl PartPickForm {
    pub fn part_id(&self) -> Result<Option<i64>, GarageError> {
        parse_optional_id("ricambio_id", &self.ricambio_id)
    }
}

/// Empty means "no reference"; anything else must be an integer id.
pub fn parse_optional_id(field: &'static str, raw: &str) -> Result<Option<i64>, GarageError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|e| GarageError::InvalidForm {
            field,
            reason: e.to_string(),
        })
}

/// Empty means zero. Negative stock is rejected.
pub fn parse_quantity(field: &'static str, raw: &str) -> Result<i64, GarageError> {
    if raw.is_empty() {
        return Ok(0);
    }
    let value = raw.parse::<i64>().map_err(|e| GarageError::InvalidForm {
        field,
        reason: e.to_string(),
    })?;
    if value < 0 {
        return Err(GarageError::InvalidForm {
            field,
            reason: "must not be negative".to_string(),
        });
    }
    Ok(value)
}

/// Query string of `GET /lavorazioni`.
#[derive(Debug, Default, Deserialize)]
pub struct WorkOrderFilter {
    pub stato: Option<String>,
}

/// JSON body of `POST /aggiorna_stato_lavorazione/{id}`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub stato: String,
}

/// JSON body of `POST /aggiungi_promemoria`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewReminder {
    pub testo: String,
    pub descrizione: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_parsing() {
        assert_eq!(parse_quantity("quantita", "").unwrap(), 0);
        assert_eq!(parse_quantity("quantita", "12").unwrap(), 12);
        assert!(parse_quantity("quantita", "-1").is_err());
        assert!(parse_quantity("quantita", "tre").is_err());
    }

    #[test]
    fn optional_id_parsing() {
        assert_eq!(parse_optional_id("cliente_id", "").unwrap(), None);
        assert_eq!(parse_optional_id("cliente_id", "7").unwrap(), Some(7));
        assert!(parse_optional_id("cliente_id", "x").is_err());
    }

    #[test]
    fn form_fields_are_trimmed_and_defaulted() {
        let form: CustomerForm =
            serde_json::from_str(r#"{"nome":"  Mario ","cognome":"Rossi\t"}"#).unwrap();
        assert_eq!(form.nome, "Mario");
        assert_eq!(form.cognome, "Rossi");
        assert_eq!(form.email, "");
    }
}
