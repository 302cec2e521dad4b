use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

/// Lifecycle of a work order. Stored as the Italian label shown to users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WorkOrderStatus {
    #[default]
    OrderSent,
    InProgress,
    Completed,
    AwaitingBodywork,
}

#[derive(Debug, Clone, ThisError, PartialEq, Eq)]
#[error("unknown work order status `{0}`")]
pub struct UnknownStatus(pub String);

impl WorkOrderStatus {
    pub const ALL: [WorkOrderStatus; 4] = [
        WorkOrderStatus::OrderSent,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Completed,
        WorkOrderStatus::AwaitingBodywork,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkOrderStatus::OrderSent => "ordine inviato",
            WorkOrderStatus::InProgress => "in lavorazione",
            WorkOrderStatus::Completed => "completata",
            WorkOrderStatus::AwaitingBodywork => "attesa del levabolle",
        }
    }

    /// Map free user input onto a status.
    ///
    /// Case, surrounding blanks and `_`/`-` separators are ignored, runs of
    /// whitespace collapse to one space, and a few spellings seen in practice
    /// are accepted as aliases.
    pub fn normalize(raw: &str) -> Result<Self, UnknownStatus> {
        let cleaned = raw
            .trim()
            .to_lowercase()
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let status = match cleaned.as_str() {
            "ordine inviato" | "inviato" | "ordinato" => WorkOrderStatus::OrderSent,
            "in lavorazione" | "lavorazione" | "in corso" => WorkOrderStatus::InProgress,
            "completata" | "completato" | "completa" | "chiusa" => WorkOrderStatus::Completed,
            "attesa del levabolle" | "attesa levabolle" | "levabolle" => {
                WorkOrderStatus::AwaitingBodywork
            }
            _ => return Err(UnknownStatus(raw.to_string())),
        };
        Ok(status)
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for WorkOrderStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        WorkOrderStatus::normalize(&value)
    }
}

impl From<WorkOrderStatus> for String {
    fn from(value: WorkOrderStatus) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_labels_round_trip() {
        for status in WorkOrderStatus::ALL {
            assert_eq!(WorkOrderStatus::normalize(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn normalize_ignores_case_and_separators() {
        assert_eq!(
            WorkOrderStatus::normalize("  Ordine_Inviato "),
            Ok(WorkOrderStatus::OrderSent)
        );
        assert_eq!(
            WorkOrderStatus::normalize("IN   LAVORAZIONE"),
            Ok(WorkOrderStatus::InProgress)
        );
        assert_eq!(
            WorkOrderStatus::normalize("attesa-del-levabolle"),
            Ok(WorkOrderStatus::AwaitingBodywork)
        );
    }

    #[test]
    fn normalize_accepts_aliases() {
        assert_eq!(
            WorkOrderStatus::normalize("completato"),
            Ok(WorkOrderStatus::Completed)
        );
        assert_eq!(
            WorkOrderStatus::normalize("levabolle"),
            Ok(WorkOrderStatus::AwaitingBodywork)
        );
    }

    #[test]
    fn normalize_rejects_unknown() {
        assert_eq!(
            WorkOrderStatus::normalize("annullata"),
            Err(UnknownStatus("annullata".to_string()))
        );
        assert!(WorkOrderStatus::normalize("   ").is_err());
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&WorkOrderStatus::AwaitingBodywork).unwrap();
        assert_eq!(json, r#""attesa del levabolle""#);
        let back: WorkOrderStatus = serde_json::from_str(r#""Completata""#).unwrap();
        assert_eq!(back, WorkOrderStatus::Completed);
    }
}
