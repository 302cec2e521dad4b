use crate::db::Decrement;

/// At or below this quantity an item counts as running low.
pub const LOW_STOCK_THRESHOLD: i64 = 2;

/// Message to show after taking one unit out of stock, if any.
pub fn stock_message(outcome: &Decrement) -> Option<String> {
    match outcome {
        Decrement::Taken { name, left: 2 } => {
            Some(format!("⚠️ Giacenza bassa per {name} (2 rimasti)"))
        }
        Decrement::Taken { name, left: 1 } => Some(format!("⚠️ Solo 1 {name} rimasto")),
        Decrement::Taken { name, left: 0 } | Decrement::OutOfStock { name } => {
            Some(format!("❌ {name} esaurito!"))
        }
        Decrement::Taken { .. } | Decrement::Missing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(left: i64) -> Decrement {
        Decrement::Taken {
            name: "Filtro olio".to_string(),
            left,
        }
    }

    #[test]
    fn thresholds() {
        assert_eq!(stock_message(&taken(5)), None);
        assert_eq!(
            stock_message(&taken(2)).as_deref(),
            Some("⚠️ Giacenza bassa per Filtro olio (2 rimasti)")
        );
        assert_eq!(
            stock_message(&taken(1)).as_deref(),
            Some("⚠️ Solo 1 Filtro olio rimasto")
        );
        assert_eq!(
            stock_message(&taken(0)).as_deref(),
            Some("❌ Filtro olio esaurito!")
        );
    }

    #[test]
    fn empty_shelf_reports_exhausted() {
        let outcome = Decrement::OutOfStock {
            name: "Pastiglie".to_string(),
        };
        assert_eq!(
            stock_message(&outcome).as_deref(),
            Some("❌ Pastiglie esaurito!")
        );
        assert_eq!(stock_message(&Decrement::Missing), None);
    }
}
