use tracing::{info, warn};

use crate::db::GarageStorage;
use crate::middleware::session::CurrentUser;

/// Record a mutation in the user's activity log.
///
/// The action already happened; a failing insert is logged and swallowed.
pub async fn record(storage: &GarageStorage, user: &CurrentUser, azione: &str, dettagli: &str) {
    info!(user_id = user.id, username = %user.username, azione, dettagli, "action");
    if let Err(e) = storage.record_action(user.id, azione, dettagli).await {
        warn!(user_id = user.id, azione, error = %e, "failed to record action");
    }
}
