use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Serialize;

use crate::db::models::ActionRecord;
use crate::handlers::page;
use crate::middleware::CurrentUser;
use crate::{GarageError, router::GarageState};

const HISTORY_LIMIT: i64 = 200;

#[derive(Debug, Serialize)]
pub struct HistoryData {
    pub azioni: Vec<ActionRecord>,
}

/// GET /storico -> the user's latest actions, newest first.
pub async fn list(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, GarageError> {
    let azioni = state.storage.recent_actions(user.id, HISTORY_LIMIT).await?;
    Ok(page(jar, "storico.html", HistoryData { azioni }))
}
