//! Reminder notes, consumed by the sidebar script as JSON.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::db::models::Reminder;
use crate::handlers::{json_body, json_failure};
use crate::middleware::CurrentUser;
use crate::service::audit;
use crate::types::forms::NewReminder;
use crate::{GarageError, router::GarageState};

/// GET /lista_promemoria
pub async fn list(
    State(state): State<GarageState>,
    user: CurrentUser,
) -> Result<Json<Vec<Reminder>>, GarageError> {
    Ok(Json(state.storage.list_reminders(user.id).await?))
}

/// POST /aggiungi_promemoria with `{"testo": "...", "descrizione": "..."}`.
pub async fn add(
    State(state): State<GarageState>,
    user: CurrentUser,
    body: Result<Json<NewReminder>, JsonRejection>,
) -> Result<Response, GarageError> {
    let body = match json_body(body) {
        Ok(body) => body,
        Err(resp) => return Ok(resp),
    };
    let titolo = body.testo.trim();
    let info = body.descrizione.trim();
    if titolo.is_empty() {
        return Ok(json_failure(StatusCode::BAD_REQUEST, "Il titolo è obbligatorio"));
    }

    let id = state.storage.insert_reminder(user.id, titolo, info).await?;
    audit::record(
        &state.storage,
        &user,
        "promemoria aggiunto",
        &format!("#{id} {titolo}"),
    )
    .await;
    Ok(Json(json!({ "success": true, "id": id })).into_response())
}

/// POST /elimina_promemoria/{id}
pub async fn delete(
    State(state): State<GarageState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, GarageError> {
    if !state.storage.delete_reminder(user.id, id).await? {
        return Ok(json_failure(StatusCode::NOT_FOUND, "Promemoria non trovato"));
    }
    audit::record(
        &state.storage,
        &user,
        "promemoria eliminato",
        &format!("#{id}"),
    )
    .await;
    Ok(Json(json!({ "success": true })).into_response())
}
