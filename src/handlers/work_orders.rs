use axum::{
    Form, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Serialize;
use serde_json::json;

use crate::db::WorkOrderDraft;
use crate::db::models::{VehicleOption, WorkOrder};
use crate::handlers::parts::take_part;
use crate::handlers::{FlashRedirect, json_body, json_failure, page, redirect_with};
use crate::middleware::CurrentUser;
use crate::service::audit;
use crate::types::WorkOrderStatus;
use crate::types::forms::{PartPickForm, StatusUpdate, WorkOrderFilter, WorkOrderForm};
use crate::{GarageError, router::GarageState};

const LIST: &str = "/lavorazioni";

#[derive(Debug, Serialize)]
pub struct WorkOrdersData {
    pub lavorazioni: Vec<WorkOrder>,
    pub stati: [WorkOrderStatus; 4],
    pub filtro: Option<WorkOrderStatus>,
}

#[derive(Debug, Serialize)]
pub struct NewWorkOrderData {
    pub vetture: Vec<VehicleOption>,
    pub stati: [WorkOrderStatus; 4],
}

#[derive(Debug, Serialize)]
pub struct WorkOrderData {
    pub lavorazione: WorkOrder,
    pub vetture: Vec<VehicleOption>,
    pub stati: [WorkOrderStatus; 4],
}

/// GET /lavorazioni[?stato=...]
pub async fn list(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Query(filter): Query<WorkOrderFilter>,
) -> Result<Response, GarageError> {
    let filtro = match filter.stato.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match WorkOrderStatus::normalize(raw) {
            Ok(status) => Some(status),
            Err(e) => return Ok(redirect_with(jar, format!("❌ {e}"), LIST).into_response()),
        },
    };
    let lavorazioni = state.storage.list_work_orders(user.id, filtro).await?;
    let data = WorkOrdersData {
        lavorazioni,
        stati: WorkOrderStatus::ALL,
        filtro,
    };
    Ok(page(jar, "lavorazioni.html", data).into_response())
}

pub async fn new_form(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, GarageError> {
    let vetture = state.storage.vehicle_options(user.id).await?;
    let data = NewWorkOrderData {
        vetture,
        stati: WorkOrderStatus::ALL,
    };
    Ok(page(jar, "inserisci_lavorazione.html", data))
}

/// Validate a work order form. `Err` carries the message to flash.
async fn draft_from_form<'a>(
    state: &GarageState,
    user: &CurrentUser,
    form: &'a WorkOrderForm,
) -> Result<Result<WorkOrderDraft<'a>, String>, GarageError> {
    if form.descrizione.is_empty() {
        return Ok(Err("❌ La descrizione è obbligatoria".to_string()));
    }
    let stato = if form.stato.is_empty() {
        WorkOrderStatus::default()
    } else {
        match WorkOrderStatus::normalize(&form.stato) {
            Ok(status) => status,
            Err(e) => return Ok(Err(format!("❌ {e}"))),
        }
    };
    let vettura_id = match form.vehicle_id() {
        Ok(id) => id,
        Err(e) => return Ok(Err(format!("❌ {e}"))),
    };
    if let Some(id) = vettura_id
        && state.storage.get_vehicle(user.id, id).await?.is_none()
    {
        return Ok(Err(format!(
            "❌ Vettura ID {id} non trovata o non accessibile"
        )));
    }
    Ok(Ok(WorkOrderDraft {
        vettura_id,
        descrizione: &form.descrizione,
        stato,
        note: &form.note,
    }))
}

pub async fn save(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Form(form): Form<WorkOrderForm>,
) -> Result<FlashRedirect, GarageError> {
    let draft = match draft_from_form(&state, &user, &form).await? {
        Ok(draft) => draft,
        Err(msg) => return Ok(redirect_with(jar, msg, "/inserisci_lavorazione")),
    };
    let id = state.storage.insert_work_order(user.id, &draft).await?;
    audit::record(
        &state.storage,
        &user,
        "lavorazione inserita",
        &format!("#{id} [{}] {}", draft.stato, draft.descrizione),
    )
    .await;
    Ok(redirect_with(jar, "✅ Lavorazione salvata correttamente", LIST))
}

pub async fn edit_form(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, GarageError> {
    let Some(lavorazione) = state.storage.get_work_order(user.id, id).await? else {
        return Ok(redirect_with(
            jar,
            format!("❌ Lavorazione ID {id} non trovata o non accessibile"),
            LIST,
        )
        .into_response());
    };
    let vetture = state.storage.vehicle_options(user.id).await?;
    let data = WorkOrderData {
        lavorazione,
        vetture,
        stati: WorkOrderStatus::ALL,
    };
    Ok(page(jar, "modifica_lavorazione.html", data).into_response())
}

pub async fn update(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
    Form(form): Form<WorkOrderForm>,
) -> Result<FlashRedirect, GarageError> {
    let draft = match draft_from_form(&state, &user, &form).await? {
        Ok(draft) => draft,
        Err(msg) => {
            return Ok(redirect_with(
                jar,
                msg,
                &format!("/modifica_lavorazione/{id}"),
            ));
        }
    };
    if !state.storage.update_work_order(user.id, id, &draft).await? {
        return Ok(redirect_with(
            jar,
            format!("❌ Lavorazione ID {id} non trovata o non accessibile"),
            LIST,
        ));
    }
    audit::record(
        &state.storage,
        &user,
        "lavorazione aggiornata",
        &format!("#{id} [{}] {}", draft.stato, draft.descrizione),
    )
    .await;
    Ok(redirect_with(jar, "✅ Lavorazione aggiornata correttamente", LIST))
}

/// POST /aggiorna_stato_lavorazione/{id} with JSON `{"stato": "..."}`.
pub async fn update_status(
    State(state): State<GarageState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    body: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Response, GarageError> {
    let body = match json_body(body) {
        Ok(body) => body,
        Err(resp) => return Ok(resp),
    };
    let status = match WorkOrderStatus::normalize(&body.stato) {
        Ok(status) => status,
        Err(e) => return Ok(json_failure(StatusCode::BAD_REQUEST, e.to_string())),
    };
    if !state
        .storage
        .set_work_order_status(user.id, id, status)
        .await?
    {
        return Ok(json_failure(StatusCode::NOT_FOUND, "Lavorazione non trovata"));
    }
    audit::record(
        &state.storage,
        &user,
        "stato lavorazione",
        &format!("#{id} -> {status}"),
    )
    .await;
    Ok(Json(json!({ "success": true, "stato": status })).into_response())
}

pub async fn delete(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<FlashRedirect, GarageError> {
    if !state.storage.delete_work_order(user.id, id).await? {
        return Ok(redirect_with(
            jar,
            format!("❌ Lavorazione ID {id} non trovata o non accessibile"),
            LIST,
        ));
    }
    audit::record(
        &state.storage,
        &user,
        "lavorazione eliminata",
        &format!("#{id}"),
    )
    .await;
    Ok(redirect_with(jar, "✅ Lavorazione eliminata", LIST))
}

/// POST /lavorazione/{id}/usa_ricambio -> consume one unit of a part for this job.
pub async fn use_part(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
    Form(form): Form<PartPickForm>,
) -> Result<FlashRedirect, GarageError> {
    let back = format!("/modifica_lavorazione/{id}");
    if state.storage.get_work_order(user.id, id).await?.is_none() {
        return Ok(redirect_with(
            jar,
            format!("❌ Lavorazione ID {id} non trovata o non accessibile"),
            LIST,
        ));
    }
    let Some(part_id) = form.part_id().ok().flatten() else {
        return Ok(redirect_with(jar, "❌ Ricambio non valido", &back));
    };

    let context = format!("lavorazione #{id}");
    let jar = take_part(&state, &user, jar, part_id, Some(&context)).await?;
    Ok((jar, Redirect::to(&back)))
}
