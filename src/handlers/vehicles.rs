use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Serialize;

use crate::db::models::{CustomerOption, Vehicle, VehicleSummary};
use crate::handlers::{FlashRedirect, page, redirect_with};
use crate::middleware::CurrentUser;
use crate::service::audit;
use crate::types::forms::VehicleForm;
use crate::{GarageError, router::GarageState};

const LIST: &str = "/vetture";

#[derive(Debug, Serialize)]
pub struct VehiclesData {
    pub vetture: Vec<VehicleSummary>,
}

#[derive(Debug, Serialize)]
pub struct NewVehicleData {
    pub clienti: Vec<CustomerOption>,
}

#[derive(Debug, Serialize)]
pub struct VehicleData {
    pub vettura: Vehicle,
    pub clienti: Vec<CustomerOption>,
}

pub async fn list(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, GarageError> {
    let vetture = state.storage.list_vehicles(user.id).await?;
    Ok(page(jar, "vetture.html", VehiclesData { vetture }))
}

pub async fn new_form(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, GarageError> {
    let clienti = state.storage.customer_options(user.id).await?;
    Ok(page(jar, "inserisci_vettura.html", NewVehicleData { clienti }))
}

/// Resolve the form's customer reference, which must be empty or one of the
/// user's own customers. `Err` carries the message to flash.
async fn owned_customer(
    state: &GarageState,
    user: &CurrentUser,
    form: &VehicleForm,
) -> Result<Result<Option<i64>, String>, GarageError> {
    let customer_id = match form.customer_id() {
        Ok(id) => id,
        Err(e) => return Ok(Err(format!("❌ {e}"))),
    };
    if let Some(id) = customer_id
        && state.storage.get_customer(user.id, id).await?.is_none()
    {
        return Ok(Err(format!("❌ Cliente ID {id} non trovato o non accessibile")));
    }
    Ok(Ok(customer_id))
}

pub async fn save(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Form(form): Form<VehicleForm>,
) -> Result<FlashRedirect, GarageError> {
    let customer_id = match owned_customer(&state, &user, &form).await? {
        Ok(customer_id) => customer_id,
        Err(msg) => return Ok(redirect_with(jar, msg, "/inserisci_vettura")),
    };
    let id = state
        .storage
        .insert_vehicle(user.id, customer_id, &form)
        .await?;
    audit::record(
        &state.storage,
        &user,
        "vettura inserita",
        &format!("#{id} {} {} {}", form.targa, form.marca, form.modello),
    )
    .await;
    Ok(redirect_with(jar, "✅ Vettura salvata correttamente", LIST))
}

pub async fn edit_form(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, GarageError> {
    let Some(vettura) = state.storage.get_vehicle(user.id, id).await? else {
        return Ok(redirect_with(
            jar,
            format!("❌ Vettura ID {id} non trovata o non accessibile"),
            LIST,
        )
        .into_response());
    };
    let clienti = state.storage.customer_options(user.id).await?;
    Ok(page(jar, "modifica_vettura.html", VehicleData { vettura, clienti }).into_response())
}

pub async fn update(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
    Form(form): Form<VehicleForm>,
) -> Result<FlashRedirect, GarageError> {
    let customer_id = match owned_customer(&state, &user, &form).await? {
        Ok(customer_id) => customer_id,
        Err(msg) => return Ok(redirect_with(jar, msg, &format!("/modifica_vettura/{id}"))),
    };
    if !state
        .storage
        .update_vehicle(user.id, id, customer_id, &form)
        .await?
    {
        return Ok(redirect_with(
            jar,
            format!("❌ Vettura ID {id} non trovata o non accessibile"),
            LIST,
        ));
    }
    audit::record(
        &state.storage,
        &user,
        "vettura aggiornata",
        &format!("#{id} {}", form.targa),
    )
    .await;
    Ok(redirect_with(jar, "✅ Vettura aggiornata correttamente", LIST))
}

pub async fn delete(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<FlashRedirect, GarageError> {
    let linked = state
        .storage
        .count_work_orders_of_vehicle(user.id, id)
        .await?;
    if linked > 0 {
        return Ok(redirect_with(
            jar,
            format!("❌ Non puoi eliminare: la vettura ha {linked} lavorazione/i associate."),
            LIST,
        ));
    }
    if !state.storage.delete_vehicle(user.id, id).await? {
        return Ok(redirect_with(
            jar,
            format!("❌ Vettura ID {id} non trovata o non accessibile"),
            LIST,
        ));
    }
    audit::record(&state.storage, &user, "vettura eliminata", &format!("#{id}")).await;
    Ok(redirect_with(jar, "✅ Vettura eliminata correttamente", LIST))
}
