use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Serialize;

use crate::db::{Decrement, models::Tire};
use crate::handlers::{FlashRedirect, page, redirect_with};
use crate::middleware::{CurrentUser, push_flash};
use crate::service::{audit, stock::stock_message};
use crate::types::{Empty, forms::TireForm};
use crate::{GarageError, router::GarageState};

const LIST: &str = "/gomme";
const NOT_FOUND: &str = "❌ Gomma non trovata o non accessibile";

#[derive(Debug, Serialize)]
pub struct TiresData {
    pub gomme: Vec<Tire>,
}

#[derive(Debug, Serialize)]
pub struct TireData {
    pub gomma: Tire,
}

pub async fn list(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, GarageError> {
    let gomme = state.storage.list_tires(user.id).await?;
    Ok(page(jar, "gomme.html", TiresData { gomme }))
}

pub async fn new_form(_user: CurrentUser, jar: PrivateCookieJar) -> impl IntoResponse {
    page(jar, "inserisci_gomma.html", Empty {})
}

pub async fn save(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Form(form): Form<TireForm>,
) -> Result<FlashRedirect, GarageError> {
    if form.marca.is_empty() || form.misura.is_empty() {
        return Ok(redirect_with(
            jar,
            "❌ Marca e misura sono obbligatorie",
            "/inserisci_gomma",
        ));
    }
    let quantita = match form.quantity() {
        Ok(q) => q,
        Err(e) => return Ok(redirect_with(jar, format!("❌ {e}"), "/inserisci_gomma")),
    };
    let id = state.storage.insert_tire(user.id, &form, quantita).await?;
    audit::record(
        &state.storage,
        &user,
        "gomme inserite",
        &format!("#{id} {} {} x{quantita}", form.marca, form.misura),
    )
    .await;
    Ok(redirect_with(jar, "✅ Gomme salvate correttamente", LIST))
}

pub async fn edit_form(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, GarageError> {
    match state.storage.get_tire(user.id, id).await? {
        Some(gomma) => Ok(page(jar, "modifica_gomma.html", TireData { gomma }).into_response()),
        None => Ok(redirect_with(jar, NOT_FOUND, LIST).into_response()),
    }
}

pub async fn update(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
    Form(form): Form<TireForm>,
) -> Result<FlashRedirect, GarageError> {
    let back = format!("/modifica_gomma/{id}");
    if form.marca.is_empty() || form.misura.is_empty() {
        return Ok(redirect_with(
            jar,
            "❌ Marca e misura sono obbligatorie",
            &back,
        ));
    }
    let quantita = match form.quantity() {
        Ok(q) => q,
        Err(e) => return Ok(redirect_with(jar, format!("❌ {e}"), &back)),
    };
    if !state
        .storage
        .update_tire(user.id, id, &form, quantita)
        .await?
    {
        return Ok(redirect_with(jar, NOT_FOUND, LIST));
    }
    audit::record(
        &state.storage,
        &user,
        "gomme aggiornate",
        &format!("#{id} {} {} x{quantita}", form.marca, form.misura),
    )
    .await;
    Ok(redirect_with(jar, "✅ Gomme aggiornate correttamente", LIST))
}

pub async fn delete(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<FlashRedirect, GarageError> {
    if !state.storage.delete_tire(user.id, id).await? {
        return Ok(redirect_with(jar, NOT_FOUND, LIST));
    }
    audit::record(&state.storage, &user, "gomme eliminate", &format!("#{id}")).await;
    Ok(redirect_with(jar, "✅ Gomme eliminate", LIST))
}

/// GET /scala_gomma/{id} -> take one tire out of stock.
pub async fn take_one(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<FlashRedirect, GarageError> {
    let outcome = state.storage.decrement_tire(user.id, id).await?;
    let mut jar = jar;
    match &outcome {
        Decrement::Taken { name, left } => {
            audit::record(
                &state.storage,
                &user,
                "gomma scalata",
                &format!("#{id} {name}, rimaste {left}"),
            )
            .await;
            jar = push_flash(jar, "✅ Giacenza gomme aggiornata");
        }
        Decrement::OutOfStock { .. } => {}
        Decrement::Missing => return Ok(redirect_with(jar, NOT_FOUND, LIST)),
    }
    if let Some(msg) = stock_message(&outcome) {
        jar = push_flash(jar, msg);
    }
    Ok((jar, Redirect::to(LIST)))
}
