use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Serialize;

use crate::db::{Decrement, models::SparePart};
use crate::handlers::{FlashRedirect, page, redirect_with};
use crate::middleware::{CurrentUser, push_flash};
use crate::service::{audit, stock::stock_message};
use crate::types::{Empty, forms::SparePartForm};
use crate::{GarageError, router::GarageState};

const LIST: &str = "/ricambi";

#[derive(Debug, Serialize)]
pub struct PartsData {
    pub ricambi: Vec<SparePart>,
}

#[derive(Debug, Serialize)]
pub struct PartData {
    pub ricambio: SparePart,
}

pub async fn list(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, GarageError> {
    let ricambi = state.storage.list_parts(user.id).await?;
    Ok(page(jar, "ricambi.html", PartsData { ricambi }))
}

pub async fn new_form(_user: CurrentUser, jar: PrivateCookieJar) -> impl IntoResponse {
    page(jar, "inserisci_ricambio.html", Empty {})
}

pub async fn save(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Form(form): Form<SparePartForm>,
) -> Result<FlashRedirect, GarageError> {
    if form.nome.is_empty() || form.codice.is_empty() {
        return Ok(redirect_with(
            jar,
            "❌ Nome e codice sono obbligatori",
            "/inserisci_ricambio",
        ));
    }
    let quantita = match form.quantity() {
        Ok(q) => q,
        Err(e) => return Ok(redirect_with(jar, format!("❌ {e}"), "/inserisci_ricambio")),
    };

    let id = match state.storage.insert_part(user.id, &form, quantita).await {
        Ok(id) => id,
        Err(e) if e.is_unique_violation() => {
            return Ok(redirect_with(jar, "❌ Codice ricambio già esistente", LIST));
        }
        Err(e) => return Err(e),
    };
    audit::record(
        &state.storage,
        &user,
        "ricambio inserito",
        &format!("#{id} {} ({}) x{quantita}", form.nome, form.codice),
    )
    .await;
    Ok(redirect_with(jar, "✅ Ricambio salvato correttamente", LIST))
}

pub async fn edit_form(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, GarageError> {
    match state.storage.get_part(user.id, id).await? {
        Some(ricambio) => {
            Ok(page(jar, "modifica_ricambio.html", PartData { ricambio }).into_response())
        }
        None => Ok(
            redirect_with(jar, "❌ Ricambio non trovato o non accessibile", LIST).into_response(),
        ),
    }
}

pub async fn update(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
    Form(form): Form<SparePartForm>,
) -> Result<FlashRedirect, GarageError> {
    let back = format!("/modifica_ricambio/{id}");
    if form.nome.is_empty() || form.codice.is_empty() {
        return Ok(redirect_with(jar, "❌ Nome e codice sono obbligatori", &back));
    }
    let quantita = match form.quantity() {
        Ok(q) => q,
        Err(e) => return Ok(redirect_with(jar, format!("❌ {e}"), &back)),
    };

    let updated = match state.storage.update_part(user.id, id, &form, quantita).await {
        Ok(updated) => updated,
        Err(e) if e.is_unique_violation() => {
            return Ok(redirect_with(jar, "❌ Codice ricambio già in uso", LIST));
        }
        Err(e) => return Err(e),
    };
    if !updated {
        return Ok(redirect_with(
            jar,
            "❌ Ricambio non trovato o non accessibile",
            LIST,
        ));
    }
    audit::record(
        &state.storage,
        &user,
        "ricambio aggiornato",
        &format!("#{id} {} ({}) x{quantita}", form.nome, form.codice),
    )
    .await;
    Ok(redirect_with(jar, "✅ Ricambio aggiornato correttamente", LIST))
}

pub async fn delete(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<FlashRedirect, GarageError> {
    if state.storage.count_models_of_part(user.id, id).await? > 0 {
        return Ok(redirect_with(
            jar,
            "❌ Rimuovi prima le associazioni di questo ricambio ai modelli.",
            LIST,
        ));
    }
    if !state.storage.delete_part(user.id, id).await? {
        return Ok(redirect_with(
            jar,
            "❌ Ricambio non trovato o non accessibile",
            LIST,
        ));
    }
    audit::record(&state.storage, &user, "ricambio eliminato", &format!("#{id}")).await;
    Ok(redirect_with(jar, "✅ Ricambio eliminato", LIST))
}

/// GET /scala_ricambio/{id} -> take one unit out of stock.
pub async fn take_one(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<FlashRedirect, GarageError> {
    let jar = take_part(&state, &user, jar, id, None).await?;
    Ok((jar, Redirect::to(LIST)))
}

/// Decrement part `id`, flash the stock message and log the movement.
/// `context` says what the unit was used for.
pub(crate) async fn take_part(
    state: &GarageState,
    user: &CurrentUser,
    jar: PrivateCookieJar,
    id: i64,
    context: Option<&str>,
) -> Result<PrivateCookieJar, GarageError> {
    let outcome = state.storage.decrement_part(user.id, id).await?;
    let mut jar = jar;

    match &outcome {
        Decrement::Taken { name, left } => {
            let dettagli = match context {
                Some(ctx) => format!("#{id} {name}, rimasti {left} ({ctx})"),
                None => format!("#{id} {name}, rimasti {left}"),
            };
            audit::record(&state.storage, user, "ricambio scalato", &dettagli).await;
            jar = push_flash(jar, format!("✅ Scalato 1 {name}"));
        }
        Decrement::OutOfStock { .. } => {}
        Decrement::Missing => {
            return Ok(push_flash(jar, "❌ Ricambio non trovato o non accessibile"));
        }
    }

    if let Some(msg) = stock_message(&outcome) {
        jar = push_flash(jar, msg);
    }
    Ok(jar)
}
