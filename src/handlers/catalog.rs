//! Vehicle model catalog and its spare part associations.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Serialize;

use crate::db::models::{CarModel, SparePart};
use crate::handlers::{FlashRedirect, page, redirect_with};
use crate::middleware::CurrentUser;
use crate::service::audit;
use crate::types::{
    Empty,
    forms::{CarModelForm, PartPickForm},
};
use crate::{GarageError, router::GarageState};

const LIST: &str = "/modelli";

#[derive(Debug, Serialize)]
pub struct CarModelsData {
    pub modelli: Vec<CarModel>,
}

#[derive(Debug, Serialize)]
pub struct CarModelData {
    pub modello: CarModel,
}

#[derive(Debug, Serialize)]
pub struct ModelPartsData {
    pub modello: CarModel,
    pub associati: Vec<SparePart>,
    pub non_associati: Vec<SparePart>,
}

pub async fn list(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, GarageError> {
    let modelli = state.storage.list_car_models(user.id).await?;
    Ok(page(jar, "modelli.html", CarModelsData { modelli }))
}

pub async fn new_form(_user: CurrentUser, jar: PrivateCookieJar) -> impl IntoResponse {
    page(jar, "inserisci_modello.html", Empty {})
}

pub async fn save(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Form(form): Form<CarModelForm>,
) -> Result<FlashRedirect, GarageError> {
    if form.marca.is_empty() || form.modello.is_empty() {
        return Ok(redirect_with(
            jar,
            "❌ Marca e modello sono obbligatori",
            "/inserisci_modello",
        ));
    }
    let id = match state.storage.insert_car_model(user.id, &form).await {
        Ok(id) => id,
        Err(e) if e.is_unique_violation() => {
            return Ok(redirect_with(jar, "❌ Modello già presente", LIST));
        }
        Err(e) => return Err(e),
    };
    audit::record(
        &state.storage,
        &user,
        "modello inserito",
        &format!("#{id} {} {}", form.marca, form.modello),
    )
    .await;
    Ok(redirect_with(jar, "✅ Modello salvato correttamente", LIST))
}

pub async fn edit_form(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, GarageError> {
    match state.storage.get_car_model(user.id, id).await? {
        Some(modello) => {
            Ok(page(jar, "modifica_modello.html", CarModelData { modello }).into_response())
        }
        None => Ok(redirect_with(
            jar,
            format!("❌ Modello ID {id} non trovato o non accessibile"),
            LIST,
        )
        .into_response()),
    }
}

pub async fn update(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
    Form(form): Form<CarModelForm>,
) -> Result<FlashRedirect, GarageError> {
    if form.marca.is_empty() || form.modello.is_empty() {
        return Ok(redirect_with(
            jar,
            "❌ Marca e modello sono obbligatori",
            &format!("/modifica_modello/{id}"),
        ));
    }
    let updated = match state.storage.update_car_model(user.id, id, &form).await {
        Ok(updated) => updated,
        Err(e) if e.is_unique_violation() => {
            return Ok(redirect_with(jar, "❌ Modello già presente", LIST));
        }
        Err(e) => return Err(e),
    };
    if !updated {
        return Ok(redirect_with(
            jar,
            format!("❌ Modello ID {id} non trovato o non accessibile"),
            LIST,
        ));
    }
    audit::record(
        &state.storage,
        &user,
        "modello aggiornato",
        &format!("#{id} {} {}", form.marca, form.modello),
    )
    .await;
    Ok(redirect_with(jar, "✅ Modello aggiornato correttamente", LIST))
}

pub async fn delete(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<FlashRedirect, GarageError> {
    if state.storage.count_parts_of_model(user.id, id).await? > 0 {
        return Ok(redirect_with(
            jar,
            "❌ Rimuovi prima le associazioni ricambi a questo modello.",
            LIST,
        ));
    }
    if !state.storage.delete_car_model(user.id, id).await? {
        return Ok(redirect_with(
            jar,
            format!("❌ Modello ID {id} non trovato o non accessibile"),
            LIST,
        ));
    }
    audit::record(&state.storage, &user, "modello eliminato", &format!("#{id}")).await;
    Ok(redirect_with(jar, "✅ Modello eliminato correttamente", LIST))
}

/// GET /modello/{id}/ricambi -> linked and linkable parts of a model.
pub async fn model_parts(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, GarageError> {
    let Some(modello) = state.storage.get_car_model(user.id, id).await? else {
        return Ok(
            redirect_with(jar, "❌ Modello non trovato o non accessibile", LIST).into_response(),
        );
    };
    let associati = state.storage.parts_of_model(user.id, id).await?;
    let non_associati = state.storage.parts_not_in_model(user.id, id).await?;
    let data = ModelPartsData {
        modello,
        associati,
        non_associati,
    };
    Ok(page(jar, "modello_ricambi.html", data).into_response())
}

/// Both ends of a link must belong to the user.
async fn owns_model_and_part(
    state: &GarageState,
    user: &CurrentUser,
    model_id: i64,
    part_id: Option<i64>,
) -> Result<Option<i64>, GarageError> {
    let Some(part_id) = part_id else {
        return Ok(None);
    };
    let model = state.storage.get_car_model(user.id, model_id).await?;
    let part = state.storage.get_part(user.id, part_id).await?;
    Ok((model.is_some() && part.is_some()).then_some(part_id))
}

pub async fn link_part(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
    Form(form): Form<PartPickForm>,
) -> Result<FlashRedirect, GarageError> {
    let back = format!("/modello/{id}/ricambi");
    let part_id = form.part_id().ok().flatten();
    let Some(part_id) = owns_model_and_part(&state, &user, id, part_id).await? else {
        return Ok(redirect_with(jar, "❌ Modello o ricambio non valido", &back));
    };

    match state.storage.link_part(user.id, id, part_id).await {
        Ok(()) => {}
        Err(e) if e.is_unique_violation() => {
            return Ok(redirect_with(
                jar,
                "ℹ️ Ricambio già associato a questo modello",
                &back,
            ));
        }
        Err(e) => return Err(e),
    }
    audit::record(
        &state.storage,
        &user,
        "ricambio associato",
        &format!("modello #{id} ricambio #{part_id}"),
    )
    .await;
    Ok(redirect_with(jar, "✅ Ricambio associato al modello", &back))
}

pub async fn unlink_part(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path((id, ricambio_id)): Path<(i64, i64)>,
) -> Result<FlashRedirect, GarageError> {
    let back = format!("/modello/{id}/ricambi");
    let Some(part_id) = owns_model_and_part(&state, &user, id, Some(ricambio_id)).await? else {
        return Ok(redirect_with(jar, "❌ Modello o ricambio non valido", &back));
    };

    if !state.storage.unlink_part(user.id, id, part_id).await? {
        return Ok(redirect_with(
            jar,
            "ℹ️ Ricambio non associato a questo modello",
            &back,
        ));
    }
    audit::record(
        &state.storage,
        &user,
        "associazione rimossa",
        &format!("modello #{id} ricambio #{part_id}"),
    )
    .await;
    Ok(redirect_with(jar, "✅ Associazione rimossa", &back))
}
