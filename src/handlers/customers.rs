use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Serialize;

use crate::db::models::Customer;
use crate::handlers::{FlashRedirect, page, redirect_with};
use crate::middleware::CurrentUser;
use crate::service::audit;
use crate::types::{Empty, forms::CustomerForm};
use crate::{GarageError, router::GarageState};

const LIST: &str = "/clienti";

#[derive(Debug, Serialize)]
pub struct CustomersData {
    pub clienti: Vec<Customer>,
}

#[derive(Debug, Serialize)]
pub struct CustomerData {
    pub cliente: Customer,
}

pub async fn list(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, GarageError> {
    let clienti = state.storage.list_customers(user.id).await?;
    Ok(page(jar, "clienti.html", CustomersData { clienti }))
}

pub async fn new_form(_user: CurrentUser, jar: PrivateCookieJar) -> impl IntoResponse {
    page(jar, "inserisci_cliente.html", Empty {})
}

pub async fn save(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Form(form): Form<CustomerForm>,
) -> Result<FlashRedirect, GarageError> {
    let id = state.storage.insert_customer(user.id, &form).await?;
    audit::record(
        &state.storage,
        &user,
        "cliente inserito",
        &format!("#{id} {} {}", form.nome, form.cognome),
    )
    .await;
    Ok(redirect_with(jar, "✅ Cliente salvato correttamente", LIST))
}

pub async fn edit_form(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, GarageError> {
    match state.storage.get_customer(user.id, id).await? {
        Some(cliente) => {
            Ok(page(jar, "modifica_cliente.html", CustomerData { cliente }).into_response())
        }
        None => Ok(redirect_with(
            jar,
            format!("❌ Cliente ID {id} non trovato o non accessibile"),
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
    Form(form): Form<CustomerForm>,
) -> Result<FlashRedirect, GarageError> {
    if !state.storage.update_customer(user.id, id, &form).await? {
        return Ok(redirect_with(
            jar,
            format!("❌ Cliente ID {id} non trovato o non accessibile"),
            LIST,
        ));
    }
    audit::record(
        &state.storage,
        &user,
        "cliente aggiornato",
        &format!("#{id} {} {}", form.nome, form.cognome),
    )
    .await;
    Ok(redirect_with(jar, "✅ Cliente aggiornato correttamente", LIST))
}

pub async fn delete(
    State(state): State<GarageState>,
    user: CurrentUser,
    jar: PrivateCookieJar,
    Path(id): Path<i64>,
) -> Result<FlashRedirect, GarageError> {
    let linked = state.storage.count_vehicles_of_customer(user.id, id).await?;
    if linked > 0 {
        return Ok(redirect_with(
            jar,
            format!("❌ Non puoi eliminare: il cliente ha {linked} vettura/e associate."),
            LIST,
        ));
    }
    if !state.storage.delete_customer(user.id, id).await? {
        return Ok(redirect_with(
            jar,
            format!("❌ Cliente ID {id} non trovato o non accessibile"),
            LIST,
        ));
    }
    audit::record(&state.storage, &user, "cliente eliminato", &format!("#{id}")).await;
    Ok(redirect_with(jar, "✅ Cliente eliminato", LIST))
}
