use std::path::Path;

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::db::GarageStorage;
use crate::handlers::{auth, catalog, customers, history, parts, reminders, tires, vehicles, work_orders};

#[derive(Clone)]
pub struct GarageState {
    pub storage: GarageStorage,
    key: Key,
    /// Mark session cookies `Secure`.
    pub secure_cookie: bool,
}

impl GarageState {
    pub fn new(storage: GarageStorage, key: Key, secure_cookie: bool) -> Self {
        Self {
            storage,
            key,
            secure_cookie,
        }
    }
}

impl FromRef<GarageState> for Key {
    fn from_ref(state: &GarageState) -> Self {
        state.key.clone()
    }
}

pub fn garage_router(state: GarageState) -> Router {
    Router::new()
        .route("/", get(auth::home))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        // customers
        .route("/clienti", get(customers::list))
        .route("/inserisci_cliente", get(customers::new_form))
        .route("/salva_cliente", post(customers::save))
        .route("/modifica_cliente/{id}", get(customers::edit_form))
        .route("/aggiorna_cliente/{id}", post(customers::update))
        .route("/elimina_cliente/{id}", get(customers::delete))
        // vehicles
        .route("/vetture", get(vehicles::list))
        .route("/inserisci_vettura", get(vehicles::new_form))
        .route("/salva_vettura", post(vehicles::save))
        .route("/modifica_vettura/{id}", get(vehicles::edit_form))
        .route("/aggiorna_vettura/{id}", post(vehicles::update))
        .route("/elimina_vettura/{id}", get(vehicles::delete))
        // model catalog
        .route("/modelli", get(catalog::list))
        .route("/inserisci_modello", get(catalog::new_form))
        .route("/salva_modello", post(catalog::save))
        .route("/modifica_modello/{id}", get(catalog::edit_form))
        .route("/aggiorna_modello/{id}", post(catalog::update))
        .route("/elimina_modello/{id}", get(catalog::delete))
        .route("/modello/{id}/ricambi", get(catalog::model_parts))
        .route("/modello/{id}/aggiungi_ricambio", post(catalog::link_part))
        .route(
            "/modello/{id}/rimuovi_ricambio/{ricambio_id}",
            get(catalog::unlink_part),
        )
        // spare parts
        .route("/ricambi", get(parts::list))
        .route("/inserisci_ricambio", get(parts::new_form))
        .route("/salva_ricambio", post(parts::save))
        .route("/modifica_ricambio/{id}", get(parts::edit_form))
        .route("/aggiorna_ricambio/{id}", post(parts::update))
        .route("/elimina_ricambio/{id}", get(parts::delete))
        .route("/scala_ricambio/{id}", get(parts::take_one))
        // tires
        .route("/gomme", get(tires::list))
        .route("/inserisci_gomma", get(tires::new_form))
        .route("/salva_gomma", post(tires::save))
        .route("/modifica_gomma/{id}", get(tires::edit_form))
        .route("/aggiorna_gomma/{id}", post(tires::update))
        .route("/elimina_gomma/{id}", get(tires::delete))
        .route("/scala_gomma/{id}", get(tires::take_one))
        // work orders
        .route("/lavorazioni", get(work_orders::list))
        .route("/inserisci_lavorazione", get(work_orders::new_form))
        .route("/salva_lavorazione", post(work_orders::save))
        .route("/modifica_lavorazione/{id}", get(work_orders::edit_form))
        .route("/aggiorna_lavorazione/{id}", post(work_orders::update))
        .route(
            "/aggiorna_stato_lavorazione/{id}",
            post(work_orders::update_status),
        )
        .route("/elimina_lavorazione/{id}", get(work_orders::delete))
        .route("/lavorazione/{id}/usa_ricambio", post(work_orders::use_part))
        // reminders (JSON)
        .route("/lista_promemoria", get(reminders::list))
        .route("/aggiungi_promemoria", post(reminders::add))
        .route("/elimina_promemoria/{id}", post(reminders::delete))
        // activity log
        .route("/storico", get(history::list))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `dir` under `/static` when it exists.
pub fn with_static_files(router: Router, dir: &Path) -> Router {
    if dir.is_dir() {
        router.nest_service("/static", ServeDir::new(dir))
    } else {
        router
    }
}
