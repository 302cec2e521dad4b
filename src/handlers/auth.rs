use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Serialize;
use tracing::{info, warn};

use crate::db::models::StatusCount;
use crate::handlers::{FlashRedirect, page, redirect_with};
use crate::middleware::session::{end_session, start_session};
use crate::middleware::CurrentUser;
use crate::service::stock::LOW_STOCK_THRESHOLD;
use crate::types::{Empty, forms::LoginForm};
use crate::{GarageError, router::GarageState};

#[derive(Debug, Serialize)]
pub struct HomeData {
    pub nome_reale: String,
    pub mostra_menu: bool,
    pub lavorazioni_per_stato: Vec<StatusCount>,
    pub ricambi_in_esaurimento: i64,
}

/// GET / -> dashboard, or the login page for anonymous visitors.
pub async fn home(
    State(state): State<GarageState>,
    jar: PrivateCookieJar,
) -> Result<Response, GarageError> {
    let Some(user) = CurrentUser::from_jar(&jar) else {
        return Ok(Redirect::to("/login").into_response());
    };

    let lavorazioni_per_stato = state.storage.status_counts(user.id).await?;
    let ricambi_in_esaurimento = state
        .storage
        .count_low_stock_parts(user.id, LOW_STOCK_THRESHOLD)
        .await?;

    let data = HomeData {
        nome_reale: user.display_name,
        mostra_menu: true,
        lavorazioni_per_stato,
        ricambi_in_esaurimento,
    };
    Ok(page(jar, "home.html", data).into_response())
}

pub async fn login_page(jar: PrivateCookieJar) -> impl IntoResponse {
    page(jar, "login.html", Empty {})
}

/// POST /login
pub async fn login(
    State(state): State<GarageState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<FlashRedirect, GarageError> {
    let Some(user) = state
        .storage
        .authenticate(&form.username, &form.password)
        .await?
    else {
        warn!(username = %form.username, "login rejected");
        return Ok(redirect_with(jar, "❌ Username o password errati", "/login"));
    };

    let session = CurrentUser {
        id: user.id,
        username: user.username.clone(),
        display_name: user.display_name().to_string(),
    };
    let jar = start_session(jar, &session, state.secure_cookie)?;
    info!(user_id = session.id, username = %session.username, "login");

    Ok(redirect_with(
        jar,
        format!("✅ Benvenuto, {}!", session.display_name),
        "/",
    ))
}

/// GET /logout
pub async fn logout(user: CurrentUser, jar: PrivateCookieJar) -> FlashRedirect {
    info!(user_id = user.id, "logout");
    redirect_with(
        end_session(jar),
        "Logout effettuato correttamente",
        "/login",
    )
}
