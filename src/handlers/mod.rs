//! HTTP handlers, one module per area.
//!
//! Form posts answer with a redirect plus a flash message; page routes
//! answer with the page view model (see [`crate::types::Page`]).

pub mod auth;
pub mod catalog;
pub mod customers;
pub mod history;
pub mod parts;
pub mod reminders;
pub mod tires;
pub mod vehicles;
pub mod work_orders;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Serialize;
use serde_json::json;

use crate::middleware::{push_flash, take_flashes};
use crate::types::Page;

pub type FlashRedirect = (PrivateCookieJar, Redirect);

/// Queue `message` and redirect to `to`.
pub(crate) fn redirect_with(
    jar: PrivateCookieJar,
    message: impl Into<String>,
    to: &str,
) -> FlashRedirect {
    (push_flash(jar, message), Redirect::to(to))
}

/// Build a page, draining pending flash messages into it.
pub(crate) fn page<T: Serialize>(
    jar: PrivateCookieJar,
    template: &'static str,
    data: T,
) -> (PrivateCookieJar, Page<T>) {
    let (jar, flash) = take_flashes(jar);
    (jar, Page::new(template, flash, data))
}

/// `{"success": false, "error": ...}` answer of the JSON routes.
pub(crate) fn json_failure(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(json!({ "success": false, "error": error.into() }))).into_response()
}

/// Unwrap a JSON body, answering malformed ones with a 400 `json_failure`.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(value)| value)
        .map_err(|rejection| json_failure(StatusCode::BAD_REQUEST, rejection.body_text()))
}
