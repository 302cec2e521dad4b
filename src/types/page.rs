use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// View model of a page.
///
/// `template` names the page the front end renders; `flash` carries the
/// messages queued by the previous redirect; `data` is the page content.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub template: &'static str,
    pub flash: Vec<String>,
    pub data: T,
}

impl<T: Serialize> Page<T> {
    pub fn new(template: &'static str, flash: Vec<String>, data: T) -> Self {
        Self {
            template,
            flash,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Data of pages that only show a form.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}
