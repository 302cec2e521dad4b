use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

const SESSION_COOKIE: &str = "garage_session";

/// The logged-in user, decoded from the encrypted session cookie.
///
/// Using it as a handler argument makes the route login-only: requests
/// without a valid session are redirected to `/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    /// Real name when known, the username otherwise.
    pub display_name: String,
}

impl CurrentUser {
    pub fn from_jar(jar: &PrivateCookieJar) -> Option<Self> {
        let cookie = jar.get(SESSION_COOKIE)?;
        serde_json::from_str(cookie.value()).ok()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::<Key>::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        CurrentUser::from_jar(&jar).ok_or_else(|| Redirect::to("/login"))
    }
}

/// Store `user` in the session cookie.
pub fn start_session(
    jar: PrivateCookieJar,
    user: &CurrentUser,
    secure: bool,
) -> Result<PrivateCookieJar, serde_json::Error> {
    let value = serde_json::to_string(user)?;
    let cookie = Cookie::build(Cookie::new(SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(12))
        .build();
    Ok(jar.add(cookie))
}

pub fn end_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}
