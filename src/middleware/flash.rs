//! One-shot user messages carried across a redirect.

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};

const FLASH_COOKIE: &str = "garage_flash";

fn pending(jar: &PrivateCookieJar) -> Vec<String> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| serde_json::from_str(c.value()).ok())
        .unwrap_or_default()
}

/// Queue `message` for the next rendered page.
pub fn push_flash(jar: PrivateCookieJar, message: impl Into<String>) -> PrivateCookieJar {
    let mut messages = pending(&jar);
    messages.push(message.into());
    // a Vec<String> always serializes
    let value = serde_json::to_string(&messages).unwrap_or_default();
    jar.add(
        Cookie::build(Cookie::new(FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

/// Drain the queued messages.
pub fn take_flashes(jar: PrivateCookieJar) -> (PrivateCookieJar, Vec<String>) {
    let messages = pending(&jar);
    if messages.is_empty() {
        return (jar, messages);
    }
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    #[test]
    fn flashes_accumulate_and_drain_once() {
        let jar = PrivateCookieJar::new(Key::generate());
        let jar = push_flash(jar, "primo");
        let jar = push_flash(jar, "secondo");

        let (jar, messages) = take_flashes(jar);
        assert_eq!(messages, vec!["primo".to_string(), "secondo".to_string()]);

        let (_jar, messages) = take_flashes(jar);
        assert!(messages.is_empty());
    }
}
