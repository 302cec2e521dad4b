#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use axum_extra::extract::cookie::Key;
use garage_hub::{GarageState, GarageStorage, garage_router};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

/// Throwaway SQLite file, removed on drop.
pub struct TestDb {
    pub path: PathBuf,
    pub storage: GarageStorage,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

pub async fn test_db() -> TestDb {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "garage-hub-test-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", path.display());
    let storage = GarageStorage::connect(&database_url)
        .await
        .expect("failed to open test database");

    storage
        .ensure_user("anna", "pw-anna", Some("Anna Bianchi"))
        .await
        .expect("failed to create anna");
    storage
        .ensure_user("bruno", "pw-bruno", None)
        .await
        .expect("failed to create bruno");

    TestDb { path, storage }
}

pub fn app(db: &TestDb) -> Router {
    let state = GarageState::new(db.storage.clone(), Key::generate(), false);
    garage_router(state)
}

/// Minimal browser: replays cookies set by previous responses.
pub struct Browser {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl Browser {
    pub fn new(app: Router) -> Self {
        Self {
            app,
            cookies: BTreeMap::new(),
        }
    }

    pub async fn logged_in(app: Router, username: &str, password: &str) -> Self {
        let mut browser = Self::new(app);
        let resp = browser
            .post_form("/login", &format!("username={username}&password={password}"))
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/");
        // drain the welcome message
        browser.page("/login").await;
        browser
    }

    pub async fn send(&mut self, req: Request<Body>) -> Response {
        let resp = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("request failed");
        self.store_cookies(&resp);
        resp
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let header_value = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, header_value);
        }
        builder
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        let req = self
            .request("GET", uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(req).await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> Response {
        let req = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        self.send(req).await
    }

    pub async fn post_json(&mut self, uri: &str, body: Value) -> Response {
        let req = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        self.send(req).await
    }

    /// GET a page and return its JSON view model.
    pub async fn page(&mut self, uri: &str) -> Value {
        let resp = self.get(uri).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
        json_body(resp).await
    }

    fn store_cookies(&mut self, resp: &Response) {
        for value in resp.headers().get_all(header::SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let pair = raw.split(';').next().unwrap_or_default();
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
    }
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn json_body(resp: Response) -> Value {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body).expect("response body was not JSON")
}

pub fn flashes(page: &Value) -> Vec<String> {
    page["flash"]
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
