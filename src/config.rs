use std::path::PathBuf;

use axum_extra::extract::cookie::Key;
use base64::Engine;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use tracing::warn;

use crate::error::GarageError;

/// Runtime configuration.
///
/// Sources, later ones winning:
/// - built-in defaults
/// - `DATABASE_URL`
/// - `GARAGE_*` variables (`GARAGE_LISTEN_ADDR`, `GARAGE_COOKIE_KEY`, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Base64 encoded key (at least 64 bytes) for the private cookie jar.
    pub cookie_key: Option<String>,
    pub static_dir: PathBuf,
    /// Drop the `Secure` attribute from session cookies (plain-http deployments).
    pub insecure_cookie: bool,
    /// Accounts created at startup when the username does not exist yet.
    /// From the environment this is a JSON list of
    /// `{"username", "password", "nome_reale"}` objects.
    #[serde(default, deserialize_with = "bootstrap_users_from_json")]
    pub bootstrap_users: Vec<BootstrapUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub nome_reale: Option<String>,
}

/// Env values reach serde as plain strings; structured sources as sequences.
fn bootstrap_users_from_json<'de, D>(deserializer: D) -> Result<Vec<BootstrapUser>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<BootstrapUser>),
        Json(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::List(users) => Ok(users),
        Raw::Json(text) if text.trim().is_empty() => Ok(Vec::new()),
        Raw::Json(text) => serde_json::from_str(&text).map_err(D::Error::custom),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:garage.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            cookie_key: None,
            static_dir: PathBuf::from("static"),
            insecure_cookie: false,
            bootstrap_users: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, GarageError> {
        let cfg = Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["DATABASE_URL"]))
            .merge(Env::prefixed("GARAGE_"))
            .extract()?;
        Ok(cfg)
    }

    /// Key for the encrypted session and flash cookies.
    ///
    /// Falls back to a random key when none (or a short one) is configured,
    /// which logs everybody out on restart.
    pub fn cookie_key(&self) -> Key {
        let Some(encoded) = self.cookie_key.as_deref() else {
            warn!("GARAGE_COOKIE_KEY not set; generating an ephemeral cookie key");
            return Key::generate();
        };
        match base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .ok()
            .and_then(|bytes| Key::try_from(bytes.as_slice()).ok())
        {
            Some(key) => key,
            None => {
                warn!("GARAGE_COOKIE_KEY is not valid base64 of at least 64 bytes; generating an ephemeral key");
                Key::generate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn bootstrap_users_parse_from_json_env() {
        Jail::expect_with(|jail| {
            jail.set_env(
                "GARAGE_BOOTSTRAP_USERS",
                r#"[{"username":"anna","password":"pw","nome_reale":"Anna B"},{"username":"bruno","password":"pw2"}]"#,
            );
            let cfg = Config::from_env().map_err(|e| e.to_string())?;
            assert_eq!(cfg.bootstrap_users.len(), 2);
            assert_eq!(cfg.bootstrap_users[0].username, "anna");
            assert_eq!(cfg.bootstrap_users[0].nome_reale.as_deref(), Some("Anna B"));
            assert_eq!(cfg.bootstrap_users[1].password, "pw2");
            assert_eq!(cfg.bootstrap_users[1].nome_reale, None);
            Ok(())
        });
    }

    #[test]
    fn bootstrap_users_default_to_empty() {
        Jail::expect_with(|_jail| {
            let cfg = Config::from_env().map_err(|e| e.to_string())?;
            assert!(cfg.bootstrap_users.is_empty());
            assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
            Ok(())
        });
    }

    #[test]
    fn bootstrap_users_accept_structured_sources() {
        let users = vec![BootstrapUser {
            username: "carla".to_string(),
            password: "pw".to_string(),
            nome_reale: None,
        }];
        let cfg: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Serialized::default("bootstrap_users", users))
            .extract()
            .unwrap();
        assert_eq!(cfg.bootstrap_users.len(), 1);
        assert_eq!(cfg.bootstrap_users[0].username, "carla");
    }

    #[test]
    fn malformed_bootstrap_users_are_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("GARAGE_BOOTSTRAP_USERS", "[{not json");
            assert!(Config::from_env().is_err());
            Ok(())
        });
    }
}
