use auth::JwtKeys;
use db::Db;
use serde::Deserialize;

/// Explicit context handed to every handler; there is no ambient SDK
/// singleton anywhere.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub jwt: JwtKeys,
    pub access_ttl: i64,
    pub refresh_ttl: i64,
    pub cookie_domain: String,
    pub cookie_secure: bool,
    /// Base of the password-reset links handed back to admins.
    pub reset_link_base: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_ttl_seconds: Option<i64>,
    pub refresh_ttl_seconds: Option<i64>,
    pub cookie_domain: Option<String>,
    pub cookie_secure: Option<bool>,
    pub reset_link_base: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let cfg = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .expect("config");

        cfg.try_deserialize::<Settings>()
            .expect("deserialize settings")
    }
}
