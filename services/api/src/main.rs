use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{HttpServer, middleware::Logger};
use tracing_subscriber::EnvFilter;

use api::state::{AppState, Settings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let s = Settings::from_env();
    let db = db::connect(&s.database_url, 10).await.expect("db");
    db::migrate(&db).await.expect("migrations");

    let state = AppState {
        db,
        jwt: auth::JwtKeys::from_secret(&s.jwt_secret),
        access_ttl: s.access_ttl_seconds.unwrap_or(900),
        refresh_ttl: s.refresh_ttl_seconds.unwrap_or(60 * 60 * 24 * 7),
        cookie_domain: s.cookie_domain.unwrap_or_else(|| "localhost".into()),
        cookie_secure: s.cookie_secure.unwrap_or(false),
        reset_link_base: s
            .reset_link_base
            .unwrap_or_else(|| "http://localhost:3000".into()),
    };

    let governor_conf = GovernorConfigBuilder::default()
        .burst_size(10)
        .finish()
        .unwrap();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_header()
            .allow_any_method();
        api::create_app(state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .wrap(Governor::new(&governor_conf))
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
