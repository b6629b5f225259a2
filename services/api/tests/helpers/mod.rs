use api::state::AppState;
use auth::JwtKeys;
use common::Role;
use db::Db;

pub async fn test_state() -> AppState {
    // One connection keeps the in-memory database shared across requests.
    let db = db::connect("sqlite::memory:", 1).await.expect("db");
    db::migrate(&db).await.expect("migrations");
    AppState {
        db,
        jwt: JwtKeys::from_secret("test_secret_key"),
        access_ttl: 3600,
        refresh_ttl: 60 * 60 * 24 * 7,
        cookie_domain: "localhost".into(),
        cookie_secure: false,
        reset_link_base: "http://localhost:3000".into(),
    }
}

/// Seed a user row directly and mint an access token for it, skipping the
/// register endpoint for roles self-signup cannot produce.
pub async fn seed_user(state: &AppState, email: &str, name: &str, role: Role) -> (String, String) {
    let hash = auth::hash_password("supersecret").expect("hash");
    let user = db::insert_user(&state.db, email, name, &hash, role)
        .await
        .expect("insert user");
    let token = auth::sign_access(&state.jwt, &user.id, role, 3600).expect("token");
    (user.id, token)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

pub async fn seed_pet(db: &Db, owner_id: &str, name: &str) -> db::PetRow {
    db::insert_pet(
        db,
        owner_id,
        &db::NewPet {
            name: name.into(),
            species: "Dog".into(),
            breed: "Labrador".into(),
            age_years: 3,
            age_months: 0,
            gender: "Male".into(),
        },
    )
    .await
    .expect("insert pet")
}
