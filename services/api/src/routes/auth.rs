use crate::error::HttpApiError;
use crate::middleware::ACCESS_COOKIE;
use crate::{
    schemas::{LoginInput, RegisterInput},
    state::AppState,
};
use actix_web::{HttpRequest, HttpResponse, post, web};
use auth::{hash_password, sha256_hex, sign_access, sign_refresh, verify_password};
use chrono::{Duration, Utc};
use common::Role;
use serde_json::json;

pub const REFRESH_COOKIE: &str = "refresh_token";

async fn issue_tokens(
    data: &AppState,
    user: &db::UserRow,
    role: Role,
) -> actix_web::Result<(String, String)> {
    let access = sign_access(&data.jwt, &user.id, role, data.access_ttl)
        .map_err(|_| actix_web::error::ErrorInternalServerError("sign access"))?;
    let (refresh_token, claims) = sign_refresh(&data.jwt, &user.id, role, data.refresh_ttl)
        .map_err(|_| actix_web::error::ErrorInternalServerError("sign refresh"))?;

    let token_hash = format!("sha256:{}", sha256_hex(&refresh_token));
    let expires_at = Utc::now() + Duration::seconds(data.refresh_ttl);
    db::insert_refresh(&data.db, &user.id, &claims.jti, &token_hash, expires_at)
        .await
        .map_err(HttpApiError::from)?;
    Ok((access, refresh_token))
}

fn refresh_cookie(data: &AppState, value: String) -> actix_web::cookie::Cookie<'static> {
    actix_web::cookie::Cookie::build(REFRESH_COOKIE, value)
        .domain(data.cookie_domain.clone())
        .secure(data.cookie_secure)
        .http_only(true)
        .path("/")
        .finish()
}

/// Self-signup. Always a client account; staff roles come from the admin
/// procedures only.
#[post("/auth/register")]
pub async fn register(
    data: web::Data<AppState>,
    payload: web::Json<RegisterInput>,
) -> actix_web::Result<HttpResponse> {
    let payload = payload.into_inner();
    if payload.email.trim().is_empty() || payload.name.trim().is_empty() {
        return Err(HttpApiError::App(common::AppError::BadRequest(
            "Missing required fields".into(),
        ))
        .into());
    }

    if db::find_user_by_email(&data.db, &payload.email)
        .await
        .map_err(HttpApiError::from)?
        .is_some()
    {
        return Err(actix_web::error::ErrorConflict("email already registered"));
    }

    let hash = hash_password(&payload.password)
        .map_err(|_| actix_web::error::ErrorInternalServerError("hash error"))?;
    let user = db::insert_user(&data.db, &payload.email, &payload.name, &hash, Role::Client)
        .await
        .map_err(HttpApiError::from)?;
    tracing::info!(user_id = %user.id, "registered new client");

    let (access, refresh_token) = issue_tokens(&data, &user, Role::Client).await?;
    let mut resp = HttpResponse::Created().json(json!({
        "user": { "id": user.id, "name": user.name, "email": user.email, "role": user.role },
        "tokens": { "access": access, "refresh": refresh_token }
    }));
    resp.add_cookie(&refresh_cookie(&data, refresh_token.clone()))
        .ok();
    Ok(resp)
}

#[post("/auth/login")]
pub async fn login(
    data: web::Data<AppState>,
    payload: web::Json<LoginInput>,
) -> actix_web::Result<HttpResponse> {
    let payload = payload.into_inner();

    let user = db::find_user_by_email(&data.db, &payload.email)
        .await
        .map_err(HttpApiError::from)?
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("invalid credentials"))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(actix_web::error::ErrorUnauthorized("invalid credentials"));
    }

    let role = Role::parse(&user.role)
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("bad role"))?;
    let (access, refresh_token) = issue_tokens(&data, &user, role).await?;

    let mut resp = HttpResponse::Ok().json(json!({
        "user": { "id": user.id, "name": user.name, "email": user.email, "role": user.role },
        "tokens": { "access": access, "refresh": refresh_token }
    }));
    resp.add_cookie(&refresh_cookie(&data, refresh_token.clone()))
        .ok();
    Ok(resp)
}

#[post("/auth/refresh")]
pub async fn refresh(
    req: HttpRequest,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    let refresh_cookie_in = req
        .cookie(REFRESH_COOKIE)
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("no refresh"))?;
    let token = refresh_cookie_in.value().to_string();
    let claims = auth::verify(&data.jwt, &token)
        .map_err(|_| actix_web::error::ErrorUnauthorized("bad refresh"))?;

    match db::get_refresh_by_jti(&data.db, &claims.jti)
        .await
        .map_err(HttpApiError::from)?
    {
        Some(row) => {
            if row.revoked {
                return Err(actix_web::error::ErrorUnauthorized("revoked"));
            }
            let given_hash = format!("sha256:{}", sha256_hex(&token));
            if given_hash != row.token_hash {
                return Err(actix_web::error::ErrorUnauthorized("mismatch"));
            }
        }
        None => return Err(actix_web::error::ErrorUnauthorized("missing")),
    }

    // Rotation: revoke the presented token, issue a fresh pair.
    db::revoke_refresh(&data.db, &claims.jti)
        .await
        .map_err(HttpApiError::from)?;

    let access = auth::sign_access(&data.jwt, &claims.sub, claims.role, data.access_ttl)
        .map_err(|_| HttpApiError::Auth)?;
    let (refresh_new, claims_new) =
        auth::sign_refresh(&data.jwt, &claims.sub, claims.role, data.refresh_ttl)
            .map_err(|_| HttpApiError::Auth)?;

    let token_hash = format!("sha256:{}", sha256_hex(&refresh_new));
    let expires_at = Utc::now() + Duration::seconds(data.refresh_ttl);
    db::insert_refresh(&data.db, &claims.sub, &claims_new.jti, &token_hash, expires_at)
        .await
        .map_err(HttpApiError::from)?;

    let mut resp = HttpResponse::Ok().json(json!({ "access_token": access }));
    resp.add_cookie(&refresh_cookie(&data, refresh_new)).ok();
    Ok(resp)
}

#[post("/auth/logout")]
pub async fn logout(
    req: HttpRequest,
    data: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    if let Some(c) = req.cookie(REFRESH_COOKIE) {
        if let Ok(claims) = auth::verify(&data.jwt, c.value()) {
            db::revoke_refresh(&data.db, &claims.jti)
                .await
                .map_err(HttpApiError::from)?;
        }
    }
    let clear = |name: &'static str| {
        actix_web::cookie::Cookie::build(name, "")
            .path("/")
            .domain(data.cookie_domain.clone())
            .secure(data.cookie_secure)
            .http_only(true)
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .finish()
    };
    let mut resp = HttpResponse::Ok().finish();
    resp.add_cookie(&clear(ACCESS_COOKIE)).ok();
    resp.add_cookie(&clear(REFRESH_COOKIE)).ok();
    Ok(resp)
}
