use actix_web::{FromRequest, HttpMessage};
use common::Role;
use std::future::{Ready, ready};

/// Authenticated caller, inserted by the [`crate::middleware::Authenticate`]
/// middleware when a valid token is present.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        if let Some(ext) = req.extensions().get::<AuthUser>() {
            return ready(Ok(ext.clone()));
        }
        ready(Err(actix_web::error::ErrorUnauthorized("unauthorized")))
    }
}

/// Admin always passes; everyone else needs the exact role.
pub fn require_role(user: &AuthUser, role: Role) -> Result<(), actix_web::Error> {
    if user.role == role || user.role == Role::Admin {
        return Ok(());
    }
    Err(actix_web::error::ErrorForbidden("forbidden"))
}

/// Vet, groomer, or admin.
pub fn require_staff(user: &AuthUser) -> Result<(), actix_web::Error> {
    if user.role.is_staff() {
        return Ok(());
    }
    Err(actix_web::error::ErrorForbidden("forbidden"))
}
