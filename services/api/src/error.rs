use actix_web::{HttpResponse, ResponseError};
use common::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpApiError {
    #[error("{0}")]
    App(#[from] AppError),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("db error")]
    Db(db::DbError),
    #[error("auth error")]
    Auth,
}

impl From<db::DbError> for HttpApiError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(_) => HttpApiError::App(AppError::NotFound),
            db::DbError::Conflict(msg) => HttpApiError::Conflict(msg),
            db::DbError::Forbidden(_) => HttpApiError::App(AppError::Forbidden),
            other => {
                tracing::error!(error = %other, "database failure");
                HttpApiError::Db(other)
            }
        }
    }
}

impl ResponseError for HttpApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::App(AppError::NotFound) => HttpResponse::NotFound().finish(),
            Self::App(AppError::Conflict) => HttpResponse::Conflict().finish(),
            Self::App(AppError::Unauthorized) => HttpResponse::Unauthorized().finish(),
            Self::App(AppError::Forbidden) => HttpResponse::Forbidden().finish(),
            Self::App(AppError::BadRequest(msg)) => {
                HttpResponse::BadRequest().json(serde_json::json!({"error": msg}))
            }
            Self::Conflict(msg) => {
                HttpResponse::Conflict().json(serde_json::json!({"error": msg}))
            }
            Self::Auth => HttpResponse::Unauthorized().finish(),
            // Internal details are logged server-side; the caller gets a
            // generic error.
            _ => HttpResponse::InternalServerError().finish(),
        }
    }
}
