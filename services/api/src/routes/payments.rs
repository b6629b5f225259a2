//! The payment-submission procedure.

use actix_web::{HttpResponse, post, web};
use common::AppError;
use serde_json::json;

use crate::error::HttpApiError;
use crate::extractors::AuthUser;
use crate::schemas::SubmitPaymentInput;
use crate::state::AppState;

/// Validation happens before any write; the write itself is one
/// transaction in the db crate, so a failed submission leaves no rows.
#[post("/payments")]
pub async fn submit(
    data: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<SubmitPaymentInput>,
) -> actix_web::Result<HttpResponse> {
    let body = body.into_inner();
    let appointment_id = body
        .appointment_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let reference_number = body
        .reference_number
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let (appointment_id, reference_number) = match (appointment_id, reference_number) {
        (Some(a), Some(r)) => (a, r),
        _ => {
            return Err(HttpApiError::App(AppError::BadRequest(
                "Missing required fields".into(),
            ))
            .into());
        }
    };

    let row = db::submit_payment(&data.db, appointment_id, &user.user_id, reference_number)
        .await
        .map_err(HttpApiError::from)?;
    tracing::info!(payment_id = %row.id, appointment_id = %row.appointment_id, "payment submitted");
    Ok(HttpResponse::Created().json(json!({
        "message": "Payment submitted! Your reservation is being processed.",
        "payment": row
    })))
}
