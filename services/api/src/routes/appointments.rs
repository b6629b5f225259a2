//! Booking and the appointment lifecycle endpoints.

use actix_web::{HttpResponse, delete, get, post, put, web};
use common::{
    slots::{date_time_key, slot_is_open},
    AppError, AppointmentStatus,
};
use serde_json::json;

use crate::error::HttpApiError;
use crate::extractors::{AuthUser, require_staff};
use crate::schemas::{BookInput, RescheduleInput, StatusInput};
use crate::state::AppState;

/// Clients see their own appointments; staff see all of them.
#[get("/appointments")]
pub async fn list(data: web::Data<AppState>, user: AuthUser) -> actix_web::Result<HttpResponse> {
    let owner = if user.role.is_staff() {
        None
    } else {
        Some(user.user_id.as_str())
    };
    let rows = db::list_appointments(&data.db, owner)
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/appointments")]
pub async fn book(
    data: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<BookInput>,
) -> actix_web::Result<HttpResponse> {
    let body = body.into_inner();
    if body.pet_name.trim().is_empty()
        || body.service.trim().is_empty()
        || body.date.trim().is_empty()
        || body.time.trim().is_empty()
    {
        return Err(
            HttpApiError::App(AppError::BadRequest("Missing required fields".into())).into(),
        );
    }
    let service = common::find_service(&body.service)
        .ok_or_else(|| HttpApiError::App(AppError::BadRequest("Unknown service".into())))?;

    let admin_slots = db::admin_slots(&data.db).await.map_err(HttpApiError::from)?;
    if !slot_is_open(&body.date, &body.time, &admin_slots) {
        return Err(
            HttpApiError::App(AppError::BadRequest("Slot not available".into())).into(),
        );
    }

    // The pet must belong to the caller; its id is denormalized onto the
    // appointment alongside the name.
    let pet = db::list_pets_by_owner(&data.db, &user.user_id)
        .await
        .map_err(HttpApiError::from)?
        .into_iter()
        .find(|p| p.name == body.pet_name)
        .ok_or_else(|| HttpApiError::App(AppError::BadRequest("Unknown pet".into())))?;

    let row = db::book_appointment(
        &data.db,
        &db::BookAppointment {
            user_id: user.user_id.clone(),
            pet_id: Some(pet.id),
            pet_name: body.pet_name,
            service: service.name.into(),
            date_time: date_time_key(&body.date, &body.time),
            amount: service.price,
        },
    )
    .await
    .map_err(HttpApiError::from)?;
    tracing::info!(appointment_id = %row.id, slot = %row.date_time, "appointment booked");
    Ok(HttpResponse::Created().json(row))
}

/// Client cancel: delete the appointment and its payments together.
#[delete("/appointments/{id}")]
pub async fn cancel(
    data: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    let id = path.into_inner();
    let requester = if user.role.is_staff() {
        None
    } else {
        Some(user.user_id.as_str())
    };
    db::client_cancel(&data.db, &id, requester)
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Appointment canceled." })))
}

#[put("/appointments/{id}/reschedule")]
pub async fn reschedule(
    data: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
    body: web::Json<RescheduleInput>,
) -> actix_web::Result<HttpResponse> {
    let id = path.into_inner();
    let admin_slots = db::admin_slots(&data.db).await.map_err(HttpApiError::from)?;
    if !slot_is_open(&body.date, &body.time, &admin_slots) {
        return Err(
            HttpApiError::App(AppError::BadRequest("Slot not available".into())).into(),
        );
    }
    let requester = if user.role.is_staff() {
        None
    } else {
        Some(user.user_id.as_str())
    };
    let row = db::reschedule(
        &data.db,
        &id,
        requester,
        &date_time_key(&body.date, &body.time),
    )
    .await
    .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(row))
}

/// Staff transitions: Confirm, Complete, Cancel, guarded by the current
/// state.
#[put("/appointments/{id}/status")]
pub async fn update_status(
    data: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
    body: web::Json<StatusInput>,
) -> actix_web::Result<HttpResponse> {
    require_staff(&user)?;
    let next = AppointmentStatus::parse(&body.status)
        .ok_or_else(|| HttpApiError::App(AppError::BadRequest("Unknown status".into())))?;
    if matches!(
        next,
        AppointmentStatus::PendingPayment | AppointmentStatus::PendingApproval
    ) {
        return Err(
            HttpApiError::App(AppError::BadRequest("Unknown status".into())).into(),
        );
    }
    let row = db::update_status(&data.db, &path.into_inner(), next, &user.user_id)
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(row))
}
