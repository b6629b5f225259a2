//! Admin-only procedures: user management, schedule slots, payment
//! approval, and the overview counts.

use actix_web::{HttpResponse, delete, get, post, put, web};
use common::Role;
use serde_json::json;

use crate::error::HttpApiError;
use crate::extractors::{AuthUser, require_role};
use crate::schemas::{CreateUserInput, EditUserInput, ResetPasswordInput, ScheduleInput};
use crate::state::AppState;

#[get("/admin/overview")]
pub async fn overview(
    data: web::Data<AppState>,
    user: AuthUser,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Admin)?;
    let users = db::count_users(&data.db).await.map_err(HttpApiError::from)?;
    let pets = db::count_pets(&data.db).await.map_err(HttpApiError::from)?;
    let appointments = db::count_appointments(&data.db)
        .await
        .map_err(HttpApiError::from)?;
    let payments = db::count_payments(&data.db)
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(json!({
        "users": users,
        "pets": pets,
        "appointments": appointments,
        "payments": payments,
    })))
}

#[get("/admin/users")]
pub async fn list_users(
    data: web::Data<AppState>,
    user: AuthUser,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Admin)?;
    let rows = db::list_users(&data.db).await.map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Staff accounts start with the fixed default password until reset.
#[post("/admin/users")]
pub async fn create_user(
    data: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<CreateUserInput>,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Admin)?;
    let body = body.into_inner();
    let hash = auth::hash_password(auth::DEFAULT_PASSWORD)
        .map_err(|_| actix_web::error::ErrorInternalServerError("hash error"))?;
    let row = db::insert_user(&data.db, &body.email, &body.name, &hash, body.role)
        .await
        .map_err(HttpApiError::from)?;
    tracing::info!(user_id = %row.id, role = %row.role, "admin created user");
    Ok(HttpResponse::Created().json(json!({ "message": "User created successfully!", "user": row })))
}

#[put("/admin/users/{id}")]
pub async fn edit_user(
    data: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
    body: web::Json<EditUserInput>,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Admin)?;
    let id = path.into_inner();
    match db::update_user(&data.db, &id, &body.name, body.role)
        .await
        .map_err(HttpApiError::from)?
    {
        Some(row) => {
            Ok(HttpResponse::Ok().json(json!({ "message": "User updated successfully!", "user": row })))
        }
        None => Err(actix_web::error::ErrorNotFound("not found")),
    }
}

#[delete("/admin/users/{id}")]
pub async fn delete_user(
    data: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Admin)?;
    let id = path.into_inner();
    db::delete_user(&data.db, &id)
        .await
        .map_err(HttpApiError::from)?;
    tracing::info!(user_id = %id, "admin deleted user");
    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted successfully!" })))
}

/// Produces a signed reset link for the admin to hand out; nothing is
/// emailed from here.
#[post("/admin/users/reset-password")]
pub async fn reset_password(
    data: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<ResetPasswordInput>,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Admin)?;
    let target = db::find_user_by_email(&data.db, &body.email)
        .await
        .map_err(HttpApiError::from)?
        .ok_or_else(|| actix_web::error::ErrorNotFound("not found"))?;
    let token = auth::sign_reset(&data.jwt, &target.id, &target.email)
        .map_err(|_| actix_web::error::ErrorInternalServerError("sign reset"))?;
    let link = format!("{}/reset-password?token={token}", data.reset_link_base);
    Ok(HttpResponse::Ok().json(json!({ "message": "Password reset email sent!", "link": link })))
}

#[get("/admin/schedules")]
pub async fn list_schedules(
    data: web::Data<AppState>,
    user: AuthUser,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Admin)?;
    let rows = db::list_schedules(&data.db)
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/admin/schedules")]
pub async fn add_schedule(
    data: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<ScheduleInput>,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Admin)?;
    if body.date.trim().is_empty() || body.time.trim().is_empty() {
        return Err(HttpApiError::App(common::AppError::BadRequest(
            "Date and time required".into(),
        ))
        .into());
    }
    let row = db::insert_schedule(&data.db, &body.date, &body.time)
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Created().json(row))
}

#[derive(serde::Deserialize)]
pub struct PaymentFilter {
    pub status: Option<String>,
}

#[get("/admin/payments")]
pub async fn list_payments(
    data: web::Data<AppState>,
    user: AuthUser,
    filter: web::Query<PaymentFilter>,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Admin)?;
    let rows = db::list_payments(&data.db, filter.status.as_deref())
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Marks the payment paid and mirrors it onto the appointment. The
/// appointment's own status is not advanced here; see DESIGN.md.
#[post("/admin/payments/{id}/approve")]
pub async fn approve_payment(
    data: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Admin)?;
    let row = db::approve_payment(&data.db, &path.into_inner())
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Payment marked as paid!", "payment": row })))
}
