//! Pet records: owner CRUD plus the vet-only medical annotations.

use actix_web::{HttpResponse, delete, get, post, put, web};
use common::Role;
use serde_json::json;

use crate::error::HttpApiError;
use crate::extractors::{AuthUser, require_role};
use crate::schemas::{MedicalNoteInput, PetIn, VaccinationInput};
use crate::state::AppState;

fn to_new_pet(p: PetIn) -> db::NewPet {
    db::NewPet {
        name: p.name,
        species: p.species,
        breed: p.breed,
        age_years: p.age_years,
        age_months: p.age_months,
        gender: p.gender,
    }
}

#[get("/pets")]
pub async fn list(data: web::Data<AppState>, user: AuthUser) -> actix_web::Result<HttpResponse> {
    let rows = if user.role.is_staff() {
        db::list_pets(&data.db).await
    } else {
        db::list_pets_by_owner(&data.db, &user.user_id).await
    }
    .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/pets")]
pub async fn create(
    data: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<PetIn>,
) -> actix_web::Result<HttpResponse> {
    let row = db::insert_pet(&data.db, &user.user_id, &to_new_pet(body.into_inner()))
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Created().json(row))
}

async fn owned_pet(
    data: &AppState,
    user: &AuthUser,
    id: &str,
) -> actix_web::Result<db::PetRow> {
    let pet = db::get_pet(&data.db, id)
        .await
        .map_err(HttpApiError::from)?
        .ok_or_else(|| actix_web::error::ErrorNotFound("not found"))?;
    if !user.role.is_staff() && pet.owner_id != user.user_id {
        return Err(actix_web::error::ErrorForbidden("forbidden"));
    }
    Ok(pet)
}

#[put("/pets/{id}")]
pub async fn update(
    data: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
    body: web::Json<PetIn>,
) -> actix_web::Result<HttpResponse> {
    let id = path.into_inner();
    owned_pet(&data, &user, &id).await?;
    match db::update_pet(&data.db, &id, &to_new_pet(body.into_inner()))
        .await
        .map_err(HttpApiError::from)?
    {
        Some(row) => Ok(HttpResponse::Ok().json(row)),
        None => Err(actix_web::error::ErrorNotFound("not found")),
    }
}

#[delete("/pets/{id}")]
pub async fn remove(
    data: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    let id = path.into_inner();
    owned_pet(&data, &user, &id).await?;
    let affected = db::delete_pet(&data.db, &id)
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": affected })))
}

/// Vet staff append medical notes during or after a visit.
#[post("/pets/{id}/medical-notes")]
pub async fn add_medical_note(
    data: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
    body: web::Json<MedicalNoteInput>,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Vet)?;
    let row = db::add_medical_note(&data.db, &path.into_inner(), &body.note, &body.date)
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(row))
}

#[post("/pets/{id}/vaccinations")]
pub async fn add_vaccination(
    data: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<String>,
    body: web::Json<VaccinationInput>,
) -> actix_web::Result<HttpResponse> {
    require_role(&user, Role::Vet)?;
    let row = db::add_vaccination(&data.db, &path.into_inner(), &body.vaccine, &body.date)
        .await
        .map_err(HttpApiError::from)?;
    Ok(HttpResponse::Ok().json(row))
}
