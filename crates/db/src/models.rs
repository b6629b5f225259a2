//! Row types for the clinic tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedicalRecord {
    pub note: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vaccination {
    pub vaccine: String,
    pub date: String,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct PetRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_years: i64,
    pub age_months: i64,
    pub gender: String,
    pub medical_history: Json<Vec<MedicalRecord>>,
    pub vaccinations: Json<Vec<Vaccination>>,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct AppointmentRow {
    pub id: String,
    pub user_id: String,
    /// Nullable: early records carried only the denormalized pet name.
    pub pet_id: Option<String>,
    pub pet_name: String,
    pub service: String,
    /// Combined `"YYYY-MM-DD hh:mm AM"` string, display value and
    /// uniqueness key at once.
    pub date_time: String,
    pub status: String,
    pub payment_status: Option<String>,
    pub amount: i64,
    pub staff_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct PaymentRow {
    pub id: String,
    pub appointment_id: String,
    pub user_id: String,
    pub pet_name: String,
    pub service: String,
    pub amount: i64,
    pub method: String,
    pub reference_number: String,
    pub payment_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub id: String,
    pub date: String,
    pub time: String,
    pub is_booked: bool,
    pub client_id: Option<String>,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct RefreshRow {
    pub id: i64,
    pub user_id: String,
    pub jti: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}
