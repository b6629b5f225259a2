use common::Role;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct EditUserInput {
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordInput {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PetIn {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_years: i64,
    #[serde(default)]
    pub age_months: i64,
    pub gender: String,
}

#[derive(Debug, Deserialize)]
pub struct MedicalNoteInput {
    pub note: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct VaccinationInput {
    pub vaccine: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct BookInput {
    pub pet_name: String,
    pub service: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct RescheduleInput {
    pub date: String,
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: String,
}

/// Payload of the payment-submission procedure. Optional fields are
/// tolerated but ignored; the appointment row is the source of truth for
/// amount and service.
#[derive(Debug, Deserialize)]
pub struct SubmitPaymentInput {
    pub appointment_id: Option<String>,
    pub reference_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleInput {
    pub date: String,
    pub time: String,
}
