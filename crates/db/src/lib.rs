//! SQLite persistence for the clinic portal.
//!
//! One module per collection. Multi-step lifecycle operations (payment
//! submission, client cancel, reschedule) run as single transactions so a
//! failure partway never leaves an orphaned row.

pub mod appointments;
pub mod models;
pub mod payments;
pub mod pets;
pub mod refresh;
pub mod schedules;
pub mod users;

pub use appointments::{
    book_appointment, client_cancel, count_appointments, get_appointment, list_appointments,
    reschedule, update_status, BookAppointment,
};
pub use models::{
    AppointmentRow, MedicalRecord, PaymentRow, PetRow, RefreshRow, ScheduleRow, UserRow,
    Vaccination,
};
pub use payments::{
    approve_payment, count_payments, list_payments, payments_for_appointment, submit_payment,
};
pub use pets::{
    add_medical_note, add_vaccination, count_pets, delete_pet, get_pet, insert_pet, list_pets,
    list_pets_by_owner, update_pet, NewPet,
};
pub use refresh::{get_refresh_by_jti, insert_refresh, revoke_refresh};
pub use schedules::{admin_slots, insert_schedule, list_schedules};
pub use users::{
    count_users, delete_user, find_user_by_email, get_user, insert_user, list_users, update_user,
};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Db(pub SqlitePool);

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("corrupted row: {0}")]
    Corrupted(&'static str),
}

/// Connect to SQLite. Use `sqlite::memory:` with `max = 1` for tests; a
/// shared in-memory database only exists on a single connection.
pub async fn connect(database_url: &str, max: u32) -> Result<Db, DbError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(sqlx::Error::from)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max)
        .connect_with(options)
        .await?;
    tracing::info!(url = database_url, "connected to database");
    Ok(Db(pool))
}

pub async fn migrate(db: &Db) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(&db.0).await?;
    Ok(())
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
