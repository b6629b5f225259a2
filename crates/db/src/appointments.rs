//! Appointment lifecycle operations.
//!
//! Booking, cancel, and reschedule each run in one transaction: the slot
//! conflict check and the write commit together, so two clients racing for
//! the same slot cannot both succeed.

use chrono::Utc;
use common::AppointmentStatus;
use sqlx::SqliteConnection;

use crate::models::AppointmentRow;
use crate::{new_id, Db, DbError};

#[derive(Debug, Clone)]
pub struct BookAppointment {
    pub user_id: String,
    pub pet_id: Option<String>,
    pub pet_name: String,
    pub service: String,
    pub date_time: String,
    pub amount: i64,
}

/// The slot-uniqueness key is (pet_name, service, date_time); a slot is
/// taken while a matching non-cancelled appointment exists.
async fn slot_taken(
    conn: &mut SqliteConnection,
    pet_name: &str,
    service: &str,
    date_time: &str,
) -> Result<bool, DbError> {
    let hit: Option<(String,)> = sqlx::query_as(
        r#"SELECT id FROM appointments
           WHERE pet_name = ? AND service = ? AND date_time = ? AND status != 'Cancelled'
           LIMIT 1"#,
    )
    .bind(pet_name)
    .bind(service)
    .bind(date_time)
    .fetch_optional(conn)
    .await?;
    Ok(hit.is_some())
}

pub async fn book_appointment(db: &Db, req: &BookAppointment) -> Result<AppointmentRow, DbError> {
    let mut tx = db.0.begin().await?;
    if slot_taken(&mut *tx, &req.pet_name, &req.service, &req.date_time).await? {
        return Err(DbError::Conflict("slot already booked"));
    }
    let row = sqlx::query_as::<_, AppointmentRow>(
        r#"INSERT INTO appointments
             (id,user_id,pet_id,pet_name,service,date_time,status,amount,created_at)
           VALUES (?,?,?,?,?,?,?,?,?)
           RETURNING *"#,
    )
    .bind(new_id())
    .bind(&req.user_id)
    .bind(&req.pet_id)
    .bind(&req.pet_name)
    .bind(&req.service)
    .bind(&req.date_time)
    .bind(AppointmentStatus::PendingPayment.as_str())
    .bind(req.amount)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(row)
}

pub async fn get_appointment(db: &Db, id: &str) -> Result<Option<AppointmentRow>, DbError> {
    let row = sqlx::query_as::<_, AppointmentRow>("SELECT * FROM appointments WHERE id = ?")
        .bind(id)
        .fetch_optional(&db.0)
        .await?;
    Ok(row)
}

pub async fn list_appointments(
    db: &Db,
    owner: Option<&str>,
) -> Result<Vec<AppointmentRow>, DbError> {
    let rows = if let Some(user_id) = owner {
        sqlx::query_as::<_, AppointmentRow>(
            "SELECT * FROM appointments WHERE user_id = ? ORDER BY date_time DESC",
        )
        .bind(user_id)
        .fetch_all(&db.0)
        .await?
    } else {
        sqlx::query_as::<_, AppointmentRow>("SELECT * FROM appointments ORDER BY date_time DESC")
            .fetch_all(&db.0)
            .await?
    };
    Ok(rows)
}

fn parse_status(row: &AppointmentRow) -> Result<AppointmentStatus, DbError> {
    AppointmentStatus::parse(&row.status).ok_or(DbError::Corrupted("unknown appointment status"))
}

/// Staff status transition, guarded by the current state.
pub async fn update_status(
    db: &Db,
    id: &str,
    next: AppointmentStatus,
    staff_id: &str,
) -> Result<AppointmentRow, DbError> {
    let mut tx = db.0.begin().await?;
    let row = sqlx::query_as::<_, AppointmentRow>("SELECT * FROM appointments WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound("appointment"))?;
    let current = parse_status(&row)?;
    if !current.can_transition_to(next) {
        return Err(DbError::Conflict("invalid status transition"));
    }
    let row = sqlx::query_as::<_, AppointmentRow>(
        "UPDATE appointments SET status = ?, staff_id = ? WHERE id = ? RETURNING *",
    )
    .bind(next.as_str())
    .bind(staff_id)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(row)
}

/// Client-side cancel: refused once staff has confirmed; otherwise removes
/// the appointment and every payment referencing it together.
pub async fn client_cancel(db: &Db, id: &str, requester: Option<&str>) -> Result<(), DbError> {
    let mut tx = db.0.begin().await?;
    let row = sqlx::query_as::<_, AppointmentRow>("SELECT * FROM appointments WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound("appointment"))?;
    if let Some(user_id) = requester {
        if row.user_id != user_id {
            return Err(DbError::Forbidden("not your appointment"));
        }
    }
    if !parse_status(&row)?.client_can_cancel() {
        return Err(DbError::Conflict(
            "cannot cancel a confirmed or completed appointment",
        ));
    }
    sqlx::query("DELETE FROM appointments WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM payments WHERE appointment_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

/// In-place reschedule. Re-checks the target slot under the same
/// transaction as the update; the old slot is never lost partway.
pub async fn reschedule(
    db: &Db,
    id: &str,
    requester: Option<&str>,
    new_date_time: &str,
) -> Result<AppointmentRow, DbError> {
    let mut tx = db.0.begin().await?;
    let row = sqlx::query_as::<_, AppointmentRow>("SELECT * FROM appointments WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound("appointment"))?;
    if let Some(user_id) = requester {
        if row.user_id != user_id {
            return Err(DbError::Forbidden("not your appointment"));
        }
    }
    if !parse_status(&row)?.client_can_cancel() {
        return Err(DbError::Conflict(
            "cannot reschedule a confirmed or completed appointment",
        ));
    }
    if slot_taken(&mut *tx, &row.pet_name, &row.service, new_date_time).await? {
        return Err(DbError::Conflict("slot already booked"));
    }
    let row = sqlx::query_as::<_, AppointmentRow>(
        "UPDATE appointments SET date_time = ? WHERE id = ? RETURNING *",
    )
    .bind(new_date_time)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(row)
}

pub async fn count_appointments(db: &Db) -> Result<i64, DbError> {
    let n: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM appointments")
        .fetch_one(&db.0)
        .await?;
    Ok(n.0)
}
