//! Payment submission and approval.
//!
//! Submission runs in one SQLite transaction that loads the
//! appointment, writes the payment, and mirrors the status, so no
//! payment can exist without its appointment.

use chrono::Utc;
use common::{AppointmentStatus, PaymentStatus};

use crate::models::PaymentRow;
use crate::{new_id, Db, DbError};

pub async fn submit_payment(
    db: &Db,
    appointment_id: &str,
    user_id: &str,
    reference_number: &str,
) -> Result<PaymentRow, DbError> {
    let mut tx = db.0.begin().await?;
    let appt: Option<(String, String, i64)> =
        sqlx::query_as("SELECT pet_name, service, amount FROM appointments WHERE id = ?")
            .bind(appointment_id)
            .fetch_optional(&mut *tx)
            .await?;
    let (pet_name, service, amount) = appt.ok_or(DbError::NotFound("appointment"))?;

    let row = sqlx::query_as::<_, PaymentRow>(
        r#"INSERT INTO payments
             (id,appointment_id,user_id,pet_name,service,amount,method,
              reference_number,payment_type,status,created_at)
           VALUES (?,?,?,?,?,?,'GCash',?,'Reservation Payment',?,?)
           RETURNING *"#,
    )
    .bind(new_id())
    .bind(appointment_id)
    .bind(user_id)
    .bind(&pet_name)
    .bind(&service)
    .bind(amount)
    .bind(reference_number)
    .bind(PaymentStatus::PendingApproval.as_str())
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE appointments SET status = ?, payment_status = ? WHERE id = ?")
        .bind(AppointmentStatus::PendingApproval.as_str())
        .bind(PaymentStatus::PendingApproval.as_str())
        .bind(appointment_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(row)
}

/// Admin approval: the payment and the appointment's payment_status mirror
/// both become `paid`. The appointment status is deliberately untouched;
/// confirmation stays a separate staff action.
pub async fn approve_payment(db: &Db, payment_id: &str) -> Result<PaymentRow, DbError> {
    let mut tx = db.0.begin().await?;
    let row = sqlx::query_as::<_, PaymentRow>(
        "UPDATE payments SET status = ? WHERE id = ? RETURNING *",
    )
    .bind(PaymentStatus::Paid.as_str())
    .bind(payment_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(DbError::NotFound("payment"))?;
    sqlx::query("UPDATE appointments SET payment_status = ? WHERE id = ?")
        .bind(PaymentStatus::Paid.as_str())
        .bind(&row.appointment_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(row)
}

pub async fn list_payments(db: &Db, status: Option<&str>) -> Result<Vec<PaymentRow>, DbError> {
    let rows = if let Some(status) = status {
        sqlx::query_as::<_, PaymentRow>(
            "SELECT * FROM payments WHERE status = ? ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&db.0)
        .await?
    } else {
        sqlx::query_as::<_, PaymentRow>("SELECT * FROM payments ORDER BY created_at DESC")
            .fetch_all(&db.0)
            .await?
    };
    Ok(rows)
}

pub async fn payments_for_appointment(
    db: &Db,
    appointment_id: &str,
) -> Result<Vec<PaymentRow>, DbError> {
    let rows =
        sqlx::query_as::<_, PaymentRow>("SELECT * FROM payments WHERE appointment_id = ?")
            .bind(appointment_id)
            .fetch_all(&db.0)
            .await?;
    Ok(rows)
}

pub async fn count_payments(db: &Db) -> Result<i64, DbError> {
    let n: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM payments")
        .fetch_one(&db.0)
        .await?;
    Ok(n.0)
}
