//! Admin-defined schedule slots. These open extra booking days beyond the
//! Wednesday default and override the default times for their date.

use common::slots::AdminSlot;

use crate::models::ScheduleRow;
use crate::{new_id, Db, DbError};

pub async fn insert_schedule(db: &Db, date: &str, time: &str) -> Result<ScheduleRow, DbError> {
    let row = sqlx::query_as::<_, ScheduleRow>(
        r#"INSERT INTO schedules (id,date,time,is_booked,client_id)
           VALUES (?,?,?,0,NULL)
           RETURNING *"#,
    )
    .bind(new_id())
    .bind(date)
    .bind(time)
    .fetch_one(&db.0)
    .await?;
    Ok(row)
}

pub async fn list_schedules(db: &Db) -> Result<Vec<ScheduleRow>, DbError> {
    let rows = sqlx::query_as::<_, ScheduleRow>("SELECT * FROM schedules ORDER BY date, time")
        .fetch_all(&db.0)
        .await?;
    Ok(rows)
}

/// The schedule rows in the shape the slot-candidacy algorithm consumes.
pub async fn admin_slots(db: &Db) -> Result<Vec<AdminSlot>, DbError> {
    let rows = list_schedules(db).await?;
    Ok(rows
        .into_iter()
        .map(|r| AdminSlot {
            date: r.date,
            time: r.time,
        })
        .collect())
}
