//! User records and the admin user-management procedures.

use chrono::Utc;
use common::Role;

use crate::models::UserRow;
use crate::{new_id, Db, DbError};

pub async fn insert_user(
    db: &Db,
    email: &str,
    name: &str,
    password_hash: &str,
    role: Role,
) -> Result<UserRow, DbError> {
    let now = Utc::now();
    let row = sqlx::query_as::<_, UserRow>(
        r#"INSERT INTO users (id,email,name,password_hash,role,created_at,updated_at)
           VALUES (?,?,?,?,?,?,?)
           RETURNING id,email,name,password_hash,role,created_at,updated_at"#,
    )
    .bind(new_id())
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(now)
    .bind(now)
    .fetch_one(&db.0)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DbError::Conflict("email already registered");
            }
        }
        DbError::Sqlx(e)
    })?;
    Ok(row)
}

pub async fn find_user_by_email(db: &Db, email: &str) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(&db.0)
        .await?;
    Ok(row)
}

pub async fn get_user(db: &Db, id: &str) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&db.0)
        .await?;
    Ok(row)
}

pub async fn list_users(db: &Db) -> Result<Vec<UserRow>, DbError> {
    let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(&db.0)
        .await?;
    Ok(rows)
}

pub async fn update_user(
    db: &Db,
    id: &str,
    name: &str,
    role: Role,
) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"UPDATE users SET name = ?, role = ?, updated_at = ?
           WHERE id = ?
           RETURNING id,email,name,password_hash,role,created_at,updated_at"#,
    )
    .bind(name)
    .bind(role.as_str())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(&db.0)
    .await?;
    Ok(row)
}

/// Removes the user row and revokes every refresh token in one transaction,
/// so the account and its sessions go together.
pub async fn delete_user(db: &Db, id: &str) -> Result<(), DbError> {
    let mut tx = db.0.begin().await?;
    let res = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if res.rows_affected() == 0 {
        return Err(DbError::NotFound("user"));
    }
    sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE user_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn count_users(db: &Db) -> Result<i64, DbError> {
    let n: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&db.0)
        .await?;
    Ok(n.0)
}
