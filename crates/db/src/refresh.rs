//! Refresh-token records for rotation and revocation.

use chrono::{DateTime, Utc};

use crate::models::RefreshRow;
use crate::{Db, DbError};

pub async fn insert_refresh(
    db: &Db,
    user_id: &str,
    jti: &str,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), DbError> {
    sqlx::query(
        r#"INSERT INTO refresh_tokens (user_id, jti, token_hash, expires_at, revoked, created_at)
           VALUES (?, ?, ?, ?, 0, ?)"#,
    )
    .bind(user_id)
    .bind(jti)
    .bind(token_hash)
    .bind(expires_at)
    .bind(Utc::now())
    .execute(&db.0)
    .await?;
    Ok(())
}

pub async fn get_refresh_by_jti(db: &Db, jti: &str) -> Result<Option<RefreshRow>, DbError> {
    let row = sqlx::query_as::<_, RefreshRow>("SELECT * FROM refresh_tokens WHERE jti = ?")
        .bind(jti)
        .fetch_optional(&db.0)
        .await?;
    Ok(row)
}

pub async fn revoke_refresh(db: &Db, jti: &str) -> Result<u64, DbError> {
    let res = sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE jti = ?")
        .bind(jti)
        .execute(&db.0)
        .await?;
    Ok(res.rows_affected())
}

