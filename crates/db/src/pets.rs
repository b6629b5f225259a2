//! Pet records. Medical notes and vaccinations are append-only lists the
//! vet dashboard writes to; clients own everything else.

use chrono::Utc;
use sqlx::types::Json;

use crate::models::{MedicalRecord, PetRow, Vaccination};
use crate::{new_id, Db, DbError};

#[derive(Debug, Clone)]
pub struct NewPet {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_years: i64,
    pub age_months: i64,
    pub gender: String,
}

pub async fn insert_pet(db: &Db, owner_id: &str, pet: &NewPet) -> Result<PetRow, DbError> {
    let row = sqlx::query_as::<_, PetRow>(
        r#"INSERT INTO pets
             (id,owner_id,name,species,breed,age_years,age_months,gender,
              medical_history,vaccinations,created_at)
           VALUES (?,?,?,?,?,?,?,?,'[]','[]',?)
           RETURNING *"#,
    )
    .bind(new_id())
    .bind(owner_id)
    .bind(&pet.name)
    .bind(&pet.species)
    .bind(&pet.breed)
    .bind(pet.age_years)
    .bind(pet.age_months)
    .bind(&pet.gender)
    .bind(Utc::now())
    .fetch_one(&db.0)
    .await?;
    Ok(row)
}

pub async fn get_pet(db: &Db, id: &str) -> Result<Option<PetRow>, DbError> {
    let row = sqlx::query_as::<_, PetRow>("SELECT * FROM pets WHERE id = ?")
        .bind(id)
        .fetch_optional(&db.0)
        .await?;
    Ok(row)
}

pub async fn list_pets_by_owner(db: &Db, owner_id: &str) -> Result<Vec<PetRow>, DbError> {
    let rows =
        sqlx::query_as::<_, PetRow>("SELECT * FROM pets WHERE owner_id = ? ORDER BY created_at")
            .bind(owner_id)
            .fetch_all(&db.0)
            .await?;
    Ok(rows)
}

pub async fn list_pets(db: &Db) -> Result<Vec<PetRow>, DbError> {
    let rows = sqlx::query_as::<_, PetRow>("SELECT * FROM pets ORDER BY created_at DESC")
        .fetch_all(&db.0)
        .await?;
    Ok(rows)
}

pub async fn update_pet(db: &Db, id: &str, pet: &NewPet) -> Result<Option<PetRow>, DbError> {
    let row = sqlx::query_as::<_, PetRow>(
        r#"UPDATE pets
           SET name = ?, species = ?, breed = ?, age_years = ?, age_months = ?, gender = ?
           WHERE id = ?
           RETURNING *"#,
    )
    .bind(&pet.name)
    .bind(&pet.species)
    .bind(&pet.breed)
    .bind(pet.age_years)
    .bind(pet.age_months)
    .bind(&pet.gender)
    .bind(id)
    .fetch_optional(&db.0)
    .await?;
    Ok(row)
}

pub async fn delete_pet(db: &Db, id: &str) -> Result<u64, DbError> {
    let res = sqlx::query("DELETE FROM pets WHERE id = ?")
        .bind(id)
        .execute(&db.0)
        .await?;
    Ok(res.rows_affected())
}

pub async fn add_medical_note(
    db: &Db,
    pet_id: &str,
    note: &str,
    date: &str,
) -> Result<PetRow, DbError> {
    let mut tx = db.0.begin().await?;
    let pet = sqlx::query_as::<_, PetRow>("SELECT * FROM pets WHERE id = ?")
        .bind(pet_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound("pet"))?;
    let mut history = pet.medical_history.0.clone();
    history.push(MedicalRecord {
        note: note.into(),
        date: date.into(),
    });
    let row = sqlx::query_as::<_, PetRow>(
        "UPDATE pets SET medical_history = ? WHERE id = ? RETURNING *",
    )
    .bind(Json(history))
    .bind(pet_id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(row)
}

pub async fn add_vaccination(
    db: &Db,
    pet_id: &str,
    vaccine: &str,
    date: &str,
) -> Result<PetRow, DbError> {
    let mut tx = db.0.begin().await?;
    let pet = sqlx::query_as::<_, PetRow>("SELECT * FROM pets WHERE id = ?")
        .bind(pet_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound("pet"))?;
    let mut vaccinations = pet.vaccinations.0.clone();
    vaccinations.push(Vaccination {
        vaccine: vaccine.into(),
        date: date.into(),
    });
    let row =
        sqlx::query_as::<_, PetRow>("UPDATE pets SET vaccinations = ? WHERE id = ? RETURNING *")
            .bind(Json(vaccinations))
            .bind(pet_id)
            .fetch_one(&mut *tx)
            .await?;
    tx.commit().await?;
    Ok(row)
}

pub async fn count_pets(db: &Db) -> Result<i64, DbError> {
    let n: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pets")
        .fetch_one(&db.0)
        .await?;
    Ok(n.0)
}
