//! Persistence for users and assessments, Postgres via sqlx.
//!
//! Assessments are append-only: there is no UPDATE or DELETE surface for
//! them, `created_at` always comes from the database clock, and every write
//! is a single independent INSERT so concurrent submissions never contend.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::account;
use crate::error::StoreError;
use crate::models::{Assessment, FeatureVector, Gender, User};

const SCHEMA_DDL: [&str; 4] = [
    "CREATE SCHEMA IF NOT EXISTS stresssense",
    r#"
    CREATE TABLE IF NOT EXISTS stresssense.users (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        credential_hash TEXT NOT NULL,
        profile_image BYTEA,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS stresssense.assessments (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES stresssense.users (id),
        age INTEGER NOT NULL,
        gender TEXT NOT NULL,
        sleep_hours DOUBLE PRECISION NOT NULL,
        exercise_frequency DOUBLE PRECISION NOT NULL,
        academic_pressure DOUBLE PRECISION NOT NULL,
        financial_pressure DOUBLE PRECISION NOT NULL,
        study_hours DOUBLE PRECISION NOT NULL,
        screen_time DOUBLE PRECISION NOT NULL,
        facial_image BYTEA,
        voice_sample BYTEA,
        stress_level INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS assessments_user_created_idx \
     ON stresssense.assessments (user_id, created_at)",
];

pub async fn init_db(pool: &PgPool) -> Result<(), StoreError> {
    for statement in SCHEMA_DDL {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

pub async fn seed(pool: &PgPool) -> Result<(), StoreError> {
    let users = [
        ("Avery Lee", "avery.lee@stresssense.dev", "Practice1!"),
        ("Jules Moreno", "jules.moreno@stresssense.dev", "Practice2!"),
    ];

    for (name, email, password) in users {
        sqlx::query(
            r#"
            INSERT INTO stresssense.users (id, name, email, credential_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
            SET name = EXCLUDED.name
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(account::hash_credential(password))
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    credential_hash: &str,
) -> Result<User, StoreError> {
    let row = sqlx::query(
        r#"
        INSERT INTO stresssense.users (id, name, email, credential_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, credential_hash, profile_image, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(credential_hash)
    .fetch_one(pool)
    .await?;

    Ok(user_from_row(&row))
}

pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<User, StoreError> {
    let row = sqlx::query(
        "SELECT id, name, email, credential_hash, profile_image, created_at \
         FROM stresssense.users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.map(|row| user_from_row(&row))
        .ok_or(StoreError::UserNotFound(user_id))
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<User, StoreError> {
    let row = sqlx::query(
        "SELECT id, name, email, credential_hash, profile_image, created_at \
         FROM stresssense.users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(|row| user_from_row(&row))
        .ok_or_else(|| StoreError::UserNotFoundByEmail(email.to_string()))
}

/// Update display name and, when provided, the profile image. The stored
/// image is kept when no replacement is supplied.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    profile_image: Option<&[u8]>,
) -> Result<User, StoreError> {
    let row = sqlx::query(
        r#"
        UPDATE stresssense.users
        SET name = $2, profile_image = COALESCE($3, profile_image)
        WHERE id = $1
        RETURNING id, name, email, credential_hash, profile_image, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(profile_image)
    .fetch_optional(pool)
    .await?;

    row.map(|row| user_from_row(&row))
        .ok_or(StoreError::UserNotFound(user_id))
}

/// Persist one scored assessment. The user reference is checked first so a
/// dangling id surfaces as `UserNotFound` rather than a constraint error;
/// the write itself is a single INSERT with `created_at` assigned by the
/// database, and the persisted record is returned as stored.
pub async fn insert_assessment(
    pool: &PgPool,
    user_id: Uuid,
    features: &FeatureVector,
    facial_image: Option<&[u8]>,
    voice_sample: Option<&[u8]>,
    stress_level: i32,
) -> Result<Assessment, StoreError> {
    let known = sqlx::query("SELECT 1 FROM stresssense.users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    if known.is_none() {
        return Err(StoreError::UserNotFound(user_id));
    }

    let id = Uuid::new_v4();
    let row = sqlx::query(
        r#"
        INSERT INTO stresssense.assessments
        (id, user_id, age, gender, sleep_hours, exercise_frequency,
         academic_pressure, financial_pressure, study_hours, screen_time,
         facial_image, voice_sample, stress_level)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(features.age)
    .bind(features.gender.as_str())
    .bind(features.sleep_hours)
    .bind(features.exercise_frequency)
    .bind(features.academic_pressure)
    .bind(features.financial_pressure)
    .bind(features.study_hours)
    .bind(features.screen_time)
    .bind(facial_image)
    .bind(voice_sample)
    .bind(stress_level)
    .fetch_one(pool)
    .await?;

    let assessment = Assessment {
        id,
        user_id,
        features: features.clone(),
        facial_image: facial_image.map(<[u8]>::to_vec),
        voice_sample: voice_sample.map(<[u8]>::to_vec),
        stress_level,
        created_at: row.get("created_at"),
    };
    tracing::debug!(
        assessment_id = %assessment.id,
        user_id = %assessment.user_id,
        "assessment persisted"
    );
    Ok(assessment)
}

/// All assessments for a user, oldest first. Returns a materialized
/// snapshot; re-query to restart.
pub async fn fetch_history(pool: &PgPool, user_id: Uuid) -> Result<Vec<Assessment>, StoreError> {
    let rows = sqlx::query(
        "SELECT id, user_id, age, gender, sleep_hours, exercise_frequency, \
         academic_pressure, financial_pressure, study_hours, screen_time, \
         facial_image, voice_sample, stress_level, created_at \
         FROM stresssense.assessments \
         WHERE user_id = $1 \
         ORDER BY created_at ASC, id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut assessments = Vec::with_capacity(rows.len());
    for row in rows {
        assessments.push(assessment_from_row(&row)?);
    }

    Ok(assessments)
}

pub async fn count_assessments(pool: &PgPool, user_id: Uuid) -> Result<i64, StoreError> {
    let row = sqlx::query("SELECT COUNT(*) AS total FROM stresssense.assessments WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(row.get("total"))
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        credential_hash: row.get("credential_hash"),
        profile_image: row.get("profile_image"),
        created_at: row.get("created_at"),
    }
}

fn assessment_from_row(row: &PgRow) -> Result<Assessment, StoreError> {
    let gender_text: String = row.get("gender");
    let gender = Gender::parse(&gender_text).ok_or(StoreError::InvalidGender(gender_text))?;

    Ok(Assessment {
        id: row.get("id"),
        user_id: row.get("user_id"),
        features: FeatureVector {
            age: row.get("age"),
            gender,
            sleep_hours: row.get("sleep_hours"),
            exercise_frequency: row.get("exercise_frequency"),
            academic_pressure: row.get("academic_pressure"),
            financial_pressure: row.get("financial_pressure"),
            study_hours: row.get("study_hours"),
            screen_time: row.get("screen_time"),
        },
        facial_image: row.get("facial_image"),
        voice_sample: row.get("voice_sample"),
        stress_level: row.get("stress_level"),
        created_at: row.get("created_at"),
    })
}
