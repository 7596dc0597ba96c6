//! User repository for CRUD operations and match-candidate queries.
//!
//! Rows are decoded by hand rather than through the `query!` macros: the
//! macros need a live DATABASE_URL or an offline cache at compile time,
//! and this crate ships neither.

use crate::{DbError, Result as DbErrorResult};

use mp_core::{ErrorLocation, MatchCriteria, NewUser, User, UserPatch};

use std::panic::Location;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const USER_COLUMNS: &str = "id, name, age, gender, email, city, interests";

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new profile and return the stored record with its
    /// assigned id.
    pub async fn insert(&self, user: &NewUser) -> DbErrorResult<User> {
        let interests = encode_interests(&user.interests)?;

        let result = sqlx::query(
            r#"
                INSERT INTO users (name, age, gender, email, city, interests)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(user.age)
        .bind(&user.gender)
        .bind(&user.email)
        .bind(&user.city)
        .bind(&interests)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::DuplicateEmail {
                    email: user.email.clone(),
                    location: ErrorLocation::from(Location::caller()),
                }
            } else {
                DbError::from(e)
            }
        })?;

        let id = result.last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| DbError::Decode {
            message: format!("user {} vanished between insert and read-back", id),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Page through profiles in insertion (id) order.
    pub async fn find_page(&self, skip: i64, limit: i64) -> DbErrorResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY id LIMIT ? OFFSET ?",
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_user).collect()
    }

    /// Apply only the supplied patch fields, leaving the rest unchanged.
    /// Returns whether a row with `id` existed.
    pub async fn update_fields(&self, id: i64, patch: &UserPatch) -> DbErrorResult<bool> {
        let interests = patch
            .interests
            .as_deref()
            .map(encode_interests)
            .transpose()?;

        let result = sqlx::query(
            r#"
                UPDATE users
                SET name = COALESCE(?, name),
                    age = COALESCE(?, age),
                    gender = COALESCE(?, gender),
                    email = COALESCE(?, email),
                    city = COALESCE(?, city),
                    interests = COALESCE(?, interests)
                WHERE id = ?
            "#,
        )
        .bind(patch.name.as_deref())
        .bind(patch.age)
        .bind(patch.gender.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.city.as_deref())
        .bind(interests.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::DuplicateEmail {
                    email: patch.email.clone().unwrap_or_default(),
                    location: ErrorLocation::from(Location::caller()),
                }
            } else {
                DbError::from(e)
            }
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Hard delete. Returns whether a row with `id` existed.
    pub async fn delete(&self, id: i64) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Store-side half of the matcher: every profile other than the
    /// subject, in the subject's city, inside the inclusive age window,
    /// declaring the wanted gender (case-insensitive). The interest
    /// intersection is applied by the caller.
    pub async fn find_match_candidates(
        &self,
        criteria: &MatchCriteria,
    ) -> DbErrorResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            r#"
                SELECT {}
                FROM users
                WHERE id != ?
                  AND city = ?
                  AND age BETWEEN ? AND ?
                  AND LOWER(gender) = LOWER(?)
                ORDER BY id
            "#,
            USER_COLUMNS
        ))
        .bind(criteria.exclude_id)
        .bind(&criteria.city)
        .bind(criteria.min_age)
        .bind(criteria.max_age)
        .bind(&criteria.gender)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_user).collect()
    }
}

fn row_to_user(row: &SqliteRow) -> DbErrorResult<User> {
    let interests_json: String = row.try_get("interests")?;
    let interests = serde_json::from_str(&interests_json).map_err(|e| DbError::Decode {
        message: format!("Invalid JSON in users.interests: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        gender: row.try_get("gender")?,
        email: row.try_get("email")?,
        city: row.try_get("city")?,
        interests,
    })
}

fn encode_interests(interests: &[String]) -> DbErrorResult<String> {
    serde_json::to_string(interests).map_err(|e| DbError::Decode {
        message: format!("Failed to encode interests as JSON: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
