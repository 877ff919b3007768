use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::{Biometrics, Goal, Sex};

/// User profile record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub net_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub first_name: String,
    pub last_name: String,
    pub sex: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Fields written at registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub net_id: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: Option<Sex>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<Goal>,
}

impl User {
    /// Stored enum columns that no longer parse are treated as absent.
    pub fn biometrics(&self) -> Biometrics {
        Biometrics {
            sex: self.sex.as_deref().and_then(|s| s.parse().ok()),
            age: self.age,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            goal: self.goal.as_deref().and_then(|g| g.parse().ok()),
        }
    }
}
