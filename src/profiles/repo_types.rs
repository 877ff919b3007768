use serde::Serialize;
use sqlx::FromRow;

use crate::nutrition::{Goal, Sex};

/// Public profile card; no credentials or biometrics.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileCard {
    pub net_id: String,
    pub first_name: String,
    pub last_name: String,
    pub goal: Option<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub sex: Option<Sex>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<Goal>,
}
