use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    nutrition::{daily_target, DailyTarget},
};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub net_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<String>,
    /// Absent until sex, age, height, weight and goal are all known.
    pub daily_target: Option<DailyTarget>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for ProfileResponse {
    fn from(u: User) -> Self {
        let daily_target = daily_target(&u.biometrics());
        Self {
            id: u.id,
            net_id: u.net_id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            sex: u.sex,
            age: u.age,
            height_cm: u.height_cm,
            weight_kg: u.weight_kg,
            goal: u.goal,
            daily_target,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub sex: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<String>,
}
