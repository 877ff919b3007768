use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument};

use super::{
    dto::{ProfileResponse, UpdateProfileRequest},
    repo,
    repo_types::{ProfileCard, ProfileUpdate},
    services::{parse_goal, parse_sex, validate_biometrics},
};
use crate::{
    auth::{jwt::AuthUser, repo_types::User},
    errors::{ApiError, ApiResult},
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route("/profiles", get(list_profiles))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let user = User::find_by_id(&state.db, user_id).await?.ok_or_else(|| {
        error!(%user_id, "token subject has no user row");
        ApiError::unauthenticated("User not found")
    })?;
    Ok(Json(ProfileResponse::from(user)))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let update = ProfileUpdate {
        first_name: payload.first_name.map(|s| s.trim().to_string()),
        last_name: payload.last_name.map(|s| s.trim().to_string()),
        sex: parse_sex(payload.sex.as_deref())?,
        age: payload.age,
        height_cm: payload.height_cm,
        weight_kg: payload.weight_kg,
        goal: parse_goal(payload.goal.as_deref())?,
    };
    validate_biometrics(update.age, update.height_cm, update.weight_kg)?;

    let user = repo::update_profile(&state.db, user_id, &update)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("User not found"))?;
    info!(%user_id, "profile updated");
    Ok(Json(ProfileResponse::from(user)))
}

#[instrument(skip(state))]
pub async fn list_profiles(State(state): State<AppState>) -> ApiResult<Json<Vec<ProfileCard>>> {
    Ok(Json(repo::list_profile_cards(&state.db).await?))
}
