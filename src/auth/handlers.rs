use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest},
        jwt::JwtKeys,
        repo_types::{NewUser, User},
        services::{
            hash_password, is_valid_email, is_valid_net_id, issue_tokens, normalize,
            verify_password, MIN_PASSWORD_LEN,
        },
    },
    errors::{ApiError, ApiResult},
    profiles::services::{parse_goal, parse_sex, validate_biometrics},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let net_id = normalize(&payload.net_id);
    let email = normalize(&payload.email);

    if !is_valid_net_id(&net_id) {
        warn!(%net_id, "invalid net id");
        return Err(ApiError::invalid_input("Invalid netID"));
    }
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(ApiError::invalid_input("Invalid email"));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(ApiError::invalid_input("Password too short"));
    }
    let sex = parse_sex(payload.sex.as_deref())?;
    let goal = parse_goal(payload.goal.as_deref())?;
    validate_biometrics(payload.age, payload.height_cm, payload.weight_kg)?;

    if User::find_by_net_id(&state.db, &net_id).await?.is_some() {
        warn!(%net_id, "net id already registered");
        return Err(ApiError::conflict("netID already registered"));
    }
    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::conflict("Email already registered"));
    }

    let new_user = NewUser {
        net_id,
        email,
        password_hash: hash_password(&payload.password)?,
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        sex,
        age: payload.age,
        height_cm: payload.height_cm,
        weight_kg: payload.weight_kg,
        goal,
    };
    let user = User::create(&state.db, &new_user)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, "netID or email already registered"))?;

    info!(user_id = %user.id, net_id = %user.net_id, "user registered");
    let keys = JwtKeys::from_ref(&state);
    Ok(Json(issue_tokens(&keys, user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let net_id = normalize(&payload.net_id);
    if net_id.is_empty() || payload.password.is_empty() {
        return Err(ApiError::invalid_input("netID and password are required"));
    }

    let Some(user) = User::find_by_net_id(&state.db, &net_id).await? else {
        warn!(%net_id, "login unknown net id");
        return Err(ApiError::unauthenticated("Invalid credentials"));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(%net_id, user_id = %user.id, "login invalid password");
        return Err(ApiError::unauthenticated("Invalid credentials"));
    }

    info!(user_id = %user.id, "user logged in");
    let keys = JwtKeys::from_ref(&state);
    Ok(Json(issue_tokens(&keys, user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        ApiError::unauthenticated("Invalid refresh token")
    })?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("User not found"))?;

    Ok(Json(issue_tokens(&keys, user)?))
}
