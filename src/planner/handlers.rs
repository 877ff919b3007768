use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{CreateTempMealRequest, DishSearch, DishSearchResponse, TempMealDetail},
    repo,
};
use crate::{
    auth::jwt::AuthUser,
    catalog::services::resolve_portions,
    errors::{ApiError, ApiResult},
    nutrition::{
        match_meals_by_dishes,
        matcher::{clean_tokens, split_dish_list},
        MatchMode,
    },
    state::AppState,
};

pub fn planner_routes() -> Router<AppState> {
    Router::new()
        .route("/aimeals", get(search_fuzzy).post(search_exact))
        .route("/temp-meals", post(create_temp_meal))
        .route("/temp-meals/:id", get(get_temp_meal).delete(delete_temp_meal))
}

async fn search(state: &AppState, raw: &str, mode: MatchMode) -> ApiResult<DishSearchResponse> {
    let tokens = clean_tokens(&split_dish_list(raw));
    if tokens.is_empty() {
        return Ok(DishSearchResponse::new(mode, Vec::new()));
    }
    let candidates = repo::candidate_records(&state.db, &tokens).await?;
    let results = match_meals_by_dishes(&candidates, &tokens, mode);
    info!(?mode, tokens = tokens.len(), found = results.len(), "dish-set search");
    Ok(DishSearchResponse::new(mode, results))
}

#[instrument(skip(state))]
pub async fn search_fuzzy(
    State(state): State<AppState>,
    Query(q): Query<DishSearch>,
) -> ApiResult<Json<DishSearchResponse>> {
    Ok(Json(search(&state, &q.dishes, MatchMode::Fuzzy).await?))
}

#[instrument(skip(state))]
pub async fn search_exact(
    State(state): State<AppState>,
    Form(f): Form<DishSearch>,
) -> ApiResult<Json<DishSearchResponse>> {
    Ok(Json(search(&state, &f.dishes, MatchMode::Exact).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_temp_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTempMealRequest>,
) -> ApiResult<(StatusCode, Json<TempMealDetail>)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::invalid_input("Temp meal name is required"));
    }
    let portions = resolve_portions(&state.db, &payload.items).await?;

    let meal = repo::create(&state.db, name, user_id, &portions).await?;
    let record = repo::items_of(&state.db, meal.id).await?;
    info!(%user_id, temp_meal_id = %meal.id, items = portions.len(), "temp meal created");
    Ok((StatusCode::CREATED, Json(TempMealDetail::new(meal, record))))
}

#[instrument(skip(state))]
pub async fn get_temp_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TempMealDetail>> {
    let meal = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Temp meal"))?;
    let record = repo::items_of(&state.db, id).await?;
    Ok(Json(TempMealDetail::new(meal, record)))
}

#[instrument(skip(state))]
pub async fn delete_temp_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let meal = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Temp meal"))?;
    if meal.created_by != Some(user_id) {
        warn!(%user_id, temp_meal_id = %id, "delete by non-owner");
        return Err(ApiError::Forbidden("Only the creator can discard this temp meal".into()));
    }
    repo::delete(&state.db, id).await?;
    info!(%user_id, temp_meal_id = %id, "temp meal discarded");
    Ok(StatusCode::NO_CONTENT)
}
