use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateMealRequest, Pagination, SummaryQuery, SummaryResponse},
    repo,
    repo_types::{DayCount, Meal},
    services::prepare_meal,
};
use crate::{
    auth::jwt::AuthUser,
    dates::parse_date_range,
    errors::{ApiError, ApiResult},
    nutrition::{select_in_range, summarize_meals},
    state::AppState,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/summary", get(meal_summary))
        .route("/meals/per-day", get(meals_per_day))
        .route("/meals/:id", get(get_meal))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> ApiResult<Json<Vec<Meal>>> {
    let (limit, offset) = p.clamped();
    let meals = repo::list_by_user(&state.db, user_id, limit, offset).await?;
    Ok(Json(meals))
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateMealRequest>,
) -> ApiResult<(StatusCode, Json<Meal>)> {
    let new = prepare_meal(&state.db, user_id, payload).await?;
    let meal = repo::insert(&state.db, &new).await?;
    info!(%user_id, meal_id = %meal.id, "meal logged");
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Meal>> {
    let meal = repo::find_for_user(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Meal"))?;
    Ok(Json(meal))
}

#[instrument(skip(state))]
pub async fn meal_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<SummaryQuery>,
) -> ApiResult<Json<SummaryResponse>> {
    let (start, end) = parse_date_range(q.start.as_deref(), q.end.as_deref())?;

    let meals = select_in_range(
        repo::list_in_range(&state.db, user_id, start, end).await?,
        start,
        end,
        |m: &Meal| m.eaten_on,
    );
    let summary = summarize_meals(meals.iter().map(Meal::as_record));
    info!(%user_id, count = summary.count, "meal summary");
    Ok(Json(SummaryResponse::new(start, end, summary)))
}

#[instrument(skip(state))]
pub async fn meals_per_day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<DayCount>>> {
    Ok(Json(repo::count_per_day(&state.db, user_id).await?))
}
