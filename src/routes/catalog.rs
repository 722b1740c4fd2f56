use axum::{extract::State, response::IntoResponse};
use serde::Deserialize;

use super::extract::{Json, Path, Query};
use crate::{
    error::{AppError, AppResult},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct IngredientParams {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

pub async fn ingredients(
    State(app): State<AppState>,
    Query(params): Query<IngredientParams>,
) -> AppResult<impl IntoResponse> {
    let prefix = params.name.as_deref().filter(|name| !name.is_empty());

    Ok(Json(app.recipe_query.ingredients(prefix).await?))
}

pub async fn ingredient(
    State(app): State<AppState>,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    let ingredient = app
        .recipe_query
        .ingredient(id)
        .await?
        .ok_or(AppError::NotFound("ingredient"))?;

    Ok(Json(ingredient))
}

pub async fn tags(State(app): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(app.recipe_query.tags().await?))
}

pub async fn tag(
    State(app): State<AppState>,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    let tag = app
        .recipe_query
        .tag(id)
        .await?
        .ok_or(AppError::NotFound("tag"))?;

    Ok(Json(tag))
}
