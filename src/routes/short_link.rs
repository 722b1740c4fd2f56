use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use super::extract::{Json, Path};
use crate::{
    error::{AppError, AppResult},
    routes::AppState,
};

/// GET /api/recipes/{id}/get-link
pub async fn get_link(
    State(app): State<AppState>,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    let recipe = app
        .recipe_command
        .load(id)
        .await?
        .ok_or(AppError::NotFound("recipe"))?;

    let code = match recipe.short_code {
        Some(code) => code,
        None => app.recipe_command.short_code(recipe.id).await?,
    };

    Ok(Json(json!({
        "short-link": app.config.server.public_link(&format!("/s/{code}")),
    })))
}

/// GET /s/{code}
pub async fn redirect(
    State(app): State<AppState>,
    Path((code,)): Path<(String,)>,
) -> AppResult<impl IntoResponse> {
    let recipe = app
        .recipe_command
        .find_by_short_code(&code)
        .await?
        .ok_or(AppError::NotFound("recipe"))?;

    let location = app
        .config
        .server
        .public_link(&format!("/recipes/{}/", recipe.id));

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
