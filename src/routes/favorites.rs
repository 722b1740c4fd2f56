use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use super::extract::{Json, Path};
use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    routes::AppState,
};

pub async fn save(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    app.recipe_command.favorite.save(id, user.id).await?;

    let summary = app
        .recipe_query
        .summary(id)
        .await?
        .ok_or(AppError::NotFound("recipe"))?;

    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn unsave(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    app.recipe_command.favorite.unsave(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
