use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use super::extract::{Json, Path};
use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    routes::AppState,
};

pub async fn add(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    app.cart_command.add(id, user.id).await?;

    let summary = app
        .recipe_query
        .summary(id)
        .await?
        .ok_or(AppError::NotFound("recipe"))?;

    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn remove(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    app.cart_command.remove(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/recipes/download_shopping_cart
#[tracing::instrument(skip_all, fields(user = user.id))]
pub async fn download(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<impl IntoResponse> {
    let text = app.shopping_query.shopping_list_text(user.id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.txt\"",
            ),
        ],
        text,
    ))
}
