use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use foodgram_recipe::{RecipeInput, query::RecipesQuery};
use foodgram_shared::PageArgs;
use serde::Deserialize;

use super::extract::{Json, Path, Query};
use crate::{
    auth::{AuthUser, MaybeAuthUser},
    error::{AppError, AppResult},
    routes::AppState,
};

/// Query string of `GET /api/recipes`. `tags` may repeat.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `1` keeps the caller's favorites, any other number excludes them.
    pub is_favorited: Option<u8>,
    pub is_in_shopping_cart: Option<u8>,
}

pub async fn list(
    State(app): State<AppState>,
    viewer: MaybeAuthUser,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let args = PageArgs {
        page: params.page,
        limit: params.limit,
    };
    let (limit, offset) = app.page(args);

    let page = app
        .recipe_query
        .filter(RecipesQuery {
            viewer: viewer.id(),
            author: params.author,
            tags: params.tags,
            is_favorited: params.is_favorited.map(|flag| flag == 1),
            is_in_shopping_cart: params.is_in_shopping_cart.map(|flag| flag == 1),
            limit,
            offset,
        })
        .await?;

    Ok(Json(app.paginate(&uri, args, page)))
}

pub async fn detail(
    State(app): State<AppState>,
    viewer: MaybeAuthUser,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    let recipe = app
        .recipe_query
        .find(id, viewer.id())
        .await?
        .ok_or(AppError::NotFound("recipe"))?;

    Ok(Json(recipe))
}

#[tracing::instrument(skip_all, fields(user = user.id))]
pub async fn create(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<RecipeInput>,
) -> AppResult<impl IntoResponse> {
    let id = app.recipe_command.create(user.id, input).await?;

    let recipe = app
        .recipe_query
        .find(id, Some(user.id))
        .await?
        .ok_or(AppError::NotFound("recipe"))?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

#[tracing::instrument(skip_all, fields(user = user.id, recipe = id))]
pub async fn update(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id,)): Path<(i64,)>,
    Json(input): Json<RecipeInput>,
) -> AppResult<impl IntoResponse> {
    app.recipe_command.update(id, user.id, input).await?;

    let recipe = app
        .recipe_query
        .find(id, Some(user.id))
        .await?
        .ok_or(AppError::NotFound("recipe"))?;

    Ok(Json(recipe))
}

#[tracing::instrument(skip_all, fields(user = user.id, recipe = id))]
pub async fn delete(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    app.recipe_command.delete(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
