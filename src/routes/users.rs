use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use foodgram_shared::PageArgs;
use foodgram_user::query::UserView;
use serde::Deserialize;

use super::extract::{Json, Path, Query};
use crate::{
    auth::{AuthUser, MaybeAuthUser},
    error::{AppError, AppResult},
    routes::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<String>,
}

impl SubscriptionParams {
    /// Number of recipes shown per author. Values that are not a number
    /// fall back to `default`.
    fn recipes_limit(&self, default: u32) -> Option<u64> {
        match self.recipes_limit.as_deref() {
            None | Some("") => None,
            Some(value) => Some(value.parse().unwrap_or(u64::from(default))),
        }
    }
}

pub async fn list(
    State(app): State<AppState>,
    viewer: MaybeAuthUser,
    uri: Uri,
    Query(args): Query<PageArgs>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = app.page(args);
    let page = app.user_query.list(viewer.id(), limit, offset).await?;

    Ok(Json(app.paginate(&uri, args, page)))
}

pub async fn detail(
    State(app): State<AppState>,
    viewer: MaybeAuthUser,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    let user = app
        .user_query
        .find(id, viewer.id())
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok(Json(user))
}

pub async fn me(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(UserView {
        user,
        is_subscribed: false,
    })
}

pub async fn subscriptions(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    uri: Uri,
    Query(params): Query<SubscriptionParams>,
) -> AppResult<impl IntoResponse> {
    let args = PageArgs {
        page: params.page,
        limit: params.limit,
    };
    let (limit, offset) = app.page(args);
    let recipes_limit = params.recipes_limit(app.config.pagination.default_limit);

    let page = app
        .user_query
        .subscriptions(user.id, recipes_limit, limit, offset)
        .await?;

    Ok(Json(app.paginate(&uri, args, page)))
}

#[tracing::instrument(skip_all, fields(user = user.id, author = id))]
pub async fn subscribe(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id,)): Path<(i64,)>,
    Query(params): Query<SubscriptionParams>,
) -> AppResult<impl IntoResponse> {
    app.user_command.subscription.subscribe(user.id, id).await?;

    let author = app
        .user_query
        .subscription(
            user.id,
            id,
            params.recipes_limit(app.config.pagination.default_limit),
        )
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok((StatusCode::CREATED, Json(author)))
}

#[tracing::instrument(skip_all, fields(user = user.id, author = id))]
pub async fn unsubscribe(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path((id,)): Path<(i64,)>,
) -> AppResult<impl IntoResponse> {
    app.user_command.subscription.unsubscribe(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(recipes_limit: Option<&str>) -> SubscriptionParams {
        SubscriptionParams {
            recipes_limit: recipes_limit.map(str::to_owned),
            ..Default::default()
        }
    }

    #[test]
    fn test_recipes_limit_fallback() {
        assert_eq!(params(None).recipes_limit(6), None);
        assert_eq!(params(Some("")).recipes_limit(6), None);
        assert_eq!(params(Some("2")).recipes_limit(6), Some(2));
        assert_eq!(params(Some("many")).recipes_limit(6), Some(6));
        assert_eq!(params(Some("-1")).recipes_limit(6), Some(6));
    }
}
