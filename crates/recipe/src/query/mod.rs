mod detail;
mod ingredient;
mod list;
mod tag;

pub use list::RecipesQuery;

use std::{
    collections::{HashMap, HashSet},
    ops::Deref,
};

use foodgram_db::table::{
    Favorite, Ingredient, IngredientRecipe, RecipeTag, ShoppingCart, Subscription, Tag, User,
};
use sea_query::{Expr, ExprTrait, JoinType, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Clone)]
pub struct Query(pub foodgram_shared::State);

impl Deref for Query {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TagRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeIngredientRow {
    #[serde(skip)]
    pub recipe_id: i64,
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuthorRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(skip)]
    pub is_subscribed: bool,
}

/// Short form of a recipe used by membership endpoints and subscriptions.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub cooking_time: u32,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub cooking_time: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub id: i64,
    pub tags: Vec<TagRow>,
    pub author: AuthorRow,
    pub ingredients: Vec<RecipeIngredientRow>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub text: String,
    pub cooking_time: u32,
}

#[derive(FromRow)]
struct RecipeTagRow {
    recipe_id: i64,
    id: i64,
    name: String,
    slug: String,
}

/// Attaches tags, ingredients, author and viewer flags to recipe rows,
/// keeping the row order.
pub(crate) async fn hydrate(
    pool: &SqlitePool,
    rows: Vec<RecipeRow>,
    viewer: Option<i64>,
) -> anyhow::Result<Vec<RecipeView>> {
    if rows.is_empty() {
        return Ok(vec![]);
    }

    let ids = rows.iter().map(|r| r.id).collect::<Vec<_>>();
    let author_ids = rows
        .iter()
        .map(|r| r.author_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    let (sql, values) = sea_query::Query::select()
        .column((RecipeTag::Table, RecipeTag::RecipeId))
        .columns([(Tag::Table, Tag::Id), (Tag::Table, Tag::Name), (Tag::Table, Tag::Slug)])
        .from(RecipeTag::Table)
        .join(
            JoinType::InnerJoin,
            Tag::Table,
            Expr::col((RecipeTag::Table, RecipeTag::TagId)).equals((Tag::Table, Tag::Id)),
        )
        .and_where(Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).is_in(ids.clone()))
        .order_by((Tag::Table, Tag::Id), Order::Asc)
        .build_sqlx(SqliteQueryBuilder);

    let mut tags = HashMap::<i64, Vec<TagRow>>::new();
    for row in sqlx::query_as_with::<_, RecipeTagRow, _>(&sql, values)
        .fetch_all(pool)
        .await?
    {
        tags.entry(row.recipe_id).or_default().push(TagRow {
            id: row.id,
            name: row.name,
            slug: row.slug,
        });
    }

    let (sql, values) = sea_query::Query::select()
        .column((IngredientRecipe::Table, IngredientRecipe::RecipeId))
        .columns([
            (Ingredient::Table, Ingredient::Id),
            (Ingredient::Table, Ingredient::Name),
            (Ingredient::Table, Ingredient::MeasurementUnit),
        ])
        .column((IngredientRecipe::Table, IngredientRecipe::Amount))
        .from(IngredientRecipe::Table)
        .join(
            JoinType::InnerJoin,
            Ingredient::Table,
            Expr::col((IngredientRecipe::Table, IngredientRecipe::IngredientId))
                .equals((Ingredient::Table, Ingredient::Id)),
        )
        .and_where(
            Expr::col((IngredientRecipe::Table, IngredientRecipe::RecipeId)).is_in(ids.clone()),
        )
        .order_by((IngredientRecipe::Table, IngredientRecipe::Id), Order::Asc)
        .build_sqlx(SqliteQueryBuilder);

    let mut ingredients = HashMap::<i64, Vec<RecipeIngredientRow>>::new();
    for row in sqlx::query_as_with::<_, RecipeIngredientRow, _>(&sql, values)
        .fetch_all(pool)
        .await?
    {
        ingredients.entry(row.recipe_id).or_default().push(row);
    }

    let (sql, values) = sea_query::Query::select()
        .columns([
            User::Id,
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
        ])
        .from(User::Table)
        .and_where(Expr::col(User::Id).is_in(author_ids.clone()))
        .build_sqlx(SqliteQueryBuilder);

    let mut authors = sqlx::query_as_with::<_, AuthorRow, _>(&sql, values)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect::<HashMap<_, _>>();

    let mut favorited = HashSet::new();
    let mut in_cart = HashSet::new();

    if let Some(viewer) = viewer {
        let (sql, values) = sea_query::Query::select()
            .column(Subscription::AuthorId)
            .from(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(viewer))
            .and_where(Expr::col(Subscription::AuthorId).is_in(author_ids))
            .build_sqlx(SqliteQueryBuilder);

        for (author_id,) in sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_all(pool)
            .await?
        {
            if let Some(author) = authors.get_mut(&author_id) {
                author.is_subscribed = true;
            }
        }

        let (sql, values) = sea_query::Query::select()
            .column(Favorite::RecipeId)
            .from(Favorite::Table)
            .and_where(Expr::col(Favorite::UserId).eq(viewer))
            .and_where(Expr::col(Favorite::RecipeId).is_in(ids.clone()))
            .build_sqlx(SqliteQueryBuilder);

        favorited.extend(
            sqlx::query_as_with::<_, (i64,), _>(&sql, values)
                .fetch_all(pool)
                .await?
                .into_iter()
                .map(|(id,)| id),
        );

        let (sql, values) = sea_query::Query::select()
            .column(ShoppingCart::RecipeId)
            .from(ShoppingCart::Table)
            .and_where(Expr::col(ShoppingCart::UserId).eq(viewer))
            .and_where(Expr::col(ShoppingCart::RecipeId).is_in(ids))
            .build_sqlx(SqliteQueryBuilder);

        in_cart.extend(
            sqlx::query_as_with::<_, (i64,), _>(&sql, values)
                .fetch_all(pool)
                .await?
                .into_iter()
                .map(|(id,)| id),
        );
    }

    rows.into_iter()
        .map(|row| {
            let author = authors.get(&row.author_id).cloned().ok_or_else(|| {
                anyhow::anyhow!("author {} of recipe {} missing", row.author_id, row.id)
            })?;

            Ok(RecipeView {
                tags: tags.remove(&row.id).unwrap_or_default(),
                ingredients: ingredients.remove(&row.id).unwrap_or_default(),
                is_favorited: favorited.contains(&row.id),
                is_in_shopping_cart: in_cart.contains(&row.id),
                author,
                id: row.id,
                name: row.name,
                text: row.text,
                cooking_time: row.cooking_time,
            })
        })
        .collect()
}
