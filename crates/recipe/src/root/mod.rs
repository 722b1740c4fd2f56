mod create;
mod delete;
mod update;

use std::{borrow::Cow, collections::HashSet, ops::Deref};

use foodgram_db::table::{Ingredient, IngredientRecipe, Recipe as RecipeTable, RecipeTag, Tag};
use foodgram_shared::{MAX_AMOUNT, MAX_COOKING_TIME, MIN_AMOUNT, MIN_COOKING_TIME};
use sea_query::{Expr, ExprTrait, Func, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, prelude::FromRow};
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Clone)]
pub struct Command {
    state: foodgram_shared::State,
    pub favorite: crate::favorite::Command,
}

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub cooking_time: u32,
    pub short_code: Option<String>,
    pub pub_date: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct IngredientAmount {
    pub id: i64,
    #[validate(range(min = MIN_AMOUNT, max = MAX_AMOUNT))]
    pub amount: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(min = MIN_COOKING_TIME, max = MAX_COOKING_TIME))]
    pub cooking_time: u32,
    #[validate(length(min = 1), nested)]
    pub ingredients: Vec<IngredientAmount>,
    #[validate(length(min = 1), custom(function = "validate_unique_tags"))]
    pub tags: Vec<i64>,
}

fn validate_unique_tags(tags: &[i64]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if tags.iter().all(|t| seen.insert(*t)) {
        return Ok(());
    }

    Err(ValidationError::new("duplicate").with_message(Cow::Borrowed("tags must be unique")))
}

impl RecipeInput {
    /// Runs field validation, then rejects duplicate ingredient ids.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        self.validate()?;

        let mut seen = HashSet::new();
        if self.ingredients.iter().all(|i| seen.insert(i.id)) {
            return Ok(());
        }

        let mut errors = ValidationErrors::new();
        errors.add(
            "ingredients",
            ValidationError::new("duplicate")
                .with_message(Cow::Borrowed("ingredients must be unique")),
        );

        Err(errors)
    }
}

impl Command {
    pub fn new(state: foodgram_shared::State) -> Self {
        Self {
            favorite: crate::favorite::Command(state.clone()),
            state,
        }
    }

    pub async fn load(&self, id: i64) -> anyhow::Result<Option<Recipe>> {
        load(&self.read_db, Expr::col(RecipeTable::Id).eq(id)).await
    }

    pub async fn find_by_short_code(&self, code: &str) -> anyhow::Result<Option<Recipe>> {
        load(&self.read_db, Expr::col(RecipeTable::ShortCode).eq(code)).await
    }

    /// Returns the recipe's short code, assigning one if it has none yet.
    pub async fn short_code(&self, id: i64) -> foodgram_shared::Result<String> {
        if let Some(code) = self.load(id).await?.and_then(|r| r.short_code) {
            return Ok(code);
        }

        let mut tx = self.write_db.begin().await?;
        let code = crate::short_code::assign(&mut tx, id).await?;
        tx.commit().await?;

        Ok(code)
    }
}

pub async fn exists(pool: &sqlx::SqlitePool, id: i64) -> anyhow::Result<bool> {
    let (sql, values) = Query::select()
        .column(RecipeTable::Id)
        .from(RecipeTable::Table)
        .and_where(Expr::col(RecipeTable::Id).eq(id))
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .is_some())
}

async fn load(pool: &sqlx::SqlitePool, condition: Expr) -> anyhow::Result<Option<Recipe>> {
    let (sql, values) = Query::select()
        .columns([
            RecipeTable::Id,
            RecipeTable::AuthorId,
            RecipeTable::Name,
            RecipeTable::Text,
            RecipeTable::CookingTime,
            RecipeTable::ShortCode,
            RecipeTable::PubDate,
        ])
        .from(RecipeTable::Table)
        .and_where(condition)
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, Recipe, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

/// Rejects inputs referencing ingredients or tags that do not exist.
async fn check_references(
    conn: &mut SqliteConnection,
    input: &RecipeInput,
) -> foodgram_shared::Result<()> {
    let mut errors = ValidationErrors::new();

    let ingredient_ids = input.ingredients.iter().map(|i| i.id).collect::<Vec<_>>();
    let (sql, values) = Query::select()
        .expr(Func::count(Expr::col(Ingredient::Id)))
        .from(Ingredient::Table)
        .and_where(Expr::col(Ingredient::Id).is_in(ingredient_ids.clone()))
        .build_sqlx(SqliteQueryBuilder);
    let (found,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(&mut *conn)
        .await?;

    if found as usize != ingredient_ids.len() {
        errors.add(
            "ingredients",
            ValidationError::new("unknown").with_message(Cow::Borrowed("unknown ingredient")),
        );
    }

    let (sql, values) = Query::select()
        .expr(Func::count(Expr::col(Tag::Id)))
        .from(Tag::Table)
        .and_where(Expr::col(Tag::Id).is_in(input.tags.clone()))
        .build_sqlx(SqliteQueryBuilder);
    let (found,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(&mut *conn)
        .await?;

    if found as usize != input.tags.len() {
        errors.add(
            "tags",
            ValidationError::new("unknown").with_message(Cow::Borrowed("unknown tag")),
        );
    }

    if !errors.is_empty() {
        return Err(errors.into());
    }

    Ok(())
}

/// Writes tag links and ingredient rows for the recipe.
async fn insert_links(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    input: &RecipeInput,
) -> foodgram_shared::Result<()> {
    let mut statement = Query::insert()
        .into_table(RecipeTag::Table)
        .columns([RecipeTag::RecipeId, RecipeTag::TagId])
        .to_owned();

    for tag_id in input.tags.iter() {
        statement.values_panic([recipe_id.into(), (*tag_id).into()]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let mut statement = Query::insert()
        .into_table(IngredientRecipe::Table)
        .columns([
            IngredientRecipe::RecipeId,
            IngredientRecipe::IngredientId,
            IngredientRecipe::Amount,
        ])
        .to_owned();

    for ingredient in input.ingredients.iter() {
        statement.values_panic([
            recipe_id.into(),
            ingredient.id.into(),
            ingredient.amount.into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

async fn delete_links(conn: &mut SqliteConnection, recipe_id: i64) -> foodgram_shared::Result<()> {
    let (sql, values) = Query::delete()
        .from_table(RecipeTag::Table)
        .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let (sql, values) = Query::delete()
        .from_table(IngredientRecipe::Table)
        .and_where(Expr::col(IngredientRecipe::RecipeId).eq(recipe_id))
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RecipeInput {
        RecipeInput {
            name: "Pancakes".to_owned(),
            text: "Mix and fry.".to_owned(),
            cooking_time: 20,
            ingredients: vec![
                IngredientAmount { id: 1, amount: 200 },
                IngredientAmount { id: 2, amount: 2 },
            ],
            tags: vec![1],
        }
    }

    #[test]
    fn accepts_valid_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_ingredients() {
        let mut input = input();
        input.ingredients[1].id = 1;
        assert!(input.validate().is_ok());

        let errors = input.check().unwrap_err();
        assert!(errors.field_errors().contains_key("ingredients"));
    }

    #[test]
    fn rejects_duplicate_tags() {
        let mut input = input();
        input.tags = vec![3, 3];
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("tags"));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut input = input();
        input.cooking_time = 0;
        input.ingredients[0].amount = MAX_AMOUNT + 1;
        assert!(input.validate().is_err());
    }

    #[test]
    fn rejects_empty_collections() {
        let mut input = input();
        input.ingredients.clear();
        input.tags.clear();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("ingredients"));
        assert!(fields.contains_key("tags"));
    }
}
