#![allow(dead_code)]

use foodgram_db::table::User;
use foodgram_recipe::{IngredientAmount, RecipeInput, catalog::IngredientInput, catalog::TagInput};
use foodgram_shared::State;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};

pub const FLOUR: i64 = 1;
pub const MILK: i64 = 2;
pub const EGG: i64 = 3;
pub const BAKING: i64 = 1;

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    let state = State {
        read_db: pool.clone(),
        write_db: pool,
    };

    let catalog = foodgram_recipe::catalog::Command(state.clone());
    catalog
        .import_ingredients(
            [("Flour", "g"), ("Milk", "ml"), ("Egg", "pcs")]
                .into_iter()
                .map(|(name, unit)| IngredientInput {
                    name: name.to_owned(),
                    measurement_unit: unit.to_owned(),
                })
                .collect(),
        )
        .await?;
    catalog
        .import_tags(vec![TagInput {
            name: "Baking".to_owned(),
            slug: "baking".to_owned(),
        }])
        .await?;

    Ok(state)
}

pub async fn create_user(state: &State, username: &str) -> anyhow::Result<i64> {
    let (sql, values) = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::CreatedAt,
        ])
        .values_panic([
            format!("{username}@foodgram.test").into(),
            username.into(),
            "".into(),
            "".into(),
            0.into(),
        ])
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_with(&sql, values)
        .execute(&state.write_db)
        .await?
        .last_insert_rowid())
}

pub async fn create_recipe(
    state: &State,
    author_id: i64,
    name: &str,
    ingredients: &[(i64, u32)],
) -> anyhow::Result<i64> {
    let input = RecipeInput {
        name: name.to_owned(),
        text: "Bake it.".to_owned(),
        cooking_time: 30,
        ingredients: ingredients
            .iter()
            .map(|(id, amount)| IngredientAmount {
                id: *id,
                amount: *amount,
            })
            .collect(),
        tags: vec![BAKING],
    };

    Ok(foodgram_recipe::Command::new(state.clone())
        .create(author_id, input)
        .await?)
}
