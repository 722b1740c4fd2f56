#![allow(dead_code)]

use foodgram_db::table::User;
use foodgram_recipe::{
    IngredientAmount, RecipeInput,
    catalog::{IngredientInput, TagInput},
};
use foodgram_shared::State;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};

pub const FLOUR: i64 = 1;
pub const MILK: i64 = 2;
pub const EGG: i64 = 3;
pub const BREAKFAST: i64 = 1;
pub const DINNER: i64 = 2;

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

    seed_catalog(&state).await?;

    Ok(state)
}

async fn seed_catalog(state: &State) -> anyhow::Result<()> {
    let catalog = foodgram_recipe::catalog::Command(state.clone());
    catalog
        .import_ingredients(vec![
            ingredient("Flour", "g"),
            ingredient("Milk", "ml"),
            ingredient("Egg", "pcs"),
        ])
        .await?;
    catalog
        .import_tags(vec![
            TagInput {
                name: "Breakfast".to_owned(),
                slug: "breakfast".to_owned(),
            },
            TagInput {
                name: "Dinner".to_owned(),
                slug: "dinner".to_owned(),
            },
        ])
        .await?;

    Ok(())
}

pub fn ingredient(name: &str, unit: &str) -> IngredientInput {
    IngredientInput {
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
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

pub fn recipe_input(name: &str, tags: &[i64], ingredients: &[(i64, u32)]) -> RecipeInput {
    RecipeInput {
        name: name.to_owned(),
        text: format!("How to cook {name}."),
        cooking_time: 15,
        ingredients: ingredients
            .iter()
            .map(|(id, amount)| IngredientAmount {
                id: *id,
                amount: *amount,
            })
            .collect(),
        tags: tags.to_vec(),
    }
}
