#![allow(dead_code)]

use foodgram_recipe::{IngredientAmount, RecipeInput, catalog::IngredientInput, catalog::TagInput};
use foodgram_shared::State;
use foodgram_user::CreateUserInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};

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
        .import_ingredients(vec![IngredientInput {
            name: "Rice".to_owned(),
            measurement_unit: "g".to_owned(),
        }])
        .await?;
    catalog
        .import_tags(vec![TagInput {
            name: "Lunch".to_owned(),
            slug: "lunch".to_owned(),
        }])
        .await?;

    Ok(state)
}

pub fn user_input(username: &str) -> CreateUserInput {
    CreateUserInput {
        email: format!("{username}@foodgram.test"),
        username: username.to_owned(),
        first_name: "First".to_owned(),
        last_name: "Last".to_owned(),
    }
}

pub async fn create_recipe(state: &State, author_id: i64, name: &str) -> anyhow::Result<i64> {
    let input = RecipeInput {
        name: name.to_owned(),
        text: "Boil.".to_owned(),
        cooking_time: 10,
        ingredients: vec![IngredientAmount { id: 1, amount: 100 }],
        tags: vec![1],
    };

    Ok(foodgram_recipe::Command::new(state.clone())
        .create(author_id, input)
        .await?)
}
