use temp_dir::TempDir;

mod helpers;

use helpers::{EGG, FLOUR, MILK};

#[tokio::test]
async fn test_empty_cart() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let query = foodgram_shopping::query::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    assert!(query.shopping_list(john).await?.is_empty());
    assert_eq!(query.shopping_list_text(john).await?, "");

    Ok(())
}

#[tokio::test]
async fn test_sums_across_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cart = foodgram_shopping::Command(state.clone());
    let query = foodgram_shopping::query::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    let bread = helpers::create_recipe(&state, john, "Bread", &[(FLOUR, 200)]).await?;
    let cake =
        helpers::create_recipe(&state, john, "Cake", &[(FLOUR, 300), (EGG, 3), (MILK, 100)])
            .await?;

    cart.add(bread, john).await?;
    cart.add(cake, john).await?;

    assert_eq!(
        query.shopping_list_text(john).await?,
        "Egg (pcs) — 3\nFlour (g) — 500\nMilk (ml) — 100"
    );

    cart.remove(cake, john).await?;
    assert_eq!(query.shopping_list_text(john).await?, "Flour (g) — 200");

    Ok(())
}

#[tokio::test]
async fn test_carts_are_per_user() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cart = foodgram_shopping::Command(state.clone());
    let query = foodgram_shopping::query::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    let bread = helpers::create_recipe(&state, john, "Bread", &[(FLOUR, 200)]).await?;
    cart.add(bread, john).await?;
    cart.add(bread, jane).await?;

    let items = query.shopping_list(jane).await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].total, 200);

    cart.remove(bread, john).await?;
    assert_eq!(query.shopping_list_text(john).await?, "");
    assert_eq!(query.shopping_list_text(jane).await?, "Flour (g) — 200");

    Ok(())
}
