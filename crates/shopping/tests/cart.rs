use temp_dir::TempDir;

mod helpers;

use helpers::{FLOUR, MILK};

#[tokio::test]
async fn test_add_and_remove() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cart = foodgram_shopping::Command(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let recipe = helpers::create_recipe(&state, john, "Bread", &[(FLOUR, 500)]).await?;

    cart.add(recipe, john).await?;
    assert!(cart.contains(recipe, john).await?);

    let err = cart.add(recipe, john).await.unwrap_err();
    assert_eq!(err.to_string(), "recipe is already in shopping cart");

    cart.remove(recipe, john).await?;
    assert!(!cart.contains(recipe, john).await?);

    let err = cart.remove(recipe, john).await.unwrap_err();
    assert_eq!(err.to_string(), "recipe is not in shopping cart");

    Ok(())
}

#[tokio::test]
async fn test_unknown_recipe() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cart = foodgram_shopping::Command(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    let err = cart.add(7, john).await.unwrap_err();
    assert!(matches!(err, foodgram_shared::Error::NotFound("recipe")));

    Ok(())
}

#[tokio::test]
async fn test_recipe_deletion_empties_cart() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cart = foodgram_shopping::Command(state.clone());
    let query = foodgram_shopping::query::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let recipe = helpers::create_recipe(&state, john, "Latte", &[(MILK, 250)]).await?;

    cart.add(recipe, john).await?;
    foodgram_recipe::Command::new(state.clone())
        .delete(recipe, john)
        .await?;

    assert!(!cart.contains(recipe, john).await?);
    assert_eq!(query.shopping_list_text(john).await?, "");

    Ok(())
}
