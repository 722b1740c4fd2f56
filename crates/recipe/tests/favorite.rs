use temp_dir::TempDir;

mod helpers;

use helpers::{BREAKFAST, EGG};

#[tokio::test]
async fn test_save_and_unsave() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_recipe::Command::new(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    let id = cmd
        .create(john, helpers::recipe_input("Eggs", &[BREAKFAST], &[(EGG, 2)]))
        .await?;

    cmd.favorite.save(id, jane).await?;
    assert!(cmd.favorite.is_saved(id, jane).await?);
    assert!(!cmd.favorite.is_saved(id, john).await?);

    let err = cmd.favorite.save(id, jane).await.unwrap_err();
    assert_eq!(err.to_string(), "recipe is already in favorites");

    cmd.favorite.unsave(id, jane).await?;
    assert!(!cmd.favorite.is_saved(id, jane).await?);

    let err = cmd.favorite.unsave(id, jane).await.unwrap_err();
    assert_eq!(err.to_string(), "recipe is not in favorites");

    Ok(())
}

#[tokio::test]
async fn test_save_unknown_recipe() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_recipe::Command::new(state.clone());
    let jane = helpers::create_user(&state, "jane").await?;

    let err = cmd.favorite.save(42, jane).await.unwrap_err();
    assert!(matches!(err, foodgram_shared::Error::NotFound("recipe")));

    let err = cmd.favorite.unsave(42, jane).await.unwrap_err();
    assert!(matches!(err, foodgram_shared::Error::NotFound("recipe")));

    Ok(())
}
