use foodgram_user::FindType;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_create() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_user::Command::new(state.clone());

    let id = cmd.create(helpers::user_input("john")).await?;
    let user = cmd.load(id).await?.unwrap();
    assert_eq!(user.username, "john");
    assert_eq!(user.email, "john@foodgram.test");

    let found = cmd
        .find(FindType::Email("john@foodgram.test".to_owned()))
        .await?
        .unwrap();
    assert_eq!(found.id, id);

    let err = cmd.create(helpers::user_input("john")).await.unwrap_err();
    assert_eq!(err.to_string(), "email already exists");

    let mut input = helpers::user_input("john");
    input.email = "other@foodgram.test".to_owned();
    let err = cmd.create(input).await.unwrap_err();
    assert_eq!(err.to_string(), "username already exists");

    let err = cmd.create(helpers::user_input("bad name")).await.unwrap_err();
    assert!(matches!(err, foodgram_shared::Error::Validate(_)));

    Ok(())
}

#[tokio::test]
async fn test_list() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let query = foodgram_user::query::Query(state.clone());

    let john = cmd.create(helpers::user_input("john")).await?;
    let jane = cmd.create(helpers::user_input("jane")).await?;
    let bob = cmd.create(helpers::user_input("bob")).await?;

    cmd.subscription.subscribe(john, jane).await?;

    let page = query.list(Some(john), 2, 0).await?;
    assert_eq!(page.count, 3);
    assert_eq!(
        page.results
            .iter()
            .map(|u| (u.user.id, u.is_subscribed))
            .collect::<Vec<_>>(),
        vec![(john, false), (jane, true)]
    );

    let page = query.list(None, 2, 2).await?;
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].user.id, bob);

    let jane_view = query.find(jane, None).await?.unwrap();
    assert!(!jane_view.is_subscribed);
    assert!(query.find(999, None).await?.is_none());

    Ok(())
}
