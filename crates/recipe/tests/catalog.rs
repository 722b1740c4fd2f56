use foodgram_recipe::catalog::ImportReport;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_import_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let catalog = foodgram_recipe::catalog::Command(state.clone());
    let query = foodgram_recipe::query::Query(state.clone());

    let report = catalog
        .import_ingredients(vec![
            helpers::ingredient("Flour", "g"),
            helpers::ingredient("Flour", "kg"),
            helpers::ingredient("Sugar", "g"),
            helpers::ingredient("", "g"),
        ])
        .await?;

    assert_eq!(
        report,
        ImportReport {
            created: 2,
            existing: 1,
            skipped: 1,
        }
    );

    let names = query
        .ingredients(None)
        .await?
        .into_iter()
        .map(|i| format!("{} ({})", i.name, i.measurement_unit))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["Egg (pcs)", "Flour (g)", "Flour (kg)", "Milk (ml)", "Sugar (g)"]
    );

    Ok(())
}

#[tokio::test]
async fn test_ingredient_prefix_search() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let query = foodgram_recipe::query::Query(state.clone());

    let found = query.ingredients(Some("fl")).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Flour");

    assert!(query.ingredients(Some("lour")).await?.is_empty());
    assert!(query.ingredients(Some("%")).await?.is_empty());

    let flour = query.ingredient(found[0].id).await?.unwrap();
    assert_eq!(flour.measurement_unit, "g");
    assert!(query.ingredient(999).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_tags() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let catalog = foodgram_recipe::catalog::Command(state.clone());
    let query = foodgram_recipe::query::Query(state.clone());

    let report = catalog
        .import_tags(vec![
            foodgram_recipe::catalog::TagInput {
                name: "Lunch".to_owned(),
                slug: "lunch".to_owned(),
            },
            foodgram_recipe::catalog::TagInput {
                name: "Breakfast again".to_owned(),
                slug: "breakfast".to_owned(),
            },
            foodgram_recipe::catalog::TagInput {
                name: "Bad".to_owned(),
                slug: "bad slug".to_owned(),
            },
        ])
        .await?;
    assert_eq!(report.created, 1);
    assert_eq!(report.existing, 1);
    assert_eq!(report.skipped, 1);

    let tags = query.tags().await?;
    assert_eq!(
        tags.iter().map(|t| t.slug.as_str()).collect::<Vec<_>>(),
        vec!["breakfast", "dinner", "lunch"]
    );

    let breakfast = query.tag(tags[0].id).await?.unwrap();
    assert_eq!(breakfast.name, "Breakfast");

    Ok(())
}
