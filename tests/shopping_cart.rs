use axum::http::{Method, StatusCode, header};

mod helpers;

use helpers::{EGG, FLOUR, MILK};

#[tokio::test]
async fn download_requires_authentication() -> anyhow::Result<()> {
    let app = helpers::setup().await?;

    let response = app.get("/api/recipes/download_shopping_cart", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn empty_cart_downloads_empty_list() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (_, token) = app.user("john").await;

    let response = app
        .get("/api/recipes/download_shopping_cart", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "");

    Ok(())
}

#[tokio::test]
async fn download_sums_ingredients_across_recipes() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (_, token) = app.user("john").await;
    let pancakes = app
        .recipe(&token, "Pancakes", &[(FLOUR, 200), (MILK, 100)])
        .await;
    let bread = app.recipe(&token, "Bread", &[(FLOUR, 300), (EGG, 3)]).await;

    for id in [pancakes, bread] {
        let response = app
            .request(
                Method::POST,
                &format!("/api/recipes/{id}/shopping_cart"),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.json()["id"], id);
    }

    let response = app
        .get("/api/recipes/download_shopping_cart", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        response.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"shopping_list.txt\""
    );
    assert_eq!(
        response.body,
        "Egg (pcs) — 3\nFlour (g) — 500\nMilk (ml) — 100"
    );

    let recipe = app
        .get(&format!("/api/recipes/{pancakes}"), Some(&token))
        .await
        .json();
    assert_eq!(recipe["is_in_shopping_cart"], true);

    Ok(())
}

#[tokio::test]
async fn removed_recipe_leaves_the_list() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (_, token) = app.user("john").await;
    let pancakes = app.recipe(&token, "Pancakes", &[(FLOUR, 200)]).await;
    let bread = app.recipe(&token, "Bread", &[(FLOUR, 300)]).await;
    let uri = |id: i64| format!("/api/recipes/{id}/shopping_cart");

    app.request(Method::POST, &uri(pancakes), Some(&token), None)
        .await;
    app.request(Method::POST, &uri(bread), Some(&token), None).await;

    let response = app
        .request(Method::DELETE, &uri(bread), Some(&token), None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .get("/api/recipes/download_shopping_cart", Some(&token))
        .await;
    assert_eq!(response.body, "Flour (g) — 200");

    Ok(())
}

#[tokio::test]
async fn cart_membership_is_a_set() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (_, token) = app.user("john").await;
    let id = app.recipe(&token, "Pancakes", &[(FLOUR, 200)]).await;
    let uri = format!("/api/recipes/{id}/shopping_cart");

    let response = app.request(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.request(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["detail"], "recipe is already in shopping cart");

    let list = app
        .get("/api/recipes/download_shopping_cart", Some(&token))
        .await;
    assert_eq!(list.body, "Flour (g) — 200");

    app.request(Method::DELETE, &uri, Some(&token), None).await;
    let response = app.request(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["detail"], "recipe is not in shopping cart");

    let response = app
        .request(
            Method::POST,
            "/api/recipes/999/shopping_cart",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    Ok(())
}
