#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use foodgram::{
    config::{Config, DatabaseConfig, JwtConfig, ObservabilityConfig, PaginationConfig, ServerConfig},
    routes::AppState,
};
use foodgram_recipe::catalog::{IngredientInput, TagInput};
use foodgram_user::CreateUserInput;
use http_body_util::BodyExt;
use serde_json::Value;
use temp_dir::TempDir;
use tower::ServiceExt;

pub const FLOUR: i64 = 1;
pub const MILK: i64 = 2;
pub const EGG: i64 = 3;
pub const BREAKFAST: i64 = 1;
pub const DINNER: i64 = 2;

pub struct TestApp {
    pub state: AppState,
    // Keeps the database directory alive for the duration of the test.
    _dir: TempDir,
}

pub fn test_config(url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            public_url: "http://foodgram.test".to_owned(),
        },
        database: DatabaseConfig {
            url,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            expiration_days: 1,
            issuer: "foodgram".to_owned(),
            audience: "foodgram-api".to_owned(),
        },
        observability: ObservabilityConfig::default(),
        pagination: PaginationConfig {
            default_limit: 6,
            max_limit: 50,
        },
    }
}

pub async fn setup() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}?mode=rwc", dir.child("db.sqlite3").display());
    let pool = foodgram::db::create_pool(&url, 1).await?;
    foodgram::db::migrate(&pool).await?;

    let shared = foodgram_shared::State {
        read_db: pool.clone(),
        write_db: pool,
    };

    let catalog = foodgram_recipe::catalog::Command(shared.clone());
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

    Ok(TestApp {
        state: AppState::new(test_config(url), shared),
        _dir: dir,
    })
}

fn ingredient(name: &str, unit: &str) -> IngredientInput {
    IngredientInput {
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

pub struct Response {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl Response {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

impl TestApp {
    pub fn router(&self) -> Router {
        foodgram::routes::router(self.state.clone())
    }

    /// Creates a user and returns its id along with a bearer token.
    pub async fn user(&self, username: &str) -> (i64, String) {
        let id = self
            .state
            .user_command
            .create(CreateUserInput {
                email: format!("{username}@foodgram.test"),
                username: username.to_owned(),
                first_name: username.to_owned(),
                last_name: "Test".to_owned(),
            })
            .await
            .unwrap();

        let token = foodgram::auth::generate_token(&self.state.config.jwt, id).unwrap();

        (id, token)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        Response {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::GET, uri, token, None).await
    }

    /// Creates a recipe through the API and returns its id.
    pub async fn recipe(&self, token: &str, name: &str, ingredients: &[(i64, u32)]) -> i64 {
        let body = serde_json::json!({
            "name": name,
            "text": format!("How to cook {name}"),
            "cooking_time": 20,
            "tags": [BREAKFAST],
            "ingredients": ingredients
                .iter()
                .map(|(id, amount)| serde_json::json!({"id": id, "amount": amount}))
                .collect::<Vec<_>>(),
        });

        let response = self
            .request(Method::POST, "/api/recipes", Some(token), Some(body))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        response.json()["id"].as_i64().unwrap()
    }
}
