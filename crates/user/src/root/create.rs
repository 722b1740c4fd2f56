use foodgram_db::table::User;
use foodgram_shared::is_unique_violation;
use regex::Regex;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

use crate::repository::{self, FindType};

static RE_USERNAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(
        length(min = 1, max = 150),
        regex(
            path = *RE_USERNAME,
            message = "Only letters, digits and . @ + - _ are allowed."
        )
    )]
    pub username: String,
    #[validate(length(max = 150))]
    #[serde(default)]
    pub first_name: String,
    #[validate(length(max = 150))]
    #[serde(default)]
    pub last_name: String,
}

impl super::Command {
    pub async fn create(&self, input: CreateUserInput) -> foodgram_shared::Result<i64> {
        input.validate()?;

        if repository::find(&self.read_db, FindType::Email(input.email.to_owned()))
            .await?
            .is_some()
        {
            foodgram_shared::bail!("email already exists");
        }

        if repository::find(&self.read_db, FindType::Username(input.username.to_owned()))
            .await?
            .is_some()
        {
            foodgram_shared::bail!("username already exists");
        }

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
                input.email.into(),
                input.username.into(),
                input.first_name.into(),
                input.last_name.into(),
                foodgram_shared::timestamp().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(result) => {
                let id = result.last_insert_rowid();
                tracing::info!(user_id = id, "user created");

                Ok(id)
            }
            Err(err) if is_unique_violation(&err) => {
                foodgram_shared::bail!("email or username already exists")
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(username: &str) -> CreateUserInput {
        CreateUserInput {
            email: "cook@foodgram.test".to_owned(),
            username: username.to_owned(),
            first_name: "Ann".to_owned(),
            last_name: "Cook".to_owned(),
        }
    }

    #[test]
    fn username_pattern() {
        assert!(input("ann.cook+1@home").validate().is_ok());
        assert!(input("шеф_повар").validate().is_ok());
        assert!(input("ann cook").validate().is_err());
        assert!(input("").validate().is_err());
    }

    #[test]
    fn email_must_be_valid() {
        let mut input = input("ann");
        input.email = "not-an-email".to_owned();
        assert!(input.validate().is_err());
    }
}
