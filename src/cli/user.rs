use anyhow::Result;
use foodgram::config::Config;
use foodgram_user::{CreateUserInput, FindType};

async fn command(config: &Config) -> Result<foodgram_user::Command> {
    let pool = foodgram::db::create_pool(&config.database.url, 1).await?;

    Ok(foodgram_user::Command::new(foodgram_shared::State {
        read_db: pool.clone(),
        write_db: pool,
    }))
}

#[tracing::instrument(skip(config, input), fields(email = %input.email))]
pub async fn create(config: &Config, input: CreateUserInput) -> Result<()> {
    let command = command(config).await?;
    let id = command.create(input).await?;

    println!("{id}");

    Ok(())
}

/// Prints a bearer token for the user with `email`.
#[tracing::instrument(skip(config))]
pub async fn token(config: &Config, email: String) -> Result<()> {
    let command = command(config).await?;

    let Some(user) = command.find(FindType::Email(email.to_owned())).await? else {
        tracing::error!("user {email} not found");
        return Ok(());
    };

    println!("{}", foodgram::auth::generate_token(&config.jwt, user.id)?);

    Ok(())
}
