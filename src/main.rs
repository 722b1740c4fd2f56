use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// foodgram - share recipes and build shopping lists
#[derive(Parser)]
#[command(name = "foodgram")]
#[command(about = "Recipe sharing backend", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Load ingredients from a JSON file of `{name, measurement_unit}` objects
    ImportIngredients { file: PathBuf },
    /// Load tags from a JSON file of `{name, slug}` objects
    ImportTags { file: PathBuf },
    /// Manage users
    #[command(subcommand)]
    User(UserCommands),
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a user and print its id
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Print a bearer token for a user
    Token {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = foodgram::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    foodgram::observability::init_observability(
        "foodgram",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::migrate::migrate(&config).await,
        Commands::Reset => cli::migrate::reset(&config).await,
        Commands::ImportIngredients { file } => cli::import::ingredients(&config, &file).await,
        Commands::ImportTags { file } => cli::import::tags(&config, &file).await,
        Commands::User(UserCommands::Create {
            email,
            username,
            first_name,
            last_name,
        }) => {
            let input = foodgram_user::CreateUserInput {
                email,
                username,
                first_name,
                last_name,
            };
            cli::user::create(&config, input).await
        }
        Commands::User(UserCommands::Token { email }) => cli::user::token(&config, email).await,
    }
}
