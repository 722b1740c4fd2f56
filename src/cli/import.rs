use std::path::Path;

use anyhow::{Context, Result};
use foodgram::config::Config;
use foodgram_recipe::catalog::{self, ImportReport};
use serde::de::DeserializeOwned;

/// Reads a JSON array, dropping the entries that do not have the expected
/// shape. Returns the entries along with the number dropped.
fn read_entries<T: DeserializeOwned>(path: &Path) -> Result<(Vec<T>, u64)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let values: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;

    let mut entries = Vec::with_capacity(values.len());
    let mut malformed = 0;

    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                tracing::warn!(index, "skipping malformed entry: {err}");
                malformed += 1;
            }
        }
    }

    Ok((entries, malformed))
}

async fn command(config: &Config) -> Result<catalog::Command> {
    let pool = foodgram::db::create_pool(&config.database.url, 1).await?;

    Ok(catalog::Command(foodgram_shared::State {
        read_db: pool.clone(),
        write_db: pool,
    }))
}

fn log_report(kind: &str, report: &ImportReport) {
    tracing::info!(
        created = report.created,
        existing = report.existing,
        skipped = report.skipped,
        "{kind} imported"
    );
}

#[tracing::instrument(skip(config))]
pub async fn ingredients(config: &Config, path: &Path) -> Result<()> {
    let (entries, malformed) = read_entries(path)?;
    let command = command(config).await?;
    let mut report = command.import_ingredients(entries).await?;
    report.skipped += malformed;

    log_report("ingredients", &report);
    command.0.write_db.close().await;

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn tags(config: &Config, path: &Path) -> Result<()> {
    let (entries, malformed) = read_entries(path)?;
    let command = command(config).await?;
    let mut report = command.import_tags(entries).await?;
    report.skipped += malformed;

    log_report("tags", &report);
    command.0.write_db.close().await;

    Ok(())
}
