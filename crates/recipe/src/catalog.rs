//! Ingredient and tag catalog loading.

use std::{borrow::Cow, ops::Deref};

use foodgram_db::table::{Ingredient, Tag};
use sea_query::{OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub measurement_unit: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    #[validate(length(min = 1, max = 32), custom(function = "validate_slug"))]
    pub slug: String,
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Ok(());
    }

    Err(ValidationError::new("slug").with_message(Cow::Borrowed(
        "slug may only contain letters, digits, hyphens and underscores",
    )))
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: u64,
    pub existing: u64,
    pub skipped: u64,
}

#[derive(Clone)]
pub struct Command(pub foodgram_shared::State);

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    /// Inserts ingredients missing from the catalog. Invalid entries are
    /// skipped and existing ones are kept as they are.
    pub async fn import_ingredients(
        &self,
        items: Vec<IngredientInput>,
    ) -> foodgram_shared::Result<ImportReport> {
        let mut report = ImportReport::default();
        let mut tx = self.write_db.begin().await?;

        for item in items {
            if let Err(err) = item.validate() {
                tracing::warn!(name = %item.name, "skipping ingredient: {err}");
                report.skipped += 1;
                continue;
            }

            let (sql, values) = Query::insert()
                .into_table(Ingredient::Table)
                .columns([Ingredient::Name, Ingredient::MeasurementUnit])
                .values_panic([item.name.into(), item.measurement_unit.into()])
                .on_conflict(
                    OnConflict::columns([Ingredient::Name, Ingredient::MeasurementUnit])
                        .do_nothing()
                        .to_owned(),
                )
                .build_sqlx(SqliteQueryBuilder);

            match sqlx::query_with(&sql, values)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            {
                0 => report.existing += 1,
                _ => report.created += 1,
            }
        }

        tx.commit().await?;

        Ok(report)
    }

    /// Inserts tags whose slug is not taken yet.
    pub async fn import_tags(&self, items: Vec<TagInput>) -> foodgram_shared::Result<ImportReport> {
        let mut report = ImportReport::default();
        let mut tx = self.write_db.begin().await?;

        for item in items {
            if let Err(err) = item.validate() {
                tracing::warn!(slug = %item.slug, "skipping tag: {err}");
                report.skipped += 1;
                continue;
            }

            let (sql, values) = Query::insert()
                .into_table(Tag::Table)
                .columns([Tag::Name, Tag::Slug])
                .values_panic([item.name.into(), item.slug.into()])
                .on_conflict(OnConflict::column(Tag::Slug).do_nothing().to_owned())
                .build_sqlx(SqliteQueryBuilder);

            match sqlx::query_with(&sql, values)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            {
                0 => report.existing += 1,
                _ => report.created += 1,
            }
        }

        tx.commit().await?;

        Ok(report)
    }
}
