use foodgram_db::table::Recipe;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::RecipeInput;

impl super::Command {
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, author_id: i64, input: RecipeInput) -> foodgram_shared::Result<i64> {
        input.check()?;

        let mut tx = self.write_db.begin().await?;
        super::check_references(&mut tx, &input).await?;

        let (sql, values) = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Text,
                Recipe::CookingTime,
                Recipe::PubDate,
            ])
            .values_panic([
                author_id.into(),
                input.name.to_owned().into(),
                input.text.to_owned().into(),
                input.cooking_time.into(),
                foodgram_shared::timestamp().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let id = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        super::insert_links(&mut tx, id, &input).await?;
        let code = crate::short_code::assign(&mut tx, id).await?;

        tx.commit().await?;

        tracing::info!(recipe_id = id, short_code = %code, "recipe created");

        Ok(id)
    }
}
