use foodgram_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::RecipeInput;

impl super::Command {
    /// Replaces the recipe content. The short code is left untouched.
    pub async fn update(
        &self,
        id: i64,
        request_by: i64,
        input: RecipeInput,
    ) -> foodgram_shared::Result<()> {
        let Some(recipe) = self.load(id).await? else {
            foodgram_shared::not_found!("recipe");
        };

        if recipe.author_id != request_by {
            foodgram_shared::forbidden!();
        }

        input.check()?;

        let mut tx = self.write_db.begin().await?;
        super::check_references(&mut tx, &input).await?;

        let (sql, values) = Query::update()
            .table(Recipe::Table)
            .values([
                (Recipe::Name, input.name.to_owned().into()),
                (Recipe::Text, input.text.to_owned().into()),
                (Recipe::CookingTime, input.cooking_time.into()),
            ])
            .and_where(Expr::col(Recipe::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        super::delete_links(&mut tx, id).await?;
        super::insert_links(&mut tx, id, &input).await?;

        tx.commit().await?;

        Ok(())
    }
}
