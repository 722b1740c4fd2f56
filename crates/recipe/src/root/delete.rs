use foodgram_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Deletes the recipe. Tag links, ingredient rows, favorites and cart
    /// entries go with it through the foreign keys.
    pub async fn delete(&self, id: i64, request_by: i64) -> foodgram_shared::Result<()> {
        let Some(recipe) = self.load(id).await? else {
            foodgram_shared::not_found!("recipe");
        };

        if recipe.author_id != request_by {
            foodgram_shared::forbidden!();
        }

        let (sql, values) = Query::delete()
            .from_table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(recipe_id = id, "recipe deleted");

        Ok(())
    }
}
