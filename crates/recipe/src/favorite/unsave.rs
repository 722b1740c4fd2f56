use foodgram_db::table::Favorite;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    pub async fn unsave(&self, recipe_id: i64, user_id: i64) -> foodgram_shared::Result<()> {
        if !crate::exists(&self.read_db, recipe_id).await? {
            foodgram_shared::not_found!("recipe");
        }

        let (sql, values) = Query::delete()
            .from_table(Favorite::Table)
            .and_where(Expr::col(Favorite::RecipeId).eq(recipe_id))
            .and_where(Expr::col(Favorite::UserId).eq(user_id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            foodgram_shared::bail!("recipe is not in favorites");
        }

        Ok(())
    }
}
