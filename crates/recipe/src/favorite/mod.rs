mod save;
mod unsave;

use std::ops::Deref;

use foodgram_db::table::Favorite;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

#[derive(Clone)]
pub struct Command(pub(crate) foodgram_shared::State);

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    /// Read-side membership check, used by tests to observe commands.
    pub async fn is_saved(&self, recipe_id: i64, user_id: i64) -> anyhow::Result<bool> {
        let (sql, values) = Query::select()
            .column(Favorite::RecipeId)
            .from(Favorite::Table)
            .and_where(Expr::col(Favorite::RecipeId).eq(recipe_id))
            .and_where(Expr::col(Favorite::UserId).eq(user_id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .is_some())
    }
}
