use foodgram_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::{RecipeRow, RecipeSummary, RecipeView};

impl super::Query {
    pub async fn find(&self, id: i64, viewer: Option<i64>) -> anyhow::Result<Option<RecipeView>> {
        let (sql, values) = sea_query::Query::select()
            .columns([
                Recipe::Id,
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Text,
                Recipe::CookingTime,
            ])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        let Some(row) = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        else {
            return Ok(None);
        };

        Ok(super::hydrate(&self.read_db, vec![row], viewer)
            .await?
            .into_iter()
            .next())
    }

    pub async fn summary(&self, id: i64) -> anyhow::Result<Option<RecipeSummary>> {
        let (sql, values) = sea_query::Query::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeSummary, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Newest recipes of an author, `limit` of them when given.
    pub async fn summaries_by_author(
        &self,
        author_id: i64,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<RecipeSummary>> {
        let mut statement = sea_query::Query::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
            .order_by(Recipe::PubDate, Order::Desc)
            .order_by(Recipe::Id, Order::Desc)
            .to_owned();

        if let Some(limit) = limit {
            statement.limit(limit);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeSummary, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }
}
