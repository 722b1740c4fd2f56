use std::ops::Deref;

use foodgram_db::table::{Ingredient, IngredientRecipe, ShoppingCart};
use sea_query::{Expr, ExprTrait, JoinType, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::aggregation::{self, IngredientLine, ShoppingItem};

#[derive(Clone)]
pub struct Query(pub foodgram_shared::State);

impl Deref for Query {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    /// Every ingredient amount of every recipe in the user's cart.
    pub async fn lines(&self, user_id: i64) -> anyhow::Result<Vec<IngredientLine>> {
        let (sql, values) = sea_query::Query::select()
            .columns([
                (Ingredient::Table, Ingredient::Name),
                (Ingredient::Table, Ingredient::MeasurementUnit),
            ])
            .column((IngredientRecipe::Table, IngredientRecipe::Amount))
            .from(ShoppingCart::Table)
            .join(
                JoinType::InnerJoin,
                IngredientRecipe::Table,
                Expr::col((IngredientRecipe::Table, IngredientRecipe::RecipeId))
                    .equals((ShoppingCart::Table, ShoppingCart::RecipeId)),
            )
            .join(
                JoinType::InnerJoin,
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((IngredientRecipe::Table, IngredientRecipe::IngredientId)),
            )
            .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(user_id))
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientLine, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn shopping_list(&self, user_id: i64) -> anyhow::Result<Vec<ShoppingItem>> {
        Ok(aggregation::aggregate(self.lines(user_id).await?))
    }

    /// The user's shopping list as downloadable text. Empty cart gives "".
    pub async fn shopping_list_text(&self, user_id: i64) -> anyhow::Result<String> {
        let items = self.shopping_list(user_id).await?;
        tracing::debug!(user_id, items = items.len(), "shopping list aggregated");

        Ok(aggregation::render(&items))
    }
}
