use foodgram_db::table::Ingredient;
use sea_query::{Expr, ExprTrait, LikeExpr, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::IngredientRow;

impl super::Query {
    /// Ingredients ordered by name, optionally restricted to names starting
    /// with `prefix` (ASCII case-insensitive).
    pub async fn ingredients(&self, prefix: Option<&str>) -> anyhow::Result<Vec<IngredientRow>> {
        let mut statement = sea_query::Query::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .order_by(Ingredient::Name, Order::Asc)
            .order_by(Ingredient::MeasurementUnit, Order::Asc)
            .to_owned();

        if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
            statement.and_where(
                Expr::col(Ingredient::Name)
                    .like(LikeExpr::new(format!("{}%", escape_like(prefix))).escape('\\')),
            );
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn ingredient(&self, id: i64) -> anyhow::Result<Option<IngredientRow>> {
        let (sql, values) = sea_query::Query::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
