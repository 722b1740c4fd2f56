use foodgram_db::table::Tag;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::TagRow;

impl super::Query {
    pub async fn tags(&self) -> anyhow::Result<Vec<TagRow>> {
        let (sql, values) = sea_query::Query::select()
            .columns([Tag::Id, Tag::Name, Tag::Slug])
            .from(Tag::Table)
            .order_by(Tag::Id, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn tag(&self, id: i64) -> anyhow::Result<Option<TagRow>> {
        let (sql, values) = sea_query::Query::select()
            .columns([Tag::Id, Tag::Name, Tag::Slug])
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).eq(id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }
}
