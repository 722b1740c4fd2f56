use foodgram_db::table::Subscription;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository::{self, FindType};

impl super::Command {
    pub async fn unsubscribe(&self, user_id: i64, author_id: i64) -> foodgram_shared::Result<()> {
        if repository::find(&self.read_db, FindType::Id(author_id))
            .await?
            .is_none()
        {
            foodgram_shared::not_found!("user");
        }

        let (sql, values) = Query::delete()
            .from_table(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .and_where(Expr::col(Subscription::AuthorId).eq(author_id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            foodgram_shared::bail!("not subscribed");
        }

        Ok(())
    }
}
