use foodgram_db::table::Subscription;
use foodgram_shared::is_unique_violation;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository::{self, FindType};

impl super::Command {
    pub async fn subscribe(&self, user_id: i64, author_id: i64) -> foodgram_shared::Result<()> {
        if repository::find(&self.read_db, FindType::Id(author_id))
            .await?
            .is_none()
        {
            foodgram_shared::not_found!("user");
        }

        if user_id == author_id {
            foodgram_shared::bail!("cannot subscribe to yourself");
        }

        let (sql, values) = Query::insert()
            .into_table(Subscription::Table)
            .columns([
                Subscription::UserId,
                Subscription::AuthorId,
                Subscription::CreatedAt,
            ])
            .values_panic([
                user_id.into(),
                author_id.into(),
                foodgram_shared::timestamp().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => {
                tracing::debug!(user_id, author_id, "subscribed");

                Ok(())
            }
            Err(err) if is_unique_violation(&err) => {
                foodgram_shared::bail!("already subscribed")
            }
            Err(err) => Err(err.into()),
        }
    }
}
