mod subscriptions;

pub use subscriptions::SubscriptionView;

use std::{collections::HashSet, ops::Deref};

use foodgram_db::table::{Subscription, User as UserTable};
use foodgram_shared::Page;
use sea_query::{Expr, ExprTrait, Func, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::User;

#[derive(Clone)]
pub struct Query(pub foodgram_shared::State);

impl Deref for Query {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    pub is_subscribed: bool,
}

impl Query {
    pub async fn list(
        &self,
        viewer: Option<i64>,
        limit: u64,
        offset: u64,
    ) -> anyhow::Result<Page<UserView>> {
        let (sql, values) = sea_query::Query::select()
            .expr(Func::count(Expr::col(UserTable::Id)))
            .from(UserTable::Table)
            .build_sqlx(SqliteQueryBuilder);

        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let (sql, values) = sea_query::Query::select()
            .columns([
                UserTable::Id,
                UserTable::Email,
                UserTable::Username,
                UserTable::FirstName,
                UserTable::LastName,
            ])
            .from(UserTable::Table)
            .order_by(UserTable::Id, Order::Asc)
            .limit(limit)
            .offset(offset)
            .build_sqlx(SqliteQueryBuilder);

        let users = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(Page {
            count: count as u64,
            results: with_subscription_flags(&self.read_db, users, viewer).await?,
        })
    }

    pub async fn find(&self, id: i64, viewer: Option<i64>) -> anyhow::Result<Option<UserView>> {
        let Some(user) = crate::repository::find(&self.read_db, crate::FindType::Id(id)).await?
        else {
            return Ok(None);
        };

        Ok(with_subscription_flags(&self.read_db, vec![user], viewer)
            .await?
            .into_iter()
            .next())
    }
}

pub(crate) async fn with_subscription_flags(
    pool: &SqlitePool,
    users: Vec<User>,
    viewer: Option<i64>,
) -> anyhow::Result<Vec<UserView>> {
    let subscribed = match viewer {
        Some(viewer) if !users.is_empty() => {
            let (sql, values) = sea_query::Query::select()
                .column(Subscription::AuthorId)
                .from(Subscription::Table)
                .and_where(Expr::col(Subscription::UserId).eq(viewer))
                .and_where(
                    Expr::col(Subscription::AuthorId).is_in(users.iter().map(|u| u.id)),
                )
                .build_sqlx(SqliteQueryBuilder);

            sqlx::query_as_with::<_, (i64,), _>(&sql, values)
                .fetch_all(pool)
                .await?
                .into_iter()
                .map(|(id,)| id)
                .collect::<HashSet<_>>()
        }
        _ => HashSet::new(),
    };

    Ok(users
        .into_iter()
        .map(|user| UserView {
            is_subscribed: subscribed.contains(&user.id),
            user,
        })
        .collect())
}
