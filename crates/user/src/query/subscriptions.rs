use foodgram_db::table::{Recipe, Subscription, User as UserTable};
use foodgram_recipe::query::RecipeSummary;
use foodgram_shared::Page;
use sea_query::{Expr, ExprTrait, Func, JoinType, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;

use super::UserView;
use crate::User;

/// A followed author with their newest recipes.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub author: UserView,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}

impl super::Query {
    /// Authors `user_id` follows, most recent subscription first.
    pub async fn subscriptions(
        &self,
        user_id: i64,
        recipes_limit: Option<u64>,
        limit: u64,
        offset: u64,
    ) -> anyhow::Result<Page<SubscriptionView>> {
        let (sql, values) = sea_query::Query::select()
            .expr(Func::count(Expr::col(Subscription::AuthorId)))
            .from(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .build_sqlx(SqliteQueryBuilder);

        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let (sql, values) = sea_query::Query::select()
            .columns([
                (UserTable::Table, UserTable::Id),
                (UserTable::Table, UserTable::Email),
                (UserTable::Table, UserTable::Username),
                (UserTable::Table, UserTable::FirstName),
                (UserTable::Table, UserTable::LastName),
            ])
            .from(Subscription::Table)
            .join(
                JoinType::InnerJoin,
                UserTable::Table,
                Expr::col((UserTable::Table, UserTable::Id))
                    .equals((Subscription::Table, Subscription::AuthorId)),
            )
            .and_where(Expr::col((Subscription::Table, Subscription::UserId)).eq(user_id))
            .order_by((Subscription::Table, Subscription::CreatedAt), Order::Desc)
            .order_by((UserTable::Table, UserTable::Id), Order::Desc)
            .limit(limit)
            .offset(offset)
            .build_sqlx(SqliteQueryBuilder);

        let authors = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let mut results = Vec::with_capacity(authors.len());
        for author in authors {
            let author = UserView {
                user: author,
                is_subscribed: true,
            };
            results.push(self.with_recipes(author, recipes_limit).await?);
        }

        Ok(Page {
            count: count as u64,
            results,
        })
    }

    /// One author as shown in `viewer`'s subscription list.
    pub async fn subscription(
        &self,
        viewer: i64,
        author_id: i64,
        recipes_limit: Option<u64>,
    ) -> anyhow::Result<Option<SubscriptionView>> {
        let Some(author) = self.find(author_id, Some(viewer)).await? else {
            return Ok(None);
        };

        Ok(Some(self.with_recipes(author, recipes_limit).await?))
    }

    async fn with_recipes(
        &self,
        author: UserView,
        recipes_limit: Option<u64>,
    ) -> anyhow::Result<SubscriptionView> {
        let (sql, values) = sea_query::Query::select()
            .expr(Func::count(Expr::col(Recipe::Id)))
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author.user.id))
            .build_sqlx(SqliteQueryBuilder);

        let (recipes_count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let recipes = foodgram_recipe::query::Query(self.0.clone())
            .summaries_by_author(author.user.id, recipes_limit)
            .await?;

        Ok(SubscriptionView {
            author,
            recipes,
            recipes_count: recipes_count as u64,
        })
    }
}
