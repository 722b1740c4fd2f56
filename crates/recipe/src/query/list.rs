use foodgram_db::table::{Favorite, Recipe, RecipeTag, ShoppingCart, Tag};
use foodgram_shared::Page;
use sea_query::{Expr, ExprTrait, Func, JoinType, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::{RecipeRow, RecipeView};

#[derive(Debug, Default, Clone)]
pub struct RecipesQuery {
    pub viewer: Option<i64>,
    pub author: Option<i64>,
    /// Tag slugs, a recipe matches when it carries any of them.
    pub tags: Vec<String>,
    /// `Some(true)` keeps only the viewer's favorites, `Some(false)` excludes them.
    pub is_favorited: Option<bool>,
    /// Same as `is_favorited` for the viewer's shopping cart.
    pub is_in_shopping_cart: Option<bool>,
    pub limit: u64,
    pub offset: u64,
}

impl super::Query {
    /// Recipes matching the query, newest first.
    ///
    /// Anonymous viewers asking for favorites or cart get an empty page, and
    /// their exclusion filters are ignored.
    pub async fn filter(&self, query: RecipesQuery) -> anyhow::Result<Page<RecipeView>> {
        let wants_membership =
            query.is_favorited == Some(true) || query.is_in_shopping_cart == Some(true);
        if wants_membership && query.viewer.is_none() {
            return Ok(Page::empty());
        }

        let mut statement = sea_query::Query::select().from(Recipe::Table).to_owned();

        if let Some(author) = query.author {
            statement.and_where(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(author));
        }

        if !query.tags.is_empty() {
            statement.and_where(
                Expr::col((Recipe::Table, Recipe::Id)).in_subquery(
                    sea_query::Query::select()
                        .column((RecipeTag::Table, RecipeTag::RecipeId))
                        .from(RecipeTag::Table)
                        .join(
                            JoinType::InnerJoin,
                            Tag::Table,
                            Expr::col((RecipeTag::Table, RecipeTag::TagId))
                                .equals((Tag::Table, Tag::Id)),
                        )
                        .and_where(Expr::col((Tag::Table, Tag::Slug)).is_in(query.tags.clone()))
                        .to_owned(),
                ),
            );
        }

        if let Some(viewer) = query.viewer {
            if let Some(favorited) = query.is_favorited {
                let subquery = sea_query::Query::select()
                    .column(Favorite::RecipeId)
                    .from(Favorite::Table)
                    .and_where(Expr::col(Favorite::UserId).eq(viewer))
                    .to_owned();

                statement.and_where(membership(favorited, subquery));
            }

            if let Some(in_cart) = query.is_in_shopping_cart {
                let subquery = sea_query::Query::select()
                    .column(ShoppingCart::RecipeId)
                    .from(ShoppingCart::Table)
                    .and_where(Expr::col(ShoppingCart::UserId).eq(viewer))
                    .to_owned();

                statement.and_where(membership(in_cart, subquery));
            }
        }

        let (sql, values) = statement
            .clone()
            .expr(Func::count(Expr::col((Recipe::Table, Recipe::Id))))
            .build_sqlx(SqliteQueryBuilder);

        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let (sql, values) = statement
            .columns([
                (Recipe::Table, Recipe::Id),
                (Recipe::Table, Recipe::AuthorId),
                (Recipe::Table, Recipe::Name),
                (Recipe::Table, Recipe::Text),
                (Recipe::Table, Recipe::CookingTime),
            ])
            .order_by((Recipe::Table, Recipe::PubDate), Order::Desc)
            .order_by((Recipe::Table, Recipe::Id), Order::Desc)
            .limit(query.limit)
            .offset(query.offset)
            .build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(Page {
            count: count as u64,
            results: super::hydrate(&self.read_db, rows, query.viewer).await?,
        })
    }
}

fn membership(member: bool, subquery: SelectStatement) -> Expr {
    let id = Expr::col((Recipe::Table, Recipe::Id));
    if member {
        id.in_subquery(subquery)
    } else {
        id.not_in_subquery(subquery)
    }
}
