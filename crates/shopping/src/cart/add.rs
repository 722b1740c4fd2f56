use foodgram_db::table::ShoppingCart;
use foodgram_shared::is_unique_violation;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    pub async fn add(&self, recipe_id: i64, user_id: i64) -> foodgram_shared::Result<()> {
        if !foodgram_recipe::exists(&self.read_db, recipe_id).await? {
            foodgram_shared::not_found!("recipe");
        }

        let (sql, values) = Query::insert()
            .into_table(ShoppingCart::Table)
            .columns([
                ShoppingCart::UserId,
                ShoppingCart::RecipeId,
                ShoppingCart::CreatedAt,
            ])
            .values_panic([
                user_id.into(),
                recipe_id.into(),
                foodgram_shared::timestamp().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                foodgram_shared::bail!("recipe is already in shopping cart")
            }
            Err(err) => Err(err.into()),
        }
    }
}
