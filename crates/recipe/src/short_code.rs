//! Short codes identify recipes in short links.
//!
//! A candidate is the upper-cased hex SHA3-224 digest of the zero-padded
//! recipe id, truncated to [`LEN`] characters. Retries hash `"{padded}:{n}"`
//! so each attempt yields a different candidate. When every attempt collides
//! the code falls back to `R` followed by the padded id.

use foodgram_db::table::Recipe;
use foodgram_shared::{Error, Result, is_unique_violation};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sha3::{Digest, Sha3_224};
use sqlx::SqliteConnection;

pub const LEN: usize = 8;
pub const ATTEMPTS: u32 = 10;

fn padded(id: i64) -> String {
    format!("{id:06}")
}

pub fn candidate(id: i64, attempt: u32) -> String {
    let padded = padded(id);
    let input = if attempt == 0 {
        padded
    } else {
        format!("{padded}:{attempt}")
    };

    Sha3_224::digest(input.as_bytes())
        .iter()
        .take(LEN / 2)
        .map(|b| format!("{b:02X}"))
        .collect()
}

pub fn candidates(id: i64) -> impl Iterator<Item = String> {
    (0..ATTEMPTS).map(move |attempt| candidate(id, attempt))
}

pub fn fallback(id: i64) -> String {
    let mut code = format!("R{}", padded(id));
    code.truncate(LEN);
    code
}

/// Assigns a short code to the recipe unless it already has one and returns
/// the recipe's code.
///
/// Meant to run inside the transaction that created the recipe so a failure
/// rolls the creation back.
pub async fn assign(conn: &mut SqliteConnection, recipe_id: i64) -> Result<String> {
    let (sql, values) = Query::select()
        .column(Recipe::ShortCode)
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(recipe_id))
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    let Some((current,)) = sqlx::query_as_with::<_, (Option<String>,), _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?
    else {
        foodgram_shared::not_found!("recipe");
    };

    if let Some(code) = current {
        return Ok(code);
    }

    for (attempt, code) in candidates(recipe_id).enumerate() {
        if try_write(conn, recipe_id, &code).await? {
            return Ok(code);
        }

        tracing::debug!(recipe_id, attempt, %code, "short code collision");
    }

    let code = fallback(recipe_id);
    if try_write(conn, recipe_id, &code).await? {
        tracing::warn!(recipe_id, %code, "short code fallback used");
        return Ok(code);
    }

    Err(Error::Unknown(anyhow::anyhow!(
        "unable to assign a short code to recipe {recipe_id}"
    )))
}

/// Writes `code` unless another recipe holds it. Returns false on collision.
async fn try_write(conn: &mut SqliteConnection, recipe_id: i64, code: &str) -> Result<bool> {
    if exists(conn, code).await? {
        return Ok(false);
    }

    let (sql, values) = Query::update()
        .table(Recipe::Table)
        .value(Recipe::ShortCode, code)
        .and_where(Expr::col(Recipe::Id).eq(recipe_id))
        .and_where(Expr::col(Recipe::ShortCode).is_null())
        .build_sqlx(SqliteQueryBuilder);

    match sqlx::query_with(&sql, values).execute(&mut *conn).await {
        Ok(result) if result.rows_affected() == 1 => Ok(true),
        Ok(_) => Err(Error::Unknown(anyhow::anyhow!(
            "recipe {recipe_id} short code changed during assignment"
        ))),
        Err(err) if is_unique_violation(&err) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

pub async fn exists(conn: &mut SqliteConnection, code: &str) -> Result<bool> {
    let (sql, values) = Query::select()
        .column(Recipe::Id)
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::ShortCode).eq(code))
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?
        .is_some())
}
