mod command;
mod page;

pub use command::*;
pub use page::*;

pub const MIN_AMOUNT: u32 = 1;
pub const MAX_AMOUNT: u32 = 32000;
pub const MIN_COOKING_TIME: u32 = 1;
pub const MAX_COOKING_TIME: u32 = 32000;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

/// Seconds since the unix epoch, used for `created_at` and `pub_date` columns.
pub fn timestamp() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}
