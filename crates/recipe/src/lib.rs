pub mod catalog;
pub mod favorite;
pub mod query;
mod root;
pub mod short_code;

pub use root::*;
