pub mod query;
mod repository;
mod root;
pub mod subscription;

pub use repository::{FindType, User};
pub use root::*;
