pub mod import;
pub mod migrate;
pub mod server;
pub mod user;
