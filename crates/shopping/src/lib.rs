pub mod aggregation;
mod cart;
pub mod query;

pub use cart::Command;
