//! Schema definitions and the storage adapter.

mod db;
pub mod migrations;
mod null;
mod row;
mod store;

pub use db::Database;
pub use null::NullStore;
pub use row::{decode_all, decode_first, FromRow, Row};
pub use store::{count, RunResult, Store, ToValue, Value};
