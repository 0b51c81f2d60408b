//! Core of biblia: the offline scripture cache.
//!
//! This crate defines the domain model, the canon tables, the SQLite schema
//! and storage adapter, the completeness oracle, read accessors over the
//! content tables, and the user-data services (bookmarks, highlights,
//! history, plans, backup).

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod backup;
pub mod canon;
pub mod completeness;
pub mod content;
pub mod error;
pub mod model;
pub mod schema;
pub mod user;

pub use error::{Error, Result};
pub use schema::{Database, NullStore, Store};
