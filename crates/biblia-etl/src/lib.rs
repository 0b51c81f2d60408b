//! Data pipeline for biblia.
//!
//! Loads bundled scripture, hymn and study-material corpora into the store,
//! runs the startup bootstrap, and fills gaps from the remote text API.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod batch;
pub mod bootstrap;
pub mod config;
pub mod corpus;
pub mod error;
pub mod loader;
pub mod remote;

pub use bootstrap::BootstrapReport;
pub use config::Config;
pub use corpus::Corpus;
pub use error::{FetchError, FetchResult, LoadError, LoadResult};
pub use loader::{load_corpus, LoadOptions, LoadReport, LoadStatus};
pub use remote::RemoteFetcher;
