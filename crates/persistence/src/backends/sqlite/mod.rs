//! SQLite backend implementation.
//!
//! A complete SQLite implementation of [`ProviderStore`]. Supports both
//! in-memory databases (great for testing) and file-based databases (for
//! development and small deployments).
//!
//! # Example
//!
//! ```no_run
//! use atria_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! [`ProviderStore`]: crate::core::ProviderStore

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
