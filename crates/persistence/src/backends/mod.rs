//! Backend implementations.

#[cfg(feature = "sqlite")]
pub mod sqlite;
