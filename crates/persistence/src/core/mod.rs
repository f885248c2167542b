//! Storage traits and abstractions.

mod storage;

pub use storage::ProviderStore;
