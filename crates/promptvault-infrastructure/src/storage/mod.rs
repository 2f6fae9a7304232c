//! Key-value storage abstraction and implementations.

mod atomic_file;
mod memory;

pub use atomic_file::AtomicFileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use promptvault_core::error::Result;

/// The injected persistence boundary of the stores.
///
/// A store persists each namespace as one text document under one fixed
/// key; implementations decide where that text lives (a file, a browser
/// storage bridge, a database row).
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Returns the text stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
