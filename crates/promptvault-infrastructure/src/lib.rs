//! Storage-backed implementations of the PromptVault repositories.
//!
//! The repositories here persist each namespace as one serialized document
//! under a fixed key of an injected [`storage::KeyValueStorage`]. Reads fail
//! open (a missing or unreadable document degrades to an empty store); writes
//! fail loud.

pub mod dto;
pub mod kv_user_prompt_repository;
pub mod kv_version_repository;
pub mod matcher_config;
pub mod paths;
pub mod storage;

pub use kv_user_prompt_repository::KvUserPromptRepository;
pub use kv_version_repository::KvVersionRepository;
pub use storage::{AtomicFileStorage, KeyValueStorage, MemoryStorage};
