//! Stateful areas of the repository
//!
//! - `blob_store`: content-addressed store for immutable file content
//! - `staging`: pre-commit buffer of pending additions and removals
//! - `workspace`: working directory file system operations
//! - `repository`: repository state, coordination, and persistence

pub mod blob_store;
pub mod repository;
pub mod staging;
pub mod workspace;
