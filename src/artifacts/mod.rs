//! Value types and algorithms of the repository engine
//!
//! - `digest`: content-addressed identifier (SHA-1 hex)
//! - `commit`: immutable snapshot record with deterministic hashing
//! - `merge`: split-point search and three-way file classification

pub mod commit;
pub mod digest;
pub mod merge;
