//! File-backed landing rows store.
//!
//! [`RowStore`] keeps the whole collection in one JSON document and runs
//! every mutation through a single FIFO worker so read-modify-write cycles
//! never interleave. Each successful mutation is appended to a separate
//! newline-delimited audit log on a best-effort basis.

pub mod audit;
pub mod config;
pub mod error;
pub mod file;
pub mod serializer;
pub mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::RowStore;
