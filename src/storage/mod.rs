//! User record storage
//!
//! The store holds the canonical state of all users in a single JSON file.
//!
//! # Design Principles
//!
//! - Load-modify-store: every operation reads the whole file, mutations
//!   rewrite the whole file
//! - No cache: the file is the only state
//! - Writes are atomic (temp file, fsync, rename), the file is always
//!   either the old or the new collection
//! - Mutations are serialized by an exclusive lock, reads share it
//! - A mutation never overwrites a file it could not parse

mod errors;
mod file;
mod record;
mod store;

pub use errors::{StoreError, StoreResult};
pub use file::CollectionFile;
pub use record::User;
pub use store::UserStore;
