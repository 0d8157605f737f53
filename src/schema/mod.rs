//! User schema validation
//!
//! Every write passes through [`validate`] before it reaches the store.
//! A successful validation yields a [`UserDraft`], the only value the
//! store accepts for create and update, so an unchecked candidate can
//! never be persisted.
//!
//! # Rules
//!
//! Checked in order, stopping at the first failure:
//!
//! - `firstName`: required, non-empty string
//! - `secondName`: required, non-empty string
//! - `age`: required integer in `[0, 150]`
//! - `city`: optional, non-empty string when present
//!
//! Unknown fields are carried through untouched. A client supplied `id`
//! is dropped; ids belong to the store.

mod errors;
mod types;
mod validator;

pub use errors::{ValidationError, ValidationResult};
pub use types::{UserDraft, AGE_MAX, AGE_MIN};
pub use validator::validate;
