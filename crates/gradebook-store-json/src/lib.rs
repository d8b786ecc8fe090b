//! Flat-file JSON backend for the gradebook record store.
//!
//! One `<entity>.json` file per collection, each holding the full record
//! sequence as a JSON array of attribute maps. Every statement re-reads
//! and — for mutations — fully rewrites its file; see [`JsonStore`] for
//! the locking and atomicity rules.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;
