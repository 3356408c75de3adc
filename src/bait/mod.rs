//! Fabricated credential records released to a caught connection.
//!
//! The store is loaded once at startup, before the listener binds, and is
//! shared read-only by every session for the lifetime of the process.

pub mod store;

pub use store::{BaitStore, FakeRecord, LoadError};
