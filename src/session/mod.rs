//! Per-connection decoy protocol handling.
//!
//! Each accepted connection gets exactly one [`Session`], which owns the
//! socket, its own read buffer, and its own attempt counter. Sessions never
//! share mutable state; the only thing they share is the read-only
//! [`crate::bait::BaitStore`].
//!
//! # Session State Machine
//!
//! ```text
//!        ┌──────────────┐
//!        │   Greeting   │ ← Send the welcome banner
//!        └──────┬───────┘
//!               │ Banner written
//!               ▼
//!        ┌──────────────────┐
//!        │  AwaitingInput   │ ← Read lines, count auth attempts
//!        └──────┬───────────┘
//!               │ attempts >= threshold
//!               ▼
//!        ┌──────────────────┐
//!        │    Delivered     │ ← Send the fabricated records, once
//!        └──────┬───────────┘
//!               │
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Shut the socket down, end the task
//!        └──────────────────┘
//! ```
//!
//! `AwaitingInput` loops on itself for chatter and below-threshold attempts.
//! `Delivered` only ever moves to `Closed`, so the payload goes out at most
//! once per connection. Peer disconnect or a transport error short-circuits
//! any state to `Closed`.

pub mod connection;
pub mod lines;
pub mod writer;

pub use connection::{Session, SessionState};
