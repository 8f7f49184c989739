//! noted-core: session and note-collection synchronization core.
//!
//! Owns the bearer token lifecycle ([`session`]), mirrors the server-side
//! note collection ([`notes`]), and surfaces the most recent operation
//! outcome through a single-slot [`status`] channel. The remote server is
//! the single source of truth; the client never computes note identifiers
//! or share tokens locally.

pub mod api;
pub mod config;
pub mod error;
pub mod notes;
pub mod session;
pub mod status;
pub mod transport;
