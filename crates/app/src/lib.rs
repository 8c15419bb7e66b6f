//! # hound-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CommandRunner`: spawn an external process with a timeout
//! - Define **driving/inbound** use-cases:
//!   - `StatusService`: run every probe in catalog order, contain failures per row
//!   - `ActionService`: authorize and dispatch recognized actions
//! - Orchestrate domain objects without knowing *how* processes are spawned
//!
//! ## Dependency rule
//! Depends on `hound-domain` only (plus `tokio` for spawning detached actions).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
