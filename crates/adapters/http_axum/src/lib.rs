//! # hound-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for scripts and monitoring
//!   (`/api/status`, `/api/actions`, `/api/actions/{param}`)
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: pure HTML forms + `<meta http-equiv="refresh">`
//!   for live updates
//! - Gate every action behind the shared token (form field or bearer header)
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## No-JS dashboard approach
//! - The page is rendered server-side as complete HTML.
//! - Restart and edit-lock buttons submit one `<form>` that POSTs back to the
//!   server and redirects (PRG pattern), so refreshing never repeats an action.
//! - The page auto-reloads with `<meta http-equiv="refresh">`.
//!
//! ## Dependency rule
//! Depends on `hound-app` (for port traits and services) and `hound-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
