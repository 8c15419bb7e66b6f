//! # hound-domain
//!
//! Pure domain model for the hound home-server console.
//!
//! ## Responsibilities
//! - Foundational types: action identifiers, error conventions, timestamps
//! - Define **Service entries** (restartable units shown on the dashboard)
//! - Define the **Catalog** (status rows + recognized actions, kept in sync)
//! - Define **Probe results** and their health classification
//! - Define **Action requests** and **outcomes**
//! - Define the **Status report** produced by one collection pass
//! - Describe external commands without running them
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never spawn processes or touch the network.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod action;
pub mod catalog;
pub mod command;
pub mod probe;
pub mod report;
pub mod service;
