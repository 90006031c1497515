//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the data-access facade used by
//!   presentation code.
//! - Keep UI layers decoupled from storage details.

pub mod tracker_service;
