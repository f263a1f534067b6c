//! `feedback-core` library crate.
//!
//! Pure domain logic for feedback questions and course enrollment:
//! visibility policies and presets, feedback path validation, enrollment
//! reconciliation, and CSV tokenizing. No database, network, or async.

pub mod config;
pub mod csv;
pub mod enrollment;
pub mod error;
pub mod preset;
pub mod question_edit;
pub mod role_flow;
pub mod roles;
pub mod visibility;
