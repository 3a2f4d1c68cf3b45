//! # detyped-cli — Detyped Model Command-Line Interface
//!
//! ## Subcommands
//!
//! - `encoding`: parse bracket-encoded class names
//! - `check`: load a persisted descriptor and a value, report whether the
//!   value is an instance
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers write to a caller-supplied sink so they can be tested
//!   without a process.
//! - Descriptors are loaded only through the validating reconstruction
//!   path; a document that would not pass construction is an error.

pub mod check;
pub mod document;
pub mod encoding;
