//! Conformance testing harness for portfmt.
//!
//! This crate provides:
//! - Fixture loading: JSON cases pairing a format and typed arguments with
//!   the expected bytes, logical length or error kind
//! - Fixture verify: run every case through the bounded engine
//! - Structured logging: one JSONL record per executed case
//! - Report generation: human-readable + machine-readable conformance reports

#![forbid(unsafe_code)]

pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureArg, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
