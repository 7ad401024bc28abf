//! # Engine Module
//!
//! Run-level plumbing shared by every analysis workflow.
//!
//! - **Configuration** ([`config`]) - The validated `AnalysisConfig`, its builder, and the
//!   `OutputLayout` strategy deriving input and output paths from a run identifier
//! - **Error Handling** ([`error`]) - The engine error type propagated to callers
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events

pub mod config;
pub mod error;
pub mod progress;
