//! CLI command implementations.
//!
//! One module per pipeline stage, plus [`run`] which chains them all.
//!
//! # Command Modules
//!
//! - [`fetch`] - Download subscription sources
//! - [`parse`] - Parse and deduplicate descriptors
//! - [`probe`] - Measure node latency
//! - [`select`] - Rank and keep the fastest nodes
//! - [`generate`] - Write the subscription bundle and report
//! - [`run`] - Every stage in one pass

pub mod fetch;
pub mod generate;
pub mod parse;
pub mod probe;
pub mod run;
pub mod select;
