//! Diagnostics produced by the front end.
//!
//! This module defines the error types recorded while parsing. It includes:
//!
//! - Error structures with source position information
//! - One variant per kind of syntax problem the parser detects
//! - Short error names and suggestions for reporting

pub mod errors;
