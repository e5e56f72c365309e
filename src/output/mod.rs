//! Output formatting
//!
//! - [`text`]: fixed-width report file and console summary
//! - [`json`]: optional JSON run summary

pub mod json;
pub mod text;
