//! Tabular file parsing.
//!
//! Parsers turn raw bytes into a [`Dataset`](crate::core::Dataset) or a
//! [`ParseFailure`] listing every positional issue; a failure never carries a
//! partial table.

mod csv_loader;

pub use csv_loader::{ParseFailure, ParseIssue, infer_cell, parse_csv};
