//! Google Sheets access for retroscope.
//!
//! The spreadsheet is the system of record: one row per analyzed meeting,
//! with header names mapped through [`retroscope_core::ColumnNames`].

mod client;
mod error;
mod rows;


pub use client::*;
pub use error::*;
pub use rows::*;
