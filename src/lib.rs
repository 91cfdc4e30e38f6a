//! # sheet2ledger
//!
//! Converts spreadsheet-exported expense records (shared-purchase and payment
//! CSV files) into double-entry ledger postings, and produces a monthly
//! budget/debt report via an external `ledger` binary.
//!
//! ## Design Principles
//!
//! - **Exact decimals**: currency cells parse via `rust_decimal`, never floats
//! - **Per-row absorption**: a bad row is dropped and logged, never fatal
//! - **Short-circuit extraction**: the first field failure stops a row's
//!   extraction and is recorded under the attribute's name
//! - **Deterministic output**: entries stable-sorted by date
//!
//! ## Example
//!
//! ```no_run
//! use sheet2ledger::{Pipeline, RowOptions};
//! use std::io::Cursor;
//!
//! let payments = "Date,From,To,Amount\n2024-01-15,Dave,Erin,$50\n";
//! let mut pipeline = Pipeline::new(RowOptions::default());
//! pipeline.read_payments(Cursor::new(payments)).unwrap();
//! pipeline.write_ledger(None, std::io::stdout()).unwrap();
//! ```

pub mod amount;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod row;
pub mod transaction;

pub use amount::Amount;
pub use error::{Result, SheetError};
pub use pipeline::Pipeline;
pub use report::ReportSettings;
pub use row::{FieldError, Failure, Failures, Row, RowReader};
pub use transaction::{Category, LineItem, Payment, Purchase, RowOptions, Transaction};
