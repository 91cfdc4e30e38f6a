//! Batch conversion pipeline.
//!
//! Reads the purchases and payments exports, builds one transaction per row,
//! drops invalid rows, and writes the surviving entries as a ledger file.
//! Per-row problems are logged and absorbed; only a missing or unreadable
//! input aborts the run.

use crate::error::Result;
use crate::row::Row;
use crate::transaction::{Payment, Purchase, RowOptions, Transaction};
use csv::ReaderBuilder;
use log::{debug, warn};
use std::io::{BufRead, Read, Write};

/// Accumulates transactions from the CSV sources and writes the ledger.
///
/// # Output Ordering
///
/// Entries are stable-sorted by date ascending. Purchases are read before
/// payments, so on equal dates purchases come first.
pub struct Pipeline {
    options: RowOptions,
    transactions: Vec<Transaction>,
}

impl Pipeline {
    /// Creates an empty pipeline with the given row options.
    pub fn new(options: RowOptions) -> Self {
        Pipeline {
            options,
            transactions: Vec::new(),
        }
    }

    /// Reads the purchases export and appends one `Purchase` per record.
    ///
    /// The export's first two lines are a title and a spacer, discarded
    /// unconditionally; the real column header is on line three. Records the
    /// CSV reader itself cannot parse are logged at warn level and skipped.
    pub fn read_purchases<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut discard = String::new();
        reader.read_line(&mut discard)?;
        discard.clear();
        reader.read_line(&mut discard)?;

        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        for (row_idx, result) in csv_reader.deserialize::<Row>().enumerate() {
            // Two discarded lines, the header line, then 1-indexed records.
            let line_num = row_idx + 4;

            match result {
                Ok(row) => {
                    let purchase = Purchase::from_row(&row, self.options);
                    if !purchase.valid {
                        debug!("purchases line {}: dropping invalid row", line_num);
                    }
                    self.transactions.push(Transaction::Purchase(purchase));
                }
                Err(e) => warn!("purchases line {}: CSV parse error: {}", line_num, e),
            }
        }

        Ok(())
    }

    /// Reads the payments export and appends one `Payment` per record.
    pub fn read_payments<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        for (row_idx, result) in csv_reader.deserialize::<Row>().enumerate() {
            let line_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(row) => {
                    let payment = Payment::from_row(&row, self.options);
                    if !payment.valid {
                        debug!("payments line {}: dropping invalid row", line_num);
                    }
                    self.transactions.push(Transaction::Payment(payment));
                }
                Err(e) => warn!("payments line {}: CSV parse error: {}", line_num, e),
            }
        }

        Ok(())
    }

    /// Writes the ledger: optional header text verbatim, then each valid
    /// entry in date order, each followed by a blank line.
    pub fn write_ledger<W: Write>(&self, header: Option<&str>, mut writer: W) -> Result<()> {
        if let Some(text) = header {
            writer.write_all(text.as_bytes())?;
            writeln!(writer)?;
        }

        let mut valid: Vec<&Transaction> =
            self.transactions.iter().filter(|t| t.is_valid()).collect();
        // Stable sort keeps the purchases-before-payments order on ties.
        valid.sort_by_key(|t| t.date());

        for transaction in valid {
            if let Some(entry) = transaction.ledger() {
                writeln!(writer, "{}", entry)?;
                writeln!(writer)?;
            }
        }

        Ok(())
    }

    /// Returns the accumulated transactions (for testing).
    #[cfg(test)]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}
