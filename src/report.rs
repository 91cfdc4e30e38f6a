//! Monthly budget/debt report.
//!
//! Shells out to an external `ledger` binary for the budget table and one
//! balance query per person, then concatenates the captured output into a
//! prose report. The tool's output is never parsed or validated.

use crate::error::{Result, SheetError};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Settings for one report run.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Path or name of the ledger binary.
    pub ledger: String,

    /// Ledger data file to report on.
    pub file: String,

    /// Reporting period, `YYYY/MM`.
    pub month: String,

    /// People to query balances for, in output order.
    pub people: Vec<String>,

    /// Width of the rule above each person's section; defaults to the
    /// person's name length.
    pub width: Option<usize>,
}

impl ReportSettings {
    /// Runs the budget and per-person balance queries and formats the report.
    pub fn run(&self) -> Result<String> {
        let budget = self.run_ledger(&["-p", self.month.as_str(), "budget", "^Expenses"])?;

        let mut debts = Vec::with_capacity(self.people.len());
        for person in &self.people {
            let balance = self.run_ledger(&["balance", person.as_str()])?;
            debts.push((person.as_str(), balance));
        }

        Ok(self.format(&budget, &debts))
    }

    /// Assembles the report text from captured command output.
    fn format(&self, budget: &str, debts: &[(&str, String)]) -> String {
        let mut report = String::new();
        report.push_str(budget);
        report.push('\n');

        for (person, balance) in debts {
            let width = self.width.unwrap_or(person.len());
            report.push('\n');
            report.push_str(&"-".repeat(width));
            report.push('\n');
            report.push_str(person);
            report.push('\n');
            report.push_str(balance);
        }

        report
    }

    fn run_ledger(&self, args: &[&str]) -> Result<String> {
        debug!("running {} -f {} {}", self.ledger, self.file, args.join(" "));

        let output = Command::new(&self.ledger)
            .arg("-f")
            .arg(Path::new(&self.file))
            .args(args)
            .output()?;

        if !output.status.success() {
            return Err(SheetError::Ledger {
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
