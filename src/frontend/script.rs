//! Script replay
//!
//! Runs a CSV script of ledger commands against a fresh bank and writes the
//! final state of every account as CSV.
//!
//! # Design
//!
//! The ScriptRunner focuses on orchestration, delegating:
//! - CSV parsing to `ScriptReader` (iterator interface)
//! - Rule enforcement to `Bank`
//! - CSV output to `csv_format::write_accounts_csv`
//!
//! The bank runs on a `ManualClock` starting at the current local time. A
//! row with a `timestamp` moves the clock before the command is applied, so
//! scripts can cross midnight and exercise the daily reset.

use crate::core::{Bank, LedgerConfig, ManualClock};
use crate::io::csv_format::write_accounts_csv;
use crate::io::script_reader::ScriptReader;
use crate::types::LedgerError;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Counts of what happened during a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Commands the bank applied
    pub applied: usize,
    /// Commands refused by a ledger rule (amount, limits, funds)
    pub rejected: usize,
    /// Commands naming an unknown account or holder, or a taken national ID
    pub failed: usize,
    /// Rows that could not be parsed
    pub malformed: usize,
}

/// Replays scripts with fixed ledger limits
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    config: LedgerConfig,
}

impl ScriptRunner {
    pub fn new(config: LedgerConfig) -> Self {
        ScriptRunner { config }
    }

    /// Replay the script at `path`
    ///
    /// # Errors
    ///
    /// Fatal errors only: the file cannot be opened or the summary cannot
    /// be written. Bad rows and rejected commands are logged and skipped.
    pub fn run_path(&self, path: &Path, output: &mut dyn Write) -> Result<ReplayReport, LedgerError> {
        let reader = ScriptReader::open(path)?;
        self.run(reader, output)
    }

    /// Replay entries from an already opened reader
    pub fn run<R: Read>(
        &self,
        reader: ScriptReader<R>,
        output: &mut dyn Write,
    ) -> Result<ReplayReport, LedgerError> {
        let mut bank = Bank::with_clock(self.config.clone(), ManualClock::starting_now());
        let mut report = ReplayReport::default();

        for result in reader {
            match result {
                Ok(entry) => {
                    if let Some(timestamp) = entry.timestamp {
                        bank.clock().set(timestamp);
                    }
                    let command = entry.command.name();
                    match bank.process(entry.command) {
                        Ok(()) => report.applied += 1,
                        Err(e) if e.is_rule_violation() => {
                            debug!(command, error = %e, "script command refused by ledger rule");
                            report.rejected += 1;
                        }
                        Err(e) => {
                            warn!(command, error = %e, "script command failed");
                            report.failed += 1;
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "skipping malformed script row");
                    report.malformed += 1;
                }
            }
        }

        info!(
            applied = report.applied,
            rejected = report.rejected,
            failed = report.failed,
            malformed = report.malformed,
            "script replay finished"
        );

        write_accounts_csv(&bank.accounts(), output)?;
        Ok(report)
    }
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}
