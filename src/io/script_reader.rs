//! Script reader with iterator interface
//!
//! Provides a streaming iterator over the entries of a replay script.
//! Delegates CSV format concerns to the csv_format module.
//!
//! ```no_run
//! use bank_ledger::io::script_reader::ScriptReader;
//! use std::path::Path;
//!
//! let reader = ScriptReader::open(Path::new("operations.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(entry) => println!("{:?}", entry.command),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `open()`
//! - Individual row errors are yielded as Err variants with the line number

use crate::io::csv_format::{convert_script_row, ScriptEntry, ScriptRow};
use crate::types::LedgerError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Streaming reader over script entries
#[derive(Debug)]
pub struct ScriptReader<R: Read> {
    reader: csv::Reader<R>,
}

impl ScriptReader<File> {
    /// Open a script file
    ///
    /// # Errors
    ///
    /// * `LedgerError::FileNotFound` if the path does not exist
    /// * `LedgerError::IoError` for any other open failure
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LedgerError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LedgerError::from(e),
        })?;

        Ok(Self::from_reader(file))
    }
}

impl<R: Read> ScriptReader<R> {
    /// Wrap any reader
    ///
    /// The CSV reader is configured to trim whitespace from all fields and
    /// to accept rows with fewer columns than the header.
    pub fn from_reader(input: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(input);

        Self { reader }
    }
}

impl<R: Read> Iterator for ScriptReader<R> {
    type Item = Result<ScriptEntry, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut row = csv::StringRecord::new();

        match self.reader.read_record(&mut row) {
            Ok(false) => None,
            Ok(true) => {
                let line = row.position().map(|pos| pos.line());
                let headers = match self.reader.headers() {
                    Ok(headers) => headers.clone(),
                    Err(e) => return Some(Err(LedgerError::from(e))),
                };

                Some(
                    row.deserialize::<ScriptRow>(Some(&headers))
                        .map_err(LedgerError::from)
                        .and_then(|script_row| {
                            convert_script_row(script_row)
                                .map_err(|message| LedgerError::parse_error(line, message))
                        }),
                )
            }
            Err(e) => Some(Err(LedgerError::from(e))),
        }
    }
}
