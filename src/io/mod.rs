//! I/O module
//!
//! Handles text rendering, script parsing and summary output.
//!
//! # Components
//!
//! - `format` - Money, date and statement rendering; amount and date parsing
//! - `csv_format` - Script row conversion and account summary serialization
//! - `script_reader` - Streaming reader over replay scripts

pub mod csv_format;
pub mod format;
pub mod script_reader;

pub use csv_format::{convert_script_row, write_accounts_csv, ScriptEntry, ScriptRow};
pub use format::{format_money, parse_amount, parse_birth_date, round_cents, write_statement};
pub use script_reader::ScriptReader;
