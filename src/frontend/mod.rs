//! Front-ends driving the ledger
//!
//! - `console` - Interactive menu session over a reader/writer pair
//! - `script` - Non-interactive replay of a CSV script with a CSV summary

pub mod console;
pub mod script;

pub use console::ConsoleSession;
pub use script::{ReplayReport, ScriptRunner};
