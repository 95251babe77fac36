//! Bank Ledger CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run                                   # interactive console
//! cargo run -- --script operations.csv > accounts.csv
//! cargo run -- --daily-withdrawals 5 --max-withdrawal-amount 1000
//! RUST_LOG=info cargo run -- --log-json
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (script not found, output not writable, etc.)

use bank_ledger::cli;
use bank_ledger::frontend::{ConsoleSession, ScriptRunner};
use bank_ledger::observability;
use bank_ledger::Bank;
use std::io;
use std::process;

fn main() {
    let args = cli::parse_args();
    observability::init(&args.log_level, args.log_json);

    let config = args.to_ledger_config();

    let result = match &args.script {
        Some(path) => {
            let mut output = io::stdout();
            ScriptRunner::new(config)
                .run_path(path, &mut output)
                .map(drop)
        }
        None => {
            let mut bank = Bank::new(config);
            let stdin = io::stdin();
            ConsoleSession::new(&mut bank, stdin.lock(), io::stdout()).run()
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
