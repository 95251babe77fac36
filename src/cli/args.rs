use crate::core::LedgerConfig;
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// In-memory bank simulation with daily withdrawal and transaction limits
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "In-memory bank simulation with daily withdrawal and transaction limits", long_about = None)]
pub struct CliArgs {
    /// Replay a CSV script instead of starting the interactive console
    #[arg(
        long = "script",
        value_name = "FILE",
        help = "Replay a CSV script of operations and print an account summary"
    )]
    pub script: Option<PathBuf>,

    /// Largest amount a single withdrawal may move
    #[arg(
        long = "max-withdrawal-amount",
        value_name = "AMOUNT",
        help = "Maximum amount per withdrawal (default: 500)"
    )]
    pub max_withdrawal_amount: Option<Decimal>,

    /// Withdrawals allowed per account per day
    #[arg(
        long = "daily-withdrawals",
        value_name = "COUNT",
        help = "Withdrawals allowed per account per day (default: 3)"
    )]
    pub daily_withdrawals: Option<u32>,

    /// Transactions allowed per account per day
    #[arg(
        long = "daily-transactions",
        value_name = "COUNT",
        help = "Deposits plus withdrawals allowed per account per day (default: 10)"
    )]
    pub daily_transactions: Option<u32>,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level when RUST_LOG is unset: error, warn, info, debug or trace"
    )]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long = "log-json", help = "Write logs to stderr as JSON")]
    pub log_json: bool,
}

impl CliArgs {
    /// Create a LedgerConfig from CLI arguments
    ///
    /// Unset limits take their default values; invalid ones fall back to
    /// the defaults inside `LedgerConfig::new`.
    pub fn to_ledger_config(&self) -> LedgerConfig {
        if self.max_withdrawal_amount.is_some()
            || self.daily_withdrawals.is_some()
            || self.daily_transactions.is_some()
        {
            let default = LedgerConfig::default();
            LedgerConfig::new(
                self.max_withdrawal_amount
                    .unwrap_or(default.max_withdrawal_amount),
                self.daily_withdrawals.unwrap_or(default.daily_withdrawals),
                self.daily_transactions.unwrap_or(default.daily_transactions),
            )
        } else {
            LedgerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::interactive(&["program"], None)]
    #[case::script(&["program", "--script", "ops.csv"], Some("ops.csv"))]
    fn test_mode_parsing(#[case] args: &[&str], #[case] expected: Option<&str>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.script, expected.map(PathBuf::from));
    }

    #[rstest]
    #[case::all_defaults(&["program"], dec!(500), 3, 10)]
    #[case::custom_amount(&["program", "--max-withdrawal-amount", "250.50"], dec!(250.50), 3, 10)]
    #[case::custom_withdrawals(&["program", "--daily-withdrawals", "5"], dec!(500), 5, 10)]
    #[case::custom_transactions(&["program", "--daily-transactions", "20"], dec!(500), 3, 20)]
    #[case::all_custom(
        &["program", "--max-withdrawal-amount", "1000", "--daily-withdrawals", "4", "--daily-transactions", "12"],
        dec!(1000),
        4,
        12
    )]
    #[case::zero_falls_back(&["program", "--daily-withdrawals", "0"], dec!(500), 3, 10)]
    fn test_ledger_config_conversion(
        #[case] args: &[&str],
        #[case] expected_amount: Decimal,
        #[case] expected_withdrawals: u32,
        #[case] expected_transactions: u32,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_ledger_config();

        assert_eq!(config.max_withdrawal_amount, expected_amount);
        assert_eq!(config.daily_withdrawals, expected_withdrawals);
        assert_eq!(config.daily_transactions, expected_transactions);
    }

    #[test]
    fn test_logging_options() {
        let parsed = CliArgs::try_parse_from(["program"]).unwrap();
        assert_eq!(parsed.log_level, "warn");
        assert!(!parsed.log_json);

        let parsed =
            CliArgs::try_parse_from(["program", "--log-level", "debug", "--log-json"]).unwrap();
        assert_eq!(parsed.log_level, "debug");
        assert!(parsed.log_json);
    }

    #[rstest]
    #[case::bad_amount(&["program", "--max-withdrawal-amount", "lots"])]
    #[case::negative_count(&["program", "--daily-withdrawals", "-1"])]
    #[case::unknown_flag(&["program", "--currency", "usd"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
