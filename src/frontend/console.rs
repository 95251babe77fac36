//! Interactive console session
//!
//! A menu loop over any `BufRead`/`Write` pair. The binary wires it to
//! stdin/stdout; tests feed it scripted input.
//!
//! Two screens exist: the main menu (register, login, list holders, quit)
//! and, once logged in, the account menu for the active account. Input
//! errors are reported and the menu is shown again. End of input ends the
//! session from any prompt.

use crate::core::{Bank, Clock};
use crate::io::format::{format_date, format_money, parse_amount, parse_birth_date, write_statement};
use crate::types::{AccountNumber, LedgerError, NationalId, AGENCY};
use std::io::{BufRead, Write};
use tracing::debug;

enum Screen {
    Main,
    Account {
        holder: NationalId,
        active: AccountNumber,
    },
}

/// What the main loop should do after handling one menu choice
enum Flow {
    Continue,
    Quit,
}

/// Console session bound to a bank
pub struct ConsoleSession<'a, C: Clock, R: BufRead, W: Write> {
    bank: &'a mut Bank<C>,
    input: R,
    output: W,
    screen: Screen,
}

impl<'a, C: Clock, R: BufRead, W: Write> ConsoleSession<'a, C, R, W> {
    pub fn new(bank: &'a mut Bank<C>, input: R, output: W) -> Self {
        ConsoleSession {
            bank,
            input,
            output,
            screen: Screen::Main,
        }
    }

    /// Run menus until the user quits or input ends
    ///
    /// # Errors
    ///
    /// Only I/O failures on the underlying reader or writer.
    pub fn run(&mut self) -> Result<(), LedgerError> {
        loop {
            let flow = match &self.screen {
                Screen::Main => self.main_menu()?,
                Screen::Account { holder, active } => {
                    let (holder, active) = (holder.clone(), *active);
                    self.account_menu(holder, active)?
                }
            };

            if let Flow::Quit = flow {
                writeln!(self.output, "Leaving the bank. See you soon!")?;
                self.output.flush()?;
                return Ok(());
            }
        }
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>, LedgerError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn main_menu(&mut self) -> Result<Flow, LedgerError> {
        writeln!(self.output)?;
        writeln!(self.output, "========== BANK ==========")?;
        writeln!(self.output, "1: Register")?;
        writeln!(self.output, "2: Login")?;
        writeln!(self.output, "3: List holders")?;
        writeln!(self.output, "4: Quit")?;
        writeln!(self.output, "==========================")?;

        let Some(choice) = self.prompt("Choose an option: ")? else {
            return Ok(Flow::Quit);
        };

        match choice.as_str() {
            "1" => self.register(),
            "2" => self.login(),
            "3" => {
                self.list_holders()?;
                Ok(Flow::Continue)
            }
            "4" => Ok(Flow::Quit),
            other => {
                debug!(choice = other, "unknown main menu option");
                writeln!(self.output, "Invalid option. Try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn register(&mut self) -> Result<Flow, LedgerError> {
        writeln!(self.output, "\n==== Holder Registration ====")?;

        let national_id = loop {
            let Some(raw) = self.prompt("National ID (digits only): ")? else {
                return Ok(Flow::Quit);
            };
            match NationalId::parse(&raw) {
                Ok(id) if self.bank.holder(&id).is_some() => {
                    writeln!(self.output, "This national ID is already registered.")?;
                }
                Ok(id) => break id,
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        };

        let Some(name) = self.prompt("Full name: ")? else {
            return Ok(Flow::Quit);
        };

        let birth_date = loop {
            let Some(raw) = self.prompt("Birth date (DD/MM/YYYY): ")? else {
                return Ok(Flow::Quit);
            };
            match parse_birth_date(&raw) {
                Ok(date) => break date,
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        };

        let Some(address) = self.prompt("Address (Street, No - District - City/State): ")? else {
            return Ok(Flow::Quit);
        };

        match self
            .bank
            .register_holder(national_id.clone(), &name, birth_date, &address)
        {
            Ok(number) => {
                if let Some(holder) = self.bank.holder(&national_id) {
                    writeln!(
                        self.output,
                        "Holder '{}' registered! Agency: {}, Account: {}.",
                        holder.first_name(),
                        AGENCY,
                        number
                    )?;
                }
            }
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self) -> Result<Flow, LedgerError> {
        let Some(raw) = self.prompt("National ID: ")? else {
            return Ok(Flow::Quit);
        };

        match self.bank.login(&raw) {
            Ok(holder) => match holder.accounts.first() {
                Some(&first) => {
                    writeln!(self.output, "Welcome, {}!", holder.first_name())?;
                    self.screen = Screen::Account {
                        holder: holder.national_id.clone(),
                        active: first,
                    };
                }
                None => {
                    writeln!(self.output, "You need an account to make transactions.")?;
                }
            },
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn list_holders(&mut self) -> Result<(), LedgerError> {
        writeln!(self.output, "\n========== Registered Holders ==========")?;

        let mut any = false;
        for holder in self.bank.holders() {
            any = true;
            writeln!(self.output, "National ID: {}", holder.national_id)?;
            writeln!(self.output, "Name: {}", holder.name)?;
            writeln!(self.output, "Birth date: {}", format_date(holder.birth_date))?;
            writeln!(self.output, "Address: {}", holder.address)?;

            for number in &holder.accounts {
                if let Some(account) = self.bank.account(*number) {
                    writeln!(
                        self.output,
                        "  Agency {} | Account {} | Balance {} | Withdrawals left {} | Transactions today {}",
                        account.agency,
                        account.number,
                        format_money(account.balance),
                        account.daily.withdrawals_left,
                        account.daily.transactions_today
                    )?;
                }
            }
            writeln!(self.output, "========================================")?;
        }

        if !any {
            writeln!(self.output, "No holders registered.")?;
        }
        Ok(())
    }

    fn account_menu(&mut self, holder: NationalId, active: AccountNumber) -> Result<Flow, LedgerError> {
        if self.bank.reset_if_new_day(active).is_err() {
            self.screen = Screen::Main;
            return Ok(Flow::Continue);
        }

        let daily_transactions = self.bank.config().daily_transactions;
        let Some(account) = self.bank.account(active) else {
            self.screen = Screen::Main;
            return Ok(Flow::Continue);
        };

        writeln!(self.output)?;
        writeln!(
            self.output,
            "========== ACCOUNT {}/{} ==========",
            account.agency, account.number
        )?;
        writeln!(self.output, "Holder: {}", account.holder_name)?;
        writeln!(self.output, "Balance: {}", format_money(account.balance))?;
        writeln!(
            self.output,
            "Withdrawals left today: {}",
            account.daily.withdrawals_left
        )?;
        writeln!(
            self.output,
            "Transactions left today: {}",
            daily_transactions.saturating_sub(account.daily.transactions_today)
        )?;
        writeln!(self.output, "1: Deposit")?;
        writeln!(self.output, "2: Withdraw")?;
        writeln!(self.output, "3: Statement")?;
        writeln!(self.output, "4: Open new account")?;
        writeln!(self.output, "5: Switch account")?;
        writeln!(self.output, "6: Logout")?;

        let Some(choice) = self.prompt("Choose an option: ")? else {
            return Ok(Flow::Quit);
        };

        match choice.as_str() {
            "1" => self.deposit(active),
            "2" => self.withdraw(active),
            "3" => {
                let statement = self.bank.statement(active)?;
                write_statement(&statement, &mut self.output)?;
                Ok(Flow::Continue)
            }
            "4" => {
                match self.bank.open_account(&holder) {
                    Ok(number) => writeln!(
                        self.output,
                        "Account opened! Agency: {}, Account: {}.",
                        AGENCY, number
                    )?,
                    Err(e) => writeln!(self.output, "{}", e)?,
                }
                Ok(Flow::Continue)
            }
            "5" => self.switch_account(holder),
            "6" => {
                writeln!(self.output, "Holder {} logged out.", holder)?;
                self.screen = Screen::Main;
                Ok(Flow::Continue)
            }
            _ => {
                writeln!(self.output, "Invalid option. Try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn deposit(&mut self, active: AccountNumber) -> Result<Flow, LedgerError> {
        let Some(raw) = self.prompt("Deposit amount: R$ ")? else {
            return Ok(Flow::Quit);
        };

        let message = match parse_amount(&raw) {
            Ok(amount) => match self.bank.deposit(active, amount) {
                Ok(balance) => format!("Deposit completed! Balance: {}", format_money(balance)),
                Err(e) => e.to_string(),
            },
            Err(_) => "Invalid amount! Please enter a number.".to_string(),
        };
        writeln!(self.output, "{}", message)?;
        Ok(Flow::Continue)
    }

    fn withdraw(&mut self, active: AccountNumber) -> Result<Flow, LedgerError> {
        let max = self.bank.config().max_withdrawal_amount;
        let left = self
            .bank
            .account(active)
            .map(|account| account.daily.withdrawals_left)
            .unwrap_or_default();

        let prompt = format!(
            "Withdrawal amount (max {} per withdrawal | withdrawals left: {}): R$ ",
            format_money(max),
            left
        );
        let Some(raw) = self.prompt(&prompt)? else {
            return Ok(Flow::Quit);
        };

        let message = match parse_amount(&raw) {
            Ok(amount) => match self.bank.withdraw(active, amount) {
                Ok(balance) => format!("Withdrawal completed! Balance: {}", format_money(balance)),
                Err(e) => e.to_string(),
            },
            Err(_) => "Invalid amount! Please enter a number.".to_string(),
        };
        writeln!(self.output, "{}", message)?;
        Ok(Flow::Continue)
    }

    fn switch_account(&mut self, holder: NationalId) -> Result<Flow, LedgerError> {
        let owned: Vec<AccountNumber> = match self.bank.accounts_of(&holder) {
            Ok(accounts) => accounts.iter().map(|account| account.number).collect(),
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        let listing: Vec<String> = owned.iter().map(ToString::to_string).collect();
        writeln!(self.output, "Your accounts: {}", listing.join(" | "))?;

        let Some(raw) = self.prompt("Account number: ")? else {
            return Ok(Flow::Quit);
        };

        match raw.parse::<AccountNumber>() {
            Ok(number) if owned.contains(&number) => {
                writeln!(self.output, "Now using account {}.", number)?;
                self.screen = Screen::Account {
                    holder,
                    active: number,
                };
            }
            Ok(number) => writeln!(self.output, "Account {} does not belong to you.", number)?,
            Err(_) => writeln!(self.output, "Invalid account number.")?,
        }
        Ok(Flow::Continue)
    }
}
