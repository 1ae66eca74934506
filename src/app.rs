use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::Error;

mod address;
mod airdrop;
mod balance;
mod deposit;
mod init;
mod keygen;
mod show;
mod withdraw;

/// Lamports per whole unit, as a decimal scale
const UNIT_SCALE: u32 = 9;

/// A local piggybank: deposit and withdraw against a record derived from
/// your wallet
#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct App {
    /// Raise the log level (-v, -vv, -vvv)
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new wallet
    Keygen(keygen::Keygen),

    /// Print the wallet and piggybank addresses
    Address(address::Address),

    /// Mint units into the wallet
    Airdrop(airdrop::Airdrop),

    /// Create the wallet's piggybank
    Init(init::Init),

    /// Move units from the wallet into the piggybank
    Deposit(deposit::Deposit),

    /// Move units from the piggybank back to the wallet
    Withdraw(withdraw::Withdraw),

    /// Print piggybank balances
    Balance(balance::Balance),

    /// Print the configuration
    Show(show::Show),
}

impl App {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(self) -> Result<(), Error> {
        match self.command {
            Command::Keygen(cmd) => cmd.run(),
            Command::Address(cmd) => cmd.run(),
            Command::Airdrop(cmd) => cmd.run(),
            Command::Init(cmd) => cmd.run(),
            Command::Deposit(cmd) => cmd.run(),
            Command::Withdraw(cmd) => cmd.run(),
            Command::Balance(cmd) => cmd.run(),
            Command::Show(cmd) => cmd.run(),
        }
    }
}

fn format_lamports(lamports: u64) -> String {
    let units = Decimal::from_i128_with_scale(i128::from(lamports), UNIT_SCALE).normalize();
    format!("{units} SOL ({lamports} lamports)")
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0 => "0 SOL (0 lamports)"; "zero")]
    #[test_case(1 => "0.000000001 SOL (1 lamports)"; "one lamport")]
    #[test_case(1_500_000_000 => "1.5 SOL (1500000000 lamports)"; "fractional")]
    #[test_case(u64::MAX => "18446744073.709551615 SOL (18446744073709551615 lamports)"; "max")]
    fn format(lamports: u64) -> String {
        format_lamports(lamports)
    }

    #[test]
    fn parse_deposit() {
        let app = App::try_parse_from(["piggybank", "-vv", "deposit", "100"]).unwrap();
        assert_eq!(app.verbosity(), 2);
        assert!(matches!(app.command, Command::Deposit(_)));
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(App::try_parse_from(["piggybank", "withdraw", "-5"]).is_err());
    }
}
