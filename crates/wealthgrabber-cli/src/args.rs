use crate::types::LogLevel;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wealthgrabber")]
#[command(about = "View Wealthsimple accounts, activities and holdings", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    #[arg(long, default_value = "~/.wealthgrabber", global = true)]
    pub data_dir: String,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Show status messages while fetching
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate with Wealthsimple and save the session
    Login {
        /// Force a new login even if a valid session exists
        #[arg(short, long)]
        force: bool,

        /// Email address to log in with (defaults to the cached email, then a prompt)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Clear the stored session and optionally the cached email
    Logout {
        /// Email address to clear the session for (defaults to the cached email)
        #[arg(short, long)]
        username: Option<String>,

        /// Also clear the cached email address
        #[arg(short, long)]
        clear_email: bool,
    },

    /// List accounts with their numbers and current values
    List {
        /// Include accounts with a zero balance
        #[arg(short = 'z', long)]
        show_zero: bool,

        /// Only liquid accounts (excludes RRSP, LIRA, Private Equity, Private Credit)
        #[arg(short, long, conflicts_with = "not_liquid")]
        liquid_only: bool,

        /// Only non-liquid accounts (RRSP, LIRA, Private Equity, Private Credit)
        #[arg(short, long)]
        not_liquid: bool,

        /// Output format: table, json or csv
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List activities (transactions) for your accounts
    Activities {
        /// Only this account number (e.g. TFSA-001)
        #[arg(short, long)]
        account: Option<String>,

        /// Only dividend transactions
        #[arg(short, long)]
        dividends: bool,

        /// Maximum number of activities per account
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output format: table, json or csv
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List asset positions across your accounts
    Assets {
        /// Only positions held in this account number (e.g. TFSA-001)
        #[arg(short, long)]
        account: Option<String>,

        /// Group positions by account instead of aggregating them
        #[arg(short, long)]
        by_account: bool,

        /// Only positions with a profit (P&L > 0)
        #[arg(short, long, conflicts_with = "losses")]
        profits: bool,

        /// Only positions with a loss (P&L < 0)
        #[arg(short, long)]
        losses: bool,

        /// Output format: table, json or csv
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_liquidity_flags_conflict() {
        let result = Cli::try_parse_from(["wealthgrabber", "list", "-l", "-n"]);
        assert_eq!(
            result.err().map(|e| e.kind()),
            Some(clap::error::ErrorKind::ArgumentConflict)
        );
    }

    #[test]
    fn test_pnl_flags_conflict() {
        let result = Cli::try_parse_from(["wealthgrabber", "assets", "--profits", "--losses"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["wealthgrabber", "activities", "-a", "TFSA-001"]).unwrap();
        assert_eq!(cli.data_dir, "~/.wealthgrabber");
        assert_eq!(cli.log_level, LogLevel::Warn);
        match cli.command {
            Commands::Activities {
                account,
                dividends,
                limit,
                format,
            } => {
                assert_eq!(account.as_deref(), Some("TFSA-001"));
                assert!(!dividends);
                assert_eq!(limit, None);
                assert_eq!(format, "table");
            }
            _ => panic!("expected activities"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["wealthgrabber", "assets", "-b", "-v", "--format", "csv"])
            .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Assets { by_account: true, .. }));
    }
}
