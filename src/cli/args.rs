//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Findash - Financial dashboard client
///
/// Talks to the dashboard backend with cached reads and a
/// self-refreshing login session.
#[derive(Parser, Debug)]
#[command(name = "findash")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FINDASH_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to a brokerage provider
    Login(LoginArgs),

    /// Log out and clear the stored session
    Logout,

    /// Show session and configuration status
    Status,

    /// Cross-account dashboard views
    Dashboard(DashboardArgs),

    /// Portfolio views and updates
    Portfolio(PortfolioArgs),

    /// Market quotes and history
    Market(MarketArgs),

    /// Manage linked accounts
    Accounts(AccountsArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Brokerage providers that can authenticate a session
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProviderArg {
    Schwab,
    Fidelity,
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Provider to authenticate with
    #[arg(value_enum)]
    pub provider: ProviderArg,

    /// Username (prompted interactively when omitted)
    #[arg(short, long, env = "FINDASH_USERNAME")]
    pub username: Option<String>,

    /// Password (prompted interactively when omitted)
    #[arg(short, long, env = "FINDASH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Create the backend user before logging in
    #[arg(long)]
    pub register: bool,

    /// Email for registration (prompted interactively when omitted)
    #[arg(short, long, env = "FINDASH_EMAIL")]
    pub email: Option<String>,
}

/// Arguments for the dashboard command
#[derive(Parser, Debug)]
pub struct DashboardArgs {
    /// Subcommand for dashboard; defaults to the summary view
    #[command(subcommand)]
    pub action: Option<DashboardAction>,
}

/// Dashboard subcommands
#[derive(Subcommand, Debug)]
pub enum DashboardAction {
    /// Show the aggregate summary across accounts
    Summary,

    /// Show portfolio value over time
    History {
        /// Number of days of history
        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },

    /// Show asset allocation by type
    Allocation,

    /// Show recent transactions across accounts
    Activity {
        /// Maximum number of entries
        #[arg(short, long, default_value_t = 5)]
        limit: u32,
    },
}

/// Arguments for the portfolio command
#[derive(Parser, Debug)]
pub struct PortfolioArgs {
    /// Subcommand for portfolio
    #[command(subcommand)]
    pub action: PortfolioAction,
}

/// Portfolio subcommands
#[derive(Subcommand, Debug)]
pub enum PortfolioAction {
    /// Show the aggregate summary for an account
    Summary {
        /// Account ID
        account: i64,
    },

    /// List holdings for an account
    Holdings {
        /// Account ID
        account: i64,
    },

    /// List transactions for an account
    Transactions {
        /// Account ID
        account: i64,
    },

    /// Record a buy or sell transaction
    Record {
        /// Account ID
        account: i64,

        /// Ticker symbol
        symbol: String,

        /// Transaction side
        #[arg(value_enum)]
        side: SideArg,

        /// Number of shares
        #[arg(short, long)]
        quantity: f64,

        /// Price per share
        #[arg(short, long)]
        price: f64,
    },
}

/// Buy/sell side for recorded transactions
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SideArg {
    Buy,
    Sell,
}

/// Arguments for the market command
#[derive(Parser, Debug)]
pub struct MarketArgs {
    /// Subcommand for market
    #[command(subcommand)]
    pub action: MarketAction,
}

/// Market subcommands
#[derive(Subcommand, Debug)]
pub enum MarketAction {
    /// Quote a single symbol
    Quote {
        /// Ticker symbol
        symbol: String,
    },

    /// Show the top-line index summary
    Summary,

    /// Show price history for a symbol
    History {
        /// Ticker symbol
        symbol: String,

        /// History range (1d, 1w, 1m, 1y)
        #[arg(short, long, default_value = "1m")]
        range: String,
    },
}

/// Arguments for the accounts command
#[derive(Parser, Debug)]
pub struct AccountsArgs {
    /// Subcommand for accounts
    #[command(subcommand)]
    pub action: AccountsAction,
}

/// Accounts subcommands
#[derive(Subcommand, Debug)]
pub enum AccountsAction {
    /// List all accounts
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show a single account
    Show {
        /// Account ID
        id: i64,
    },

    /// Create an account
    Create {
        /// Account name
        name: String,

        /// Account type (brokerage, retirement, ...)
        #[arg(short = 't', long, default_value = "brokerage")]
        account_type: String,

        /// Currency code
        #[arg(long, default_value = "USD")]
        currency: String,
    },

    /// Delete an account
    Delete {
        /// Account ID
        id: i64,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_login() {
        let cli = Cli::parse_from(["findash", "login", "schwab", "--username", "jo"]);
        match cli.command {
            Commands::Login(args) => {
                assert!(matches!(args.provider, ProviderArg::Schwab));
                assert_eq!(args.username.as_deref(), Some("jo"));
                assert!(args.password.is_none());
            }
            _ => panic!("expected Login command"),
        }
    }

    #[test]
    fn cli_parses_status() {
        let cli = Cli::parse_from(["findash", "status"]);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn cli_parses_portfolio_summary() {
        let cli = Cli::parse_from(["findash", "portfolio", "summary", "7"]);
        match cli.command {
            Commands::Portfolio(args) => {
                assert!(matches!(args.action, PortfolioAction::Summary { account: 7 }));
            }
            _ => panic!("expected Portfolio command"),
        }
    }

    #[test]
    fn cli_parses_portfolio_record() {
        let cli = Cli::parse_from([
            "findash", "portfolio", "record", "7", "VTI", "buy", "--quantity", "2.5", "--price",
            "220.10",
        ]);
        match cli.command {
            Commands::Portfolio(args) => match args.action {
                PortfolioAction::Record {
                    account,
                    symbol,
                    side,
                    quantity,
                    price,
                } => {
                    assert_eq!(account, 7);
                    assert_eq!(symbol, "VTI");
                    assert!(matches!(side, SideArg::Buy));
                    assert_eq!(quantity, 2.5);
                    assert_eq!(price, 220.10);
                }
                _ => panic!("expected Record action"),
            },
            _ => panic!("expected Portfolio command"),
        }
    }

    #[test]
    fn cli_parses_login_with_register() {
        let cli = Cli::parse_from([
            "findash", "login", "schwab", "--register", "--username", "jo", "--email",
            "jo@example.com",
        ]);
        match cli.command {
            Commands::Login(args) => {
                assert!(args.register);
                assert_eq!(args.email.as_deref(), Some("jo@example.com"));
            }
            _ => panic!("expected Login command"),
        }
    }

    #[test]
    fn cli_parses_dashboard_default_and_history() {
        let cli = Cli::parse_from(["findash", "dashboard"]);
        match cli.command {
            Commands::Dashboard(args) => assert!(args.action.is_none()),
            _ => panic!("expected Dashboard command"),
        }

        let cli = Cli::parse_from(["findash", "dashboard", "history", "--days", "90"]);
        match cli.command {
            Commands::Dashboard(args) => {
                assert!(matches!(args.action, Some(DashboardAction::History { days: 90 })));
            }
            _ => panic!("expected Dashboard command"),
        }

        let cli = Cli::parse_from(["findash", "dashboard", "activity"]);
        match cli.command {
            Commands::Dashboard(args) => {
                assert!(matches!(args.action, Some(DashboardAction::Activity { limit: 5 })));
            }
            _ => panic!("expected Dashboard command"),
        }
    }

    #[test]
    fn cli_parses_market_history_with_default_range() {
        let cli = Cli::parse_from(["findash", "market", "history", "VTI"]);
        match cli.command {
            Commands::Market(args) => match args.action {
                MarketAction::History { symbol, range } => {
                    assert_eq!(symbol, "VTI");
                    assert_eq!(range, "1m");
                }
                _ => panic!("expected History action"),
            },
            _ => panic!("expected Market command"),
        }
    }

    #[test]
    fn cli_parses_accounts_create_defaults() {
        let cli = Cli::parse_from(["findash", "accounts", "create", "Main"]);
        match cli.command {
            Commands::Accounts(args) => match args.action {
                AccountsAction::Create {
                    name,
                    account_type,
                    currency,
                } => {
                    assert_eq!(name, "Main");
                    assert_eq!(account_type, "brokerage");
                    assert_eq!(currency, "USD");
                }
                _ => panic!("expected Create action"),
            },
            _ => panic!("expected Accounts command"),
        }
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["findash", "status"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["findash", "-vv", "status"]);
        assert_eq!(cli.verbose, 2);
    }
}
