//! Member Ledger CLI - local membership and payment tracking.
//!
//! # Usage
//!
//! ```bash
//! # Create an account, then sign in
//! member-ledger sign-up -u ada -e ada@example.com -p secret1 --confirm-password secret1 --accept-terms
//! member-ledger sign-in -u ada -e ada@example.com -p secret1 --remember
//!
//! # Manage members and payments
//! member-ledger members add -n "Ada Lovelace" -d 1815-12-10 --description "Founder"
//! member-ledger payments add -n "March dues" -a 25 -m "Mobile Money"
//! member-ledger payments list --sort amount-desc
//! ```
//!
//! # Commands
//!
//! - `sign-up` / `sign-in` / `sign-out` / `whoami` - Accounts and session
//! - `dashboard` - Greeting and totals
//! - `members` - List, add, edit and remove members
//! - `payments` - List, add, edit and remove payments
//! - `theme` - Show, set or toggle the theme
//!
//! Everything except the account commands requires a signed-in session.
//! Data lives in `MEMBER_LEDGER_DATA_DIR` (default `.member-ledger`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use member_ledger::LedgerConfig;
use member_ledger_core::{MemberSortKey, PaymentSortKey, SortSpec, Theme};

mod commands;

use commands::{CommandError, Target};

#[derive(Parser)]
#[command(name = "member-ledger")]
#[command(author, version, about = "Track members and payments locally")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    SignUp(commands::auth::SignUpArgs),
    /// Sign in
    SignIn(commands::auth::SignInArgs),
    /// Sign out
    SignOut,
    /// Show who is signed in
    Whoami,
    /// Show the dashboard summary
    Dashboard,
    /// Manage members
    Members {
        #[command(subcommand)]
        action: MemberAction,
    },
    /// Manage payments
    Payments {
        #[command(subcommand)]
        action: PaymentAction,
    },
    /// Dashboard theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum MemberAction {
    /// List members
    List {
        /// Case-insensitive match on name or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// `name-asc` or `name-desc`
        #[arg(long, default_value = "name-asc")]
        sort: SortSpec<MemberSortKey>,
    },
    /// Add a member
    Add(commands::members::AddArgs),
    /// Edit a member
    Edit(commands::members::EditArgs),
    /// Remove a member
    Remove(Target),
}

#[derive(Subcommand)]
enum PaymentAction {
    /// List payments
    List {
        /// Case-insensitive match on name or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// `name-asc`, `name-desc`, `amount-asc` or `amount-desc`
        #[arg(long, default_value = "name-asc")]
        sort: SortSpec<PaymentSortKey>,
    },
    /// Record a payment
    Add(commands::payments::AddArgs),
    /// Edit a payment
    Edit(commands::payments::EditArgs),
    /// Remove a payment
    Remove(Target),
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Set the theme (`dark` or `light`)
    Set { theme: Theme },
    /// Switch between dark and light
    Toggle,
}

fn main() {
    let cli = Cli::parse();

    let config = match LedgerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&LedgerConfig::default().log_filter, cli.log_json);
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_filter, cli.log_json);

    if let Err(e) = run(cli, &config) {
        if e.is_user_error() {
            tracing::error!("{e}");
        } else {
            tracing::error!(error = ?e, "Command failed: {e}");
        }
        std::process::exit(1);
    }
}

/// Log to stderr so command output on stdout stays clean.
fn init_tracing(filter: &str, json: bool) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli, config: &LedgerConfig) -> Result<(), CommandError> {
    let store = config.open_store()?;
    tracing::debug!(data_dir = %store.root().display(), "Opened store");

    match cli.command {
        Commands::SignUp(args) => commands::auth::sign_up(&store, args)?,
        Commands::SignIn(args) => commands::auth::sign_in(&store, args)?,
        Commands::SignOut => commands::auth::sign_out(&store)?,
        Commands::Whoami => commands::auth::whoami(&store)?,
        Commands::Dashboard => commands::dashboard::show(&store)?,
        Commands::Members { action } => match action {
            MemberAction::List { search, sort } => {
                commands::members::list(&store, &search, sort)?;
            }
            MemberAction::Add(args) => commands::members::add(&store, args)?,
            MemberAction::Edit(args) => commands::members::edit(&store, args)?,
            MemberAction::Remove(target) => commands::members::remove(&store, &target)?,
        },
        Commands::Payments { action } => match action {
            PaymentAction::List { search, sort } => {
                commands::payments::list(&store, &search, sort)?;
            }
            PaymentAction::Add(args) => commands::payments::add(&store, args)?,
            PaymentAction::Edit(args) => commands::payments::edit(&store, args)?,
            PaymentAction::Remove(target) => commands::payments::remove(&store, &target)?,
        },
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::theme::show(&store)?,
            ThemeAction::Set { theme } => commands::theme::set(&store, theme)?,
            ThemeAction::Toggle => commands::theme::toggle(&store)?,
        },
    }
    Ok(())
}
