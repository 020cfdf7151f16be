//! DayToken CLI - Command-line interface for the DayToken client
//!
//! Binds the token lifecycle engine, the authorization workflow, and the
//! enrolled credential registry to subcommands for local use and testing.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "daytoken")]
#[command(about = "Rotating day-token credentials and operation authorization", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the token ticker and display the rotating credential
    Show {
        /// Cycle length in seconds
        #[arg(long)]
        cycle: Option<f64>,

        /// Tick cadence in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Path to a service config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate a single token value and exit
    Generate {
        /// Number of decimal digits
        #[arg(long, default_value_t = daytoken_core::TOKEN_WIDTH)]
        width: usize,
    },

    /// Decide a pending operation
    Authorize {
        /// Operation identifier
        #[arg(long, default_value = "op-1")]
        id: String,

        /// Operation title, e.g. "TED transfer"
        #[arg(long)]
        title: String,

        /// Debit account label
        #[arg(long)]
        debit_account: String,

        /// Beneficiary label
        #[arg(long)]
        beneficiary: String,

        /// Bank line label
        #[arg(long)]
        bank_line: String,

        /// Amount label, e.g. "R$ 10.000,00"
        #[arg(long)]
        amount: String,

        /// The decision to apply
        #[arg(long, value_enum)]
        decision: DecisionArg,
    },

    /// Enrolled credential registry
    #[command(subcommand)]
    Credential(CredentialCommands),

    /// Print the operation status history
    History {
        /// JSON file holding the feed; built-in sample when omitted
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CredentialCommands {
    /// List enrolled identifiers
    List,

    /// Enroll an identifier
    Enroll {
        /// The identifier, e.g. "012.345.678-90"
        identifier: String,

        #[arg(long, value_enum, default_value = "national-id")]
        kind: KindArg,

        /// Trailing digits of the active token
        #[arg(long)]
        token_suffix: String,
    },

    /// Remove an enrolled identifier
    Remove {
        identifier: String,

        #[arg(long, value_enum, default_value = "national-id")]
        kind: KindArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum DecisionArg {
    Authorize,
    Cancel,
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    NationalId,
    UserCode,
}

impl From<KindArg> for daytoken_core::IdentifierKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::NationalId => daytoken_core::IdentifierKind::NationalId,
            KindArg::UserCode => daytoken_core::IdentifierKind::UserCode,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daytoken=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            cycle,
            interval_ms,
            config,
        } => commands::show(cycle, interval_ms, config).await,
        Commands::Generate { width } => commands::generate(width),
        Commands::Authorize {
            id,
            title,
            debit_account,
            beneficiary,
            bank_line,
            amount,
            decision,
        } => commands::authorize(
            daytoken_core::Operation {
                id,
                title,
                debit_account,
                beneficiary,
                bank_line,
                amount,
            },
            decision,
        ),
        Commands::Credential(command) => match command {
            CredentialCommands::List => commands::credential_list(),
            CredentialCommands::Enroll {
                identifier,
                kind,
                token_suffix,
            } => commands::credential_enroll(identifier, kind.into(), token_suffix),
            CredentialCommands::Remove { identifier, kind } => {
                commands::credential_remove(identifier, kind.into())
            }
        },
        Commands::History { path } => commands::history(path),
    }
}
