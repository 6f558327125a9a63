//! Gavel operator CLI: keys, accounts and offline signatures for a token ledger.

mod commands;

use anyhow::Context;
use clap::Parser;
use gavel_ledger::TokenConfig;
use gavel_utils::{init_logging, LogFormat};
use serde::Serialize;
use std::path::PathBuf;

use commands::{DelegationArgs, PermitArgs};

#[derive(Parser)]
#[command(name = "gavel", about = "Gavel governance token operator tool")]
struct Cli {
    /// Path to a TOML token configuration. CLI flags and env vars override it.
    #[arg(long, env = "GAVEL_CONFIG")]
    config: Option<PathBuf>,

    /// Chain id bound into signatures (defaults to the config value).
    #[arg(long, env = "GAVEL_CHAIN_ID")]
    chain_id: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "GAVEL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "GAVEL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a key pair and its account id.
    Keygen {
        /// 32-byte hex seed for a deterministic key.
        #[arg(long)]
        seed: Option<String>,
    },
    /// Derive the account id of a public key.
    Account {
        #[arg(long)]
        public_key: String,
    },
    /// Show the signing domain of a deployed ledger.
    Domain {
        /// Account id of the ledger.
        #[arg(long)]
        ledger: String,
    },
    /// Sign a permit granting an allowance.
    SignPermit {
        #[arg(long, env = "GAVEL_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
        #[arg(long)]
        ledger: String,
        #[arg(long)]
        spender: String,
        /// Decimal token amount, e.g. "250" or "0.5".
        #[arg(long)]
        value: String,
        /// The owner's current nonce on the ledger.
        #[arg(long)]
        nonce: u64,
        /// Unix time after which the permit is void.
        #[arg(long)]
        deadline: u64,
    },
    /// Sign a vote delegation.
    SignDelegation {
        #[arg(long, env = "GAVEL_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
        #[arg(long)]
        ledger: String,
        #[arg(long)]
        delegatee: String,
        #[arg(long)]
        nonce: u64,
        #[arg(long)]
        expiry: u64,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<TokenConfig> {
    let mut config = match &cli.config {
        Some(path) => TokenConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => TokenConfig::default(),
    };
    if let Some(chain_id) = cli.chain_id {
        config.chain_id = chain_id;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), chain_id = config.chain_id, "loaded config");
    }

    match &cli.command {
        Command::Keygen { seed } => print_json(&commands::keygen(seed.as_deref())?),
        Command::Account { public_key } => print_json(&commands::account(public_key)?),
        Command::Domain { ledger } => print_json(&commands::domain(&config, ledger)?),
        Command::SignPermit {
            private_key,
            ledger,
            spender,
            value,
            nonce,
            deadline,
        } => print_json(&commands::sign_permit(
            &config,
            &PermitArgs {
                private_key,
                ledger,
                spender,
                value,
                nonce: *nonce,
                deadline: *deadline,
            },
        )?),
        Command::SignDelegation {
            private_key,
            ledger,
            delegatee,
            nonce,
            expiry,
        } => print_json(&commands::sign_delegation(
            &config,
            &DelegationArgs {
                private_key,
                ledger,
                delegatee,
                nonce: *nonce,
                expiry: *expiry,
            },
        )?),
    }
}
