//! txmeta CLI — transaction metadata from the terminal.
//!
//! # Commands
//! ```text
//! txmeta resolve  --prefix 0xa9059cbb | --data 0xa9059cbb... [--signatures sigs.json]
//! txmeta status   --tx '{"status":"confirmed","type":"cancel"}' | --file tx.json
//! txmeta title    --category transfer [--messages messages.json]
//! txmeta explorer --network 1 --hash 0xabc [--explorer-url https://x.io]
//! txmeta prefix   --data 0xa9059cbb...
//! txmeta token    --data 0xa9059cbb...
//! txmeta latest   --file txs.json --nonce 0x5
//! txmeta sum      0x5208 0x5208
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use txmeta_core::{
    category_title, explorer_url_for, four_byte_prefix_of, is_token_method_category,
    latest_submitted_with_nonce, status_key_of, RpcPrefs, TransactionCategory, TransactionRecord,
};
use txmeta_evm::{bundled_registry, load_signatures_json, sum_hexes, SignatureResolver, TokenDataDecoder};

mod config;
mod logging;

use config::{Messages, TxmetaConfig};

#[derive(Parser)]
#[command(
    name = "txmeta",
    about = "Transaction metadata for wallet views — method names, status keys, explorer links",
    version
)]
struct Cli {
    /// JSON config file (resolver + log settings)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging for txmeta crates
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a 4-byte selector into a method name and params
    Resolve {
        /// 4-byte prefix, e.g. 0xa9059cbb
        #[arg(long, conflicts_with = "data", required_unless_present = "data")]
        prefix: Option<String>,
        /// Full call data; the prefix is extracted from it
        #[arg(long)]
        data: Option<String>,
        /// JSON array of extra text signatures, e.g. ["setURI(string)"]
        #[arg(long)]
        signatures: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive the status key of a transaction record
    Status {
        /// Transaction record as inline JSON
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        tx: Option<String>,
        /// File containing the transaction record JSON
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Translated title for a transaction category
    Title {
        #[arg(long)]
        category: String,
        /// Wallet messages.json used for translation
        #[arg(long)]
        messages: Option<PathBuf>,
    },

    /// Block explorer URL for a transaction
    Explorer {
        #[arg(long)]
        network: u64,
        #[arg(long)]
        hash: String,
        /// Custom explorer base URL (overrides the built-in table)
        #[arg(long)]
        explorer_url: Option<String>,
    },

    /// Print the 4-byte prefix of call data
    Prefix {
        #[arg(long)]
        data: String,
    },

    /// Decode ERC-20 token call data
    Token {
        #[arg(long)]
        data: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Latest submitted transaction with a nonce
    Latest {
        /// File containing a JSON array of transaction records
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        nonce: String,
    },

    /// Sum hex quantities
    Sum {
        #[arg(required = true)]
        values: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = TxmetaConfig::load(cli.config.as_deref())?;
    let mut log = cfg.log.clone();
    if cli.verbose {
        log.components.insert("txmeta_core".into(), "debug".into());
        log.components.insert("txmeta_evm".into(), "debug".into());
    }
    logging::init_tracing(&log);
    debug!(config = ?cli.config, fallback = cfg.resolver.fallback_enabled, "configuration loaded");

    match cli.command {
        Commands::Resolve { prefix, data, signatures, json } => {
            let prefix = match (prefix, data) {
                (Some(p), _) => p,
                (None, Some(d)) => four_byte_prefix_of(&d),
                (None, None) => bail!("--prefix or --data is required"),
            };
            cmd_resolve(&cfg, &prefix, signatures.as_deref(), json).await
        }
        Commands::Status { tx, file } => cmd_status(tx, file.as_deref()),
        Commands::Title { category, messages } => cmd_title(&category, messages.as_deref()),
        Commands::Explorer { network, hash, explorer_url } => {
            let prefs = RpcPrefs {
                block_explorer_url: explorer_url,
            };
            let url = explorer_url_for(network, &hash, &prefs);
            if url.is_empty() {
                eprintln!("No known block explorer for network {network}");
            } else {
                println!("{url}");
            }
            Ok(())
        }
        Commands::Prefix { data } => {
            println!("{}", four_byte_prefix_of(&data));
            Ok(())
        }
        Commands::Token { data, json } => cmd_token(&data, json),
        Commands::Latest { file, nonce } => cmd_latest(&file, &nonce),
        Commands::Sum { values } => {
            println!("{}", sum_hexes(values.as_slice())?);
            Ok(())
        }
    }
}

async fn cmd_resolve(
    cfg: &TxmetaConfig,
    prefix: &str,
    signatures: Option<&Path>,
    json: bool,
) -> Result<()> {
    let registry = bundled_registry();
    if let Some(path) = signatures {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let count = load_signatures_json(&registry, &content)
            .with_context(|| format!("invalid signatures JSON in {}", path.display()))?;
        debug!(count, file = %path.display(), "loaded signatures");
    }
    let resolver = SignatureResolver::with_registry(&cfg.resolver, registry)
        .context("failed to build signature resolver")?;

    let method = resolver.resolve(prefix).await;
    if json {
        // `{}` for an unknown selector, matching the wallet's empty result.
        let value = match &method {
            Some(m) => serde_json::to_value(m)?,
            None => serde_json::json!({}),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match method {
        Some(m) => {
            println!("{}", m.name);
            for (i, p) in m.params.iter().enumerate() {
                println!("  [{i}] {}", p.ty);
            }
        }
        None => println!("Unknown method {prefix}"),
    }
    Ok(())
}

fn cmd_status(inline: Option<String>, file: Option<&Path>) -> Result<()> {
    let json = match (inline, file) {
        (Some(s), _) => s,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        (None, None) => bail!("--tx or --file is required"),
    };
    let tx: TransactionRecord =
        serde_json::from_str(&json).context("invalid transaction record JSON")?;
    println!("{}", status_key_of(&tx));
    Ok(())
}

fn cmd_title(category: &str, messages: Option<&Path>) -> Result<()> {
    let messages = Messages::load(messages)?;
    let title = category_title(|key| messages.t(key), category)?;
    println!("{title}");

    if let Ok(c) = category.parse::<TransactionCategory>() {
        if is_token_method_category(c) {
            println!("  (token method)");
        }
    }
    Ok(())
}

fn cmd_token(data: &str, json: bool) -> Result<()> {
    let decoder = TokenDataDecoder::default();
    let call = decoder
        .decode(data)
        .ok_or_else(|| anyhow!("not a recognised token method call"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&call)?);
    } else {
        println!("{} ({})", call.signature, call.sighash);
        for (name, value) in &call.args {
            println!("  {name:<12} {value}");
        }
    }
    Ok(())
}

fn cmd_latest(file: &Path, nonce: &str) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let txs: Vec<TransactionRecord> =
        serde_json::from_str(&content).context("expected a JSON array of transaction records")?;

    match latest_submitted_with_nonce(&txs, nonce) {
        Some(tx) => println!("{}", serde_json::to_string_pretty(tx)?),
        None => println!("{{}}"),
    }
    Ok(())
}
