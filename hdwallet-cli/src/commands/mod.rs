//! CLI command definitions and handlers.

mod derive;
mod path;
mod xpub;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hdwallet::{ChildIndex, Wordlist};
use hdwallet_btc::{AddressFormat, KeyOptions, Network};

pub use derive::DeriveCommand;
pub use path::PathCommand;
pub use xpub::XpubCommand;

/// hdwallet - derive Bitcoin HD keys and addresses from a mnemonic.
#[derive(Parser)]
#[command(name = "hdwallet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Derive addresses and private keys from a mnemonic.
    Derive(DeriveCommand),

    /// Parse and normalize a five-level derivation path.
    Path(PathCommand),

    /// Show account-level extended keys.
    Xpub(XpubCommand),
}

/// Mnemonic and network arguments shared by the key commands.
#[derive(Args)]
pub struct KeySource {
    /// BIP39 mnemonic phrase.
    #[arg(short, long)]
    mnemonic: String,

    /// BIP39 passphrase (if used when creating).
    #[arg(short, long)]
    passphrase: Option<String>,

    /// Wordlist the mnemonic is written in.
    #[arg(short, long, value_enum, default_value = "english")]
    wordlist: CliWordlist,

    /// Network to derive for.
    #[arg(short, long, value_enum, default_value = "mainnet")]
    network: CliNetwork,
}

impl KeySource {
    /// Key options for this source.
    pub fn options(&self) -> KeyOptions {
        KeyOptions::from_mnemonic(self.mnemonic.as_str())
            .with_passphrase(self.passphrase.as_deref().unwrap_or_default())
            .with_wordlist(self.wordlist.into())
            .with_network(self.network.into())
    }

    /// Whether a passphrase was given.
    pub fn has_passphrase(&self) -> bool {
        self.passphrase.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Parser for non-hardened child indices.
fn index_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(..i64::from(ChildIndex::HARDENED_OFFSET))
}

#[derive(Clone, Copy, ValueEnum)]
enum CliWordlist {
    /// English
    English,
    /// Simplified Chinese
    ChineseSimplified,
    /// Traditional Chinese
    ChineseTraditional,
}

impl From<CliWordlist> for Wordlist {
    fn from(val: CliWordlist) -> Self {
        match val {
            CliWordlist::English => Self::English,
            CliWordlist::ChineseSimplified => Self::ChineseSimplified,
            CliWordlist::ChineseTraditional => Self::ChineseTraditional,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliNetwork {
    /// Bitcoin mainnet
    Mainnet,
    /// Bitcoin testnet
    Testnet,
    /// Local regtest
    Regtest,
}

impl From<CliNetwork> for Network {
    fn from(val: CliNetwork) -> Self {
        match val {
            CliNetwork::Mainnet => Self::Mainnet,
            CliNetwork::Testnet => Self::Testnet,
            CliNetwork::Regtest => Self::Regtest,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliAddressFormat {
    /// Legacy P2PKH (starts with 1)
    Legacy,
    /// Nested `SegWit` P2SH-P2WPKH (starts with 3)
    NestedSegwit,
    /// Native `SegWit` P2WPKH (starts with bc1q)
    NativeSegwit,
    /// Taproot P2TR (starts with bc1p)
    Taproot,
}

impl From<CliAddressFormat> for AddressFormat {
    fn from(val: CliAddressFormat) -> Self {
        match val {
            CliAddressFormat::Legacy => Self::Legacy,
            CliAddressFormat::NestedSegwit => Self::NestedSegwit,
            CliAddressFormat::NativeSegwit => Self::NativeSegwit,
            CliAddressFormat::Taproot => Self::Taproot,
        }
    }
}
