//! Bitcoin HD key derivation and address encoding.
//!
//! Builds BIP-32 key trees on top of the [`hdwallet`] primitives and
//! encodes their public keys as legacy, nested SegWit, native SegWit or
//! Taproot addresses.
//!
//! # Usage
//!
//! ```
//! use hdwallet::{Wordlist, seed_from_mnemonic};
//! use hdwallet_btc::{AddressFormat, AddressSpec, ExtendedKey, Network, Wallet};
//!
//! let mnemonic = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
//! let seed = seed_from_mnemonic(mnemonic, "", Wordlist::English).unwrap();
//! let master = ExtendedKey::master(seed.as_bytes(), Network::Mainnet).unwrap();
//!
//! let wallet = Wallet::from_master_key(&master, AddressSpec::bitcoin(AddressFormat::NativeSegwit)).unwrap();
//! assert_eq!(wallet.try_address().unwrap(), "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::doc_markdown
)]
#![forbid(unsafe_code)]

pub mod address;
mod deriver;
mod error;
mod extended_key;
mod network;
mod options;
mod private_key;
mod public_key;
mod wallet;

pub use address::{AddressFormat, ParseAddressFormatError, encode_address};
pub use deriver::{DerivedAddress, Deriver};
pub use error::Error;
pub use extended_key::{ExtendedKey, KeyPair, SERIALIZED_LEN};
pub use network::{Network, NetworkParams, ParseNetworkError};
pub use options::KeyOptions;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use wallet::{AddressSpec, Coin, Wallet};

/// A convenient Result type alias for hdwallet-btc operations.
pub type Result<T> = core::result::Result<T, Error>;
