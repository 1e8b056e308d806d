//! # hdwallet - chain-agnostic HD wallet primitives
//!
//! Building blocks shared by the chain-specific crates:
//!
//! - [`seed`]: BIP-39 mnemonic to seed, with an explicit wordlist
//! - [`hdpath`]: five-level BIP-44 derivation paths
//! - [`hash`]: SHA-256, RIPEMD-160, Hash160 and BIP-340 tagged hashes
//! - [`encoding`]: Base58Check and Bech32/Bech32m

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
    clippy::doc_markdown,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#![forbid(unsafe_code)]

pub mod encoding;
pub mod error;
pub mod hash;
pub mod hdpath;
pub mod seed;

pub use error::{Error, Result};
pub use hdpath::{ChildIndex, DerivationPath, PATH_LEVELS};
pub use seed::{ParseWordlistError, Seed, Wordlist, seed_from_mnemonic};
