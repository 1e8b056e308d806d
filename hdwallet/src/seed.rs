//! BIP-39 seed derivation.
//!
//! Turns a mnemonic phrase and optional passphrase into the seed bytes that
//! root an HD key tree. The wordlist is always passed explicitly, so phrases
//! in different languages can be processed side by side.

use core::fmt;
use core::str::FromStr;

use bip39::{Language, Mnemonic};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::Result;

/// Wordlists accepted for mnemonic phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wordlist {
    /// BIP-39 English wordlist.
    #[default]
    English,
    /// BIP-39 Simplified Chinese wordlist.
    ChineseSimplified,
    /// BIP-39 Traditional Chinese wordlist.
    ChineseTraditional,
}

impl Wordlist {
    /// Identifier used in configuration and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::ChineseSimplified => "chinese_simplified",
            Self::ChineseTraditional => "chinese_traditional",
        }
    }

    /// The `bip39` crate language for this wordlist.
    pub const fn language(self) -> Language {
        match self {
            Self::English => Language::English,
            Self::ChineseSimplified => Language::SimplifiedChinese,
            Self::ChineseTraditional => Language::TraditionalChinese,
        }
    }
}

impl fmt::Display for Wordlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown wordlist name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseWordlistError;

impl fmt::Display for ParseWordlistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid wordlist, expected: english, chinese_simplified, or chinese_traditional"
        )
    }
}

impl std::error::Error for ParseWordlistError {}

impl FromStr for Wordlist {
    type Err = ParseWordlistError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "english" | "en" => Ok(Self::English),
            "chinese_simplified" | "zh_hans" => Ok(Self::ChineseSimplified),
            "chinese_traditional" | "zh_hant" => Ok(Self::ChineseTraditional),
            _ => Err(ParseWordlistError),
        }
    }
}

/// Root entropy of an HD key tree.
///
/// The bytes are wiped when the seed is dropped.
#[derive(Clone)]
pub struct Seed {
    bytes: Zeroizing<Vec<u8>>,
}

impl Seed {
    /// Wrap existing seed bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.to_vec()),
        }
    }

    /// Derive a seed from a mnemonic phrase.
    ///
    /// Every word must belong to `wordlist` and the phrase checksum must
    /// verify; otherwise [`crate::Error::Mnemonic`] is returned.
    pub fn from_mnemonic(mnemonic: &str, passphrase: &str, wordlist: Wordlist) -> Result<Self> {
        let mnemonic = Mnemonic::parse_in(wordlist.language(), mnemonic)?;
        let seed = Zeroizing::new(mnemonic.to_seed(passphrase));

        tracing::debug!(
            words = mnemonic.word_count(),
            %wordlist,
            has_passphrase = !passphrase.is_empty(),
            "derived seed from mnemonic"
        );

        Ok(Self::from_bytes(&seed[..]))
    }

    /// Borrow the seed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Seed length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the seed is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Derive the seed for `mnemonic` + `passphrase` using `wordlist`.
pub fn seed_from_mnemonic(mnemonic: &str, passphrase: &str, wordlist: Wordlist) -> Result<Seed> {
    Seed::from_mnemonic(mnemonic, passphrase, wordlist)
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed<{}>[REDACTED]", self.len())
    }
}

impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes().ct_eq(other.as_bytes()).into()
    }
}

impl Eq for Seed {}
