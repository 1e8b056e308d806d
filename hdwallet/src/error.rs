//! Error types for core wallet operations.

use std::fmt;

/// Errors that can occur during seed, path, or encoding operations.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Mnemonic failed wordlist or checksum validation.
    Mnemonic(bip39::Error),
    /// Derivation path does not have exactly five levels.
    InvalidSegmentCount(usize),
    /// A derivation path level is not a valid index.
    InvalidPathSegment(String),
    /// Invalid Base58 or Bech32 data.
    InvalidEncoding,
    /// Base58Check checksum mismatch.
    InvalidChecksum,
    /// Input has the wrong length.
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mnemonic(e) => write!(f, "invalid mnemonic: {e}"),
            Self::InvalidSegmentCount(n) => {
                write!(f, "derivation path has {n} levels, expected 5")
            }
            Self::InvalidPathSegment(s) => write!(f, "invalid derivation path segment \"{s}\""),
            Self::InvalidEncoding => write!(f, "invalid encoding"),
            Self::InvalidChecksum => write!(f, "checksum mismatch"),
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected} bytes, got {actual}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mnemonic(e) => Some(e),
            Self::InvalidSegmentCount(_)
            | Self::InvalidPathSegment(_)
            | Self::InvalidEncoding
            | Self::InvalidChecksum
            | Self::InvalidLength { .. } => None,
        }
    }
}

impl From<bip39::Error> for Error {
    fn from(err: bip39::Error) -> Self {
        Self::Mnemonic(err)
    }
}

/// A convenient Result type alias for core operations.
pub type Result<T> = core::result::Result<T, Error>;
