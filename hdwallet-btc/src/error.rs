//! Error types for Bitcoin key derivation and address encoding.

use std::fmt;

/// Errors that can occur during Bitcoin wallet operations.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Seed, path, or encoding error from the core crate.
    Core(hdwallet::Error),
    /// Seed must be between 16 and 64 bytes.
    InvalidSeedLength(usize),
    /// The seed produced an out-of-range master key.
    InvalidMasterKey,
    /// Hardened derivation attempted on a public-only key.
    HardenedDerivationRequiresPrivateKey,
    /// The child at this index is invalid; derive the next index instead.
    InvalidChildKey(u32),
    /// Key is already at depth 255.
    MaxDepthExceeded,
    /// Bytes do not encode a valid secp256k1 point.
    InvalidPublicKey,
    /// Bytes do not encode a valid secp256k1 scalar.
    InvalidPrivateKey,
    /// Address encoder rejected its input.
    AddressEncoding(String),
    /// Malformed serialized extended key.
    InvalidExtendedKey(&'static str),
    /// No address encoding is implemented for this coin.
    UnsupportedCoin(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(e) => write!(f, "{e}"),
            Self::InvalidSeedLength(n) => {
                write!(f, "invalid seed length {n}, must be 16 to 64 bytes")
            }
            Self::InvalidMasterKey => write!(f, "seed produced an invalid master key"),
            Self::HardenedDerivationRequiresPrivateKey => {
                write!(f, "hardened derivation requires a private key")
            }
            Self::InvalidChildKey(i) => write!(f, "invalid child key at index {i:#010x}"),
            Self::MaxDepthExceeded => write!(f, "maximum derivation depth exceeded"),
            Self::InvalidPublicKey => write!(f, "invalid public key"),
            Self::InvalidPrivateKey => write!(f, "invalid private key"),
            Self::AddressEncoding(e) => write!(f, "address encoding failed: {e}"),
            Self::InvalidExtendedKey(reason) => write!(f, "invalid extended key: {reason}"),
            Self::UnsupportedCoin(symbol) => {
                write!(f, "address encoding is not supported for {symbol}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Core(e) => Some(e),
            _ => None,
        }
    }
}

impl From<hdwallet::Error> for Error {
    fn from(err: hdwallet::Error) -> Self {
        Self::Core(err)
    }
}
