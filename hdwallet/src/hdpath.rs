//! BIP-44 derivation paths.
//!
//! A path has exactly five levels,
//! `m / purpose' / coin_type' / account' / change / address_index`,
//! each stored as a raw 32-bit BIP-32 index whose high bit marks hardened
//! derivation.

use core::fmt;
use core::num::IntErrorKind;
use core::str::FromStr;

use crate::error::{Error, Result};

/// Number of levels in a BIP-44 path.
pub const PATH_LEVELS: usize = 5;

/// A child index in a derivation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildIndex {
    /// Normal (non-hardened) index: 0 to 2^31 - 1
    Normal(u32),
    /// Hardened index: displayed as n', stored as n
    Hardened(u32),
}

impl ChildIndex {
    /// The offset for hardened indices (2^31).
    pub const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Check if the encoded index is hardened (at or above 2^31).
    ///
    /// `Normal(0x8000_0000)` counts as hardened, like `Hardened(0)`.
    pub const fn is_hardened(&self) -> bool {
        self.to_u32() >= Self::HARDENED_OFFSET
    }

    /// Get the index value without the hardened flag.
    pub const fn index(&self) -> u32 {
        match self {
            Self::Normal(i) | Self::Hardened(i) => *i,
        }
    }

    /// Convert to the raw u32 value used in BIP-32 derivation.
    pub const fn to_u32(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => *i | Self::HARDENED_OFFSET,
        }
    }
}

impl From<u32> for ChildIndex {
    fn from(value: u32) -> Self {
        if value >= Self::HARDENED_OFFSET {
            Self::Hardened(value & !Self::HARDENED_OFFSET)
        } else {
            Self::Normal(value)
        }
    }
}

impl From<ChildIndex> for u32 {
    fn from(index: ChildIndex) -> Self {
        index.to_u32()
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{i}"),
            Self::Hardened(i) => write!(f, "{i}'"),
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (digits, hardened) = match s.strip_suffix('\'') {
            Some(digits) => (digits, true),
            None => (s, false),
        };

        let index: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidPathSegment(s.to_string()))?;
        if index >= Self::HARDENED_OFFSET {
            return Err(Error::InvalidPathSegment(s.to_string()));
        }

        Ok(if hardened {
            Self::Hardened(index)
        } else {
            Self::Normal(index)
        })
    }
}

/// A five-level BIP-44 derivation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: [u32; PATH_LEVELS],
}

impl DerivationPath {
    /// Create a path from raw BIP-32 indices (hardened bit included).
    pub const fn new(
        purpose: u32,
        coin_type: u32,
        account: u32,
        change: u32,
        address_index: u32,
    ) -> Self {
        Self {
            indices: [purpose, coin_type, account, change, address_index],
        }
    }

    /// Create the standard path `m/purpose'/coin_type'/account'/change/address_index`.
    ///
    /// The first three levels are hardened; any hardened bit already set on
    /// them is kept.
    pub const fn bip44(
        purpose: u32,
        coin_type: u32,
        account: u32,
        change: u32,
        address_index: u32,
    ) -> Self {
        let h = ChildIndex::HARDENED_OFFSET;
        Self::new(
            purpose | h,
            coin_type | h,
            account | h,
            change,
            address_index,
        )
    }

    /// Parse a path like `m/44'/0'/0'/0/0`.
    ///
    /// The leading `m/` is optional. Every level must be a decimal index
    /// below 2^31, optionally followed by `'`.
    pub fn parse(path: &str) -> Result<Self> {
        let segments = split_segments(path);
        if segments.len() != PATH_LEVELS {
            return Err(Error::InvalidSegmentCount(segments.len()));
        }

        let mut indices = [0u32; PATH_LEVELS];
        for (slot, segment) in indices.iter_mut().zip(&segments) {
            *slot = segment.parse::<ChildIndex>()?.to_u32();
        }

        Ok(Self { indices })
    }

    /// Parse a path the permissive way older wallets did.
    ///
    /// A path without exactly five levels yields `fallback` unchanged. A
    /// level whose number does not parse becomes index 0, and one too large
    /// for 64 bits saturates to `0xFFFFFFFF` (either is still hardened if it
    /// ends in `'`). Prefer [`DerivationPath::parse`], which reports both
    /// cases as errors.
    pub fn parse_lenient(path: &str, fallback: Self) -> Self {
        let segments = split_segments(path);
        if segments.len() != PATH_LEVELS {
            tracing::debug!(
                levels = segments.len(),
                "ignoring derivation path with wrong number of levels"
            );
            return fallback;
        }

        let mut indices = [0u32; PATH_LEVELS];
        for (slot, segment) in indices.iter_mut().zip(&segments) {
            *slot = lenient_index(segment);
        }

        Self { indices }
    }

    /// Raw indices in BIP-44 order.
    pub const fn to_indices(&self) -> [u32; PATH_LEVELS] {
        self.indices
    }

    /// Borrow the raw indices.
    pub const fn as_indices(&self) -> &[u32; PATH_LEVELS] {
        &self.indices
    }

    /// Indices as [`ChildIndex`] values.
    pub fn child_indices(&self) -> [ChildIndex; PATH_LEVELS] {
        self.indices.map(ChildIndex::from)
    }

    /// Purpose level (raw).
    pub const fn purpose(&self) -> u32 {
        self.indices[0]
    }

    /// Coin type level (raw).
    pub const fn coin_type(&self) -> u32 {
        self.indices[1]
    }

    /// Account level (raw).
    pub const fn account(&self) -> u32 {
        self.indices[2]
    }

    /// Change level (raw).
    pub const fn change(&self) -> u32 {
        self.indices[3]
    }

    /// Address index level (raw).
    pub const fn address_index(&self) -> u32 {
        self.indices[4]
    }

    /// The same path with a different purpose (raw).
    pub const fn with_purpose(mut self, purpose: u32) -> Self {
        self.indices[0] = purpose;
        self
    }

    /// The same path with a different coin type (raw).
    pub const fn with_coin_type(mut self, coin_type: u32) -> Self {
        self.indices[1] = coin_type;
        self
    }

    /// The same path with a different account (raw).
    pub const fn with_account(mut self, account: u32) -> Self {
        self.indices[2] = account;
        self
    }

    /// The same path with a different change level.
    pub const fn with_change(mut self, change: u32) -> Self {
        self.indices[3] = change;
        self
    }

    /// The same path with a different address index.
    pub const fn with_address_index(mut self, address_index: u32) -> Self {
        self.indices[4] = address_index;
        self
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    let path = path.trim();
    let path = path.strip_prefix("m/").unwrap_or(path);
    path.split('/').collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_index(segment: &str) -> u32 {
    let (digits, hardened) = match segment.strip_suffix('\'') {
        Some(digits) => (digits, true),
        None => (segment, false),
    };
    // Saturate to i64 on overflow, then keep the low 32 bits.
    let wide = digits.parse::<i64>().unwrap_or_else(|e| match e.kind() {
        IntErrorKind::PosOverflow => i64::MAX,
        IntErrorKind::NegOverflow => i64::MIN,
        _ => 0,
    });
    let index = wide as u32;
    if hardened {
        index.wrapping_add(ChildIndex::HARDENED_OFFSET)
    } else {
        index
    }
}

impl Default for DerivationPath {
    /// `m/44'/0'/0'/0/0`, the first legacy Bitcoin receive address.
    fn default() -> Self {
        Self::bip44(44, 0, 0, 0, 0)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in self.child_indices() {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<[u32]> for DerivationPath {
    fn as_ref(&self) -> &[u32] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_index_hardened_encoding() {
        assert_eq!("0'".parse::<ChildIndex>().unwrap().to_u32(), 0x8000_0000);
        assert_eq!("44'".parse::<ChildIndex>().unwrap().to_u32(), 0x8000_002C);
        assert_eq!(ChildIndex::from(0x8000_0000).to_string(), "0'");
        assert_eq!(ChildIndex::from(7).to_string(), "7");
    }

    #[test]
    fn test_child_index_hardened_by_value() {
        assert!(ChildIndex::Hardened(0).is_hardened());
        assert!(ChildIndex::Normal(0x8000_0000).is_hardened());
        assert!(!ChildIndex::Normal(0x7FFF_FFFF).is_hardened());
    }

    #[test]
    fn test_child_index_rejects_out_of_range() {
        assert!("2147483648".parse::<ChildIndex>().is_err());
        assert!("2147483648'".parse::<ChildIndex>().is_err());
        assert!("-1".parse::<ChildIndex>().is_err());
        assert!("44h".parse::<ChildIndex>().is_err());
    }

    #[test]
    fn test_parse_bip44_path() {
        let path = DerivationPath::parse("m/44'/0'/0'/0/0").unwrap();
        assert_eq!(
            path.to_indices(),
            [0x8000_002C, 0x8000_0000, 0x8000_0000, 0, 0]
        );
        assert_eq!(path, DerivationPath::bip44(44, 0, 0, 0, 0));
    }

    #[test]
    fn test_parse_without_prefix() {
        let path: DerivationPath = "84'/0'/0'/1/7".parse().unwrap();
        assert_eq!(path, DerivationPath::bip44(84, 0, 0, 1, 7));
    }

    #[test]
    fn test_parse_requires_five_levels() {
        assert!(matches!(
            DerivationPath::parse("m/44'/0'/0'/0"),
            Err(Error::InvalidSegmentCount(4))
        ));
        assert!(matches!(
            DerivationPath::parse("m/44'/0'/0'/0/0/0"),
            Err(Error::InvalidSegmentCount(6))
        ));
        assert!(matches!(
            DerivationPath::parse("m"),
            Err(Error::InvalidSegmentCount(1))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_segment() {
        assert!(matches!(
            DerivationPath::parse("m/44'/x'/0'/0/0"),
            Err(Error::InvalidPathSegment(s)) if s == "x'"
        ));
        assert!(DerivationPath::parse("m/44'/0'/0'//0").is_err());
    }

    #[test]
    fn test_format_round_trip() {
        for s in [
            "m/44'/0'/0'/0/0",
            "m/49'/1'/3'/1/19",
            "m/84'/0'/0'/0/2147483647",
            "m/86'/0'/2147483647'/0/0",
        ] {
            let path = DerivationPath::parse(s).unwrap();
            assert_eq!(path.to_string(), s);
            assert_eq!(DerivationPath::parse(&path.to_string()).unwrap(), path);
        }
    }

    #[test]
    fn test_lenient_wrong_length_returns_fallback() {
        let fallback = DerivationPath::bip44(84, 0, 0, 0, 0);
        assert_eq!(
            DerivationPath::parse_lenient("m/44'/0'", fallback),
            fallback
        );
    }

    #[test]
    fn test_lenient_malformed_number_becomes_zero() {
        let path = DerivationPath::parse_lenient("m/44'/abc'/0'/0/x", DerivationPath::default());
        assert_eq!(
            path.to_indices(),
            [0x8000_002C, 0x8000_0000, 0x8000_0000, 0, 0]
        );
    }

    #[test]
    fn test_lenient_overflow_saturates() {
        let path = DerivationPath::parse_lenient(
            "m/44'/99999999999999999999/0'/-99999999999999999999/4294967296",
            DerivationPath::default(),
        );
        assert_eq!(
            path.to_indices(),
            [0x8000_002C, 0xFFFF_FFFF, 0x8000_0000, 0, 0]
        );
        let hardened = DerivationPath::parse_lenient(
            "m/99999999999999999999'/0/0/0/0",
            DerivationPath::default(),
        );
        assert_eq!(hardened.purpose(), 0x7FFF_FFFF);
    }

    #[test]
    fn test_default_is_legacy_bitcoin() {
        assert_eq!(DerivationPath::default().to_string(), "m/44'/0'/0'/0/0");
    }

    #[test]
    fn test_accessors() {
        let path = DerivationPath::bip44(86, 1, 2, 1, 5);
        assert_eq!(path.purpose(), 86 | ChildIndex::HARDENED_OFFSET);
        assert_eq!(path.coin_type(), 1 | ChildIndex::HARDENED_OFFSET);
        assert_eq!(path.account(), 2 | ChildIndex::HARDENED_OFFSET);
        assert_eq!(path.change(), 1);
        assert_eq!(path.address_index(), 5);
        assert_eq!(path.with_address_index(9).address_index(), 9);

        let edited = path
            .with_purpose(84 | ChildIndex::HARDENED_OFFSET)
            .with_coin_type(ChildIndex::HARDENED_OFFSET)
            .with_account(3 | ChildIndex::HARDENED_OFFSET)
            .with_change(0);
        assert_eq!(edited.to_string(), "m/84'/0'/3'/0/5");
    }
}
