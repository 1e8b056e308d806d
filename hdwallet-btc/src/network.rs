//! Bitcoin network parameters.

use core::fmt;
use core::str::FromStr;

/// Version bytes and prefixes that differ between Bitcoin networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkParams {
    /// Network name.
    pub name: &'static str,
    /// WIF private key prefix.
    pub wif_prefix: u8,
    /// P2PKH address version byte.
    pub p2pkh_prefix: u8,
    /// P2SH address version byte.
    pub p2sh_prefix: u8,
    /// Bech32 human-readable part for SegWit addresses.
    pub bech32_hrp: &'static str,
    /// BIP-32 extended private key version.
    pub xprv_version: [u8; 4],
    /// BIP-32 extended public key version.
    pub xpub_version: [u8; 4],
}

const MAINNET: NetworkParams = NetworkParams {
    name: "mainnet",
    wif_prefix: 0x80,
    p2pkh_prefix: 0x00,
    p2sh_prefix: 0x05,
    bech32_hrp: "bc",
    xprv_version: [0x04, 0x88, 0xAD, 0xE4],
    xpub_version: [0x04, 0x88, 0xB2, 0x1E],
};

const TESTNET: NetworkParams = NetworkParams {
    name: "testnet",
    wif_prefix: 0xEF,
    p2pkh_prefix: 0x6F,
    p2sh_prefix: 0xC4,
    bech32_hrp: "tb",
    xprv_version: [0x04, 0x35, 0x83, 0x94],
    xpub_version: [0x04, 0x35, 0x87, 0xCF],
};

const REGTEST: NetworkParams = NetworkParams {
    name: "regtest",
    bech32_hrp: "bcrt",
    ..TESTNET
};

/// Supported Bitcoin networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Bitcoin mainnet.
    #[default]
    Mainnet,
    /// Bitcoin testnet.
    Testnet,
    /// Local regression test network.
    Regtest,
}

impl Network {
    /// Parameter table for this network.
    #[inline]
    #[must_use]
    pub const fn params(self) -> &'static NetworkParams {
        match self {
            Self::Mainnet => &MAINNET,
            Self::Testnet => &TESTNET,
            Self::Regtest => &REGTEST,
        }
    }

    /// Get the BIP44 coin type for this network.
    #[inline]
    #[must_use]
    pub const fn coin_type(self) -> u32 {
        match self {
            Self::Mainnet => 0,
            Self::Testnet | Self::Regtest => 1,
        }
    }

    /// Get network name as string.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.params().name
    }

    /// Network whose extended private key version matches `version`.
    ///
    /// Testnet and regtest share versions; testnet is returned for both.
    pub(crate) fn from_xprv_version(version: [u8; 4]) -> Option<Self> {
        [Self::Mainnet, Self::Testnet]
            .into_iter()
            .find(|n| n.params().xprv_version == version)
    }

    /// Network whose extended public key version matches `version`.
    pub(crate) fn from_xpub_version(version: [u8; 4]) -> Option<Self> {
        [Self::Mainnet, Self::Testnet]
            .into_iter()
            .find(|n| n.params().xpub_version == version)
    }

    /// Network whose WIF prefix matches `prefix`.
    pub(crate) fn from_wif_prefix(prefix: u8) -> Option<Self> {
        [Self::Mainnet, Self::Testnet]
            .into_iter()
            .find(|n| n.params().wif_prefix == prefix)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown network name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseNetworkError;

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid network, expected: mainnet, testnet, or regtest")
    }
}

impl std::error::Error for ParseNetworkError {}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Self::Mainnet),
            "testnet" | "test" | "testnet3" => Ok(Self::Testnet),
            "regtest" => Ok(Self::Regtest),
            _ => Err(ParseNetworkError),
        }
    }
}
