//! Coin wallets bound to a derived key.
//!
//! A [`Wallet`] is an [`ExtendedKey`] plus an [`AddressSpec`] describing
//! which coin, network and address format it serves. Only Bitcoin coins
//! currently encode addresses; the other [`Coin`] constants are registered
//! SLIP-44 coin types that report [`Error::UnsupportedCoin`].

use core::fmt;

use hdwallet::DerivationPath;

use crate::address::AddressFormat;
use crate::extended_key::ExtendedKey;
use crate::network::Network;
use crate::{Error, Result};

/// A coin identity from the SLIP-44 registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coin {
    /// Human-readable name.
    pub name: &'static str,
    /// Ticker symbol.
    pub symbol: &'static str,
    /// SLIP-44 coin type, without the hardened bit.
    pub coin_type: u32,
}

impl Coin {
    /// Bitcoin.
    pub const BTC: Self = Self::new("Bitcoin", "BTC", 0);
    /// Bitcoin testnet (shared by all test networks).
    pub const BTC_TESTNET: Self = Self::new("Bitcoin Testnet", "tBTC", 1);
    /// Litecoin.
    pub const LTC: Self = Self::new("Litecoin", "LTC", 2);
    /// Dogecoin.
    pub const DOGE: Self = Self::new("Dogecoin", "DOGE", 3);
    /// Dash.
    pub const DASH: Self = Self::new("Dash", "DASH", 5);
    /// Ethereum.
    pub const ETH: Self = Self::new("Ethereum", "ETH", 60);
    /// Ethereum Classic.
    pub const ETC: Self = Self::new("Ethereum Classic", "ETC", 61);
    /// Bitcoin Cash.
    pub const BCH: Self = Self::new("Bitcoin Cash", "BCH", 145);

    /// Every registered coin.
    pub const ALL: [Self; 8] = [
        Self::BTC,
        Self::BTC_TESTNET,
        Self::LTC,
        Self::DOGE,
        Self::DASH,
        Self::ETH,
        Self::ETC,
        Self::BCH,
    ];

    /// Create a coin identity.
    pub const fn new(name: &'static str, symbol: &'static str, coin_type: u32) -> Self {
        Self {
            name,
            symbol,
            coin_type,
        }
    }

    /// Whether addresses for this coin can be encoded.
    pub const fn is_bitcoin(&self) -> bool {
        self.coin_type == Self::BTC.coin_type || self.coin_type == Self::BTC_TESTNET.coin_type
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

/// What a wallet produces: coin, network parameters and address format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressSpec {
    /// Coin identity.
    pub coin: Coin,
    /// Network whose version bytes and HRP are used.
    pub network: Network,
    /// Address format.
    pub format: AddressFormat,
}

impl AddressSpec {
    /// Create an address spec.
    pub const fn new(coin: Coin, network: Network, format: AddressFormat) -> Self {
        Self {
            coin,
            network,
            format,
        }
    }

    /// Bitcoin mainnet in the given format.
    pub const fn bitcoin(format: AddressFormat) -> Self {
        Self::new(Coin::BTC, Network::Mainnet, format)
    }

    /// Bitcoin testnet in the given format.
    pub const fn bitcoin_testnet(format: AddressFormat) -> Self {
        Self::new(Coin::BTC_TESTNET, Network::Testnet, format)
    }

    /// First-address path for this spec: `m/purpose'/coin_type'/0'/0/0`.
    pub const fn default_path(&self) -> DerivationPath {
        DerivationPath::bip44(self.format.purpose(), self.coin.coin_type, 0, 0, 0)
    }
}

/// A derived key bound to an [`AddressSpec`].
#[derive(Debug, Clone)]
pub struct Wallet {
    key: ExtendedKey,
    spec: AddressSpec,
}

impl Wallet {
    /// Derive the first address key for `spec` from a master key.
    ///
    /// The purpose level follows the address format (44, 49, 84 or 86).
    pub fn from_master_key(master: &ExtendedKey, spec: AddressSpec) -> Result<Self> {
        let path = spec.default_path();
        let key = master.derive_path(path)?;

        tracing::debug!(
            coin = spec.coin.symbol,
            format = %spec.format,
            %path,
            "bound wallet to master key"
        );

        Ok(Self { key, spec })
    }

    /// Wrap a key that has already been derived.
    pub fn from_key(key: ExtendedKey, spec: AddressSpec) -> Self {
        Self { key, spec }
    }

    /// Address in the configured format.
    pub fn try_address(&self) -> Result<String> {
        self.try_address_with_format(self.spec.format)
    }

    /// Address in the configured format, or an empty string if encoding
    /// fails. Prefer [`Wallet::try_address`] when the cause matters.
    pub fn address(&self) -> String {
        self.address_with_format(self.spec.format)
    }

    /// Address of the same key in another format.
    pub fn try_address_with_format(&self, format: AddressFormat) -> Result<String> {
        if !self.spec.coin.is_bitcoin() {
            return Err(Error::UnsupportedCoin(self.spec.coin.symbol));
        }
        self.key.public_key().to_address(format, self.spec.network)
    }

    /// Address of the same key in another format, or an empty string if
    /// encoding fails.
    pub fn address_with_format(&self, format: AddressFormat) -> String {
        self.try_address_with_format(format).unwrap_or_else(|e| {
            tracing::warn!(
                coin = self.spec.coin.symbol,
                %format,
                error = %e,
                "address encoding failed, returning empty address"
            );
            String::new()
        })
    }

    /// Coin name.
    pub const fn name(&self) -> &'static str {
        self.spec.coin.name
    }

    /// Coin symbol.
    pub const fn symbol(&self) -> &'static str {
        self.spec.coin.symbol
    }

    /// SLIP-44 coin type.
    pub const fn coin_type(&self) -> u32 {
        self.spec.coin.coin_type
    }

    /// Configured address format.
    pub const fn format(&self) -> AddressFormat {
        self.spec.format
    }

    /// Address spec.
    pub const fn spec(&self) -> &AddressSpec {
        &self.spec
    }

    /// The bound key.
    pub const fn key(&self) -> &ExtendedKey {
        &self.key
    }
}
