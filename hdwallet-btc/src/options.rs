//! Key derivation options.

use zeroize::Zeroizing;

use hdwallet::{DerivationPath, Seed, Wordlist};

use crate::network::Network;

/// Inputs for building an HD key.
///
/// Either an explicit `seed` or a `mnemonic` (with `passphrase` and
/// `wordlist`) supplies the root entropy; the explicit seed takes
/// precedence when both are set.
#[derive(Clone, Default)]
pub struct KeyOptions {
    /// Network used for version bytes.
    pub network: Network,
    /// BIP-39 mnemonic phrase.
    pub mnemonic: Zeroizing<String>,
    /// BIP-39 passphrase, empty by default.
    pub passphrase: Zeroizing<String>,
    /// Wordlist the mnemonic is written in.
    pub wordlist: Wordlist,
    /// Raw seed, bypassing the mnemonic.
    pub seed: Option<Seed>,
    /// Path used by [`ExtendedKey::derive_options_path`](crate::ExtendedKey::derive_options_path).
    pub path: DerivationPath,
}

impl KeyOptions {
    /// Options for a mnemonic phrase with every other field defaulted.
    pub fn from_mnemonic(mnemonic: impl Into<String>) -> Self {
        Self::default().with_mnemonic(mnemonic)
    }

    /// Set the network.
    #[must_use]
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Set the mnemonic phrase.
    #[must_use]
    pub fn with_mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = Zeroizing::new(mnemonic.into());
        self
    }

    /// Set the BIP-39 passphrase.
    #[must_use]
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Zeroizing::new(passphrase.into());
        self
    }

    /// Set the mnemonic wordlist.
    #[must_use]
    pub fn with_wordlist(mut self, wordlist: Wordlist) -> Self {
        self.wordlist = wordlist;
        self
    }

    /// Use a raw seed instead of the mnemonic.
    #[must_use]
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the derivation path.
    #[must_use]
    pub fn with_path(mut self, path: DerivationPath) -> Self {
        self.path = path;
        self
    }

    /// Set the purpose level (raw, e.g. `84 | HARDENED_OFFSET`).
    #[must_use]
    pub fn with_purpose(mut self, purpose: u32) -> Self {
        self.path = self.path.with_purpose(purpose);
        self
    }

    /// Set the coin type level (raw).
    #[must_use]
    pub fn with_coin_type(mut self, coin_type: u32) -> Self {
        self.path = self.path.with_coin_type(coin_type);
        self
    }

    /// Set the account level (raw).
    #[must_use]
    pub fn with_account(mut self, account: u32) -> Self {
        self.path = self.path.with_account(account);
        self
    }

    /// Set the change level.
    #[must_use]
    pub fn with_change(mut self, change: u32) -> Self {
        self.path = self.path.with_change(change);
        self
    }

    /// Set the address index level.
    #[must_use]
    pub fn with_address_index(mut self, address_index: u32) -> Self {
        self.path = self.path.with_address_index(address_index);
        self
    }
}

impl core::fmt::Debug for KeyOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyOptions")
            .field("network", &self.network)
            .field("mnemonic", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .field("wordlist", &self.wordlist)
            .field("seed", &self.seed)
            .field("path", &self.path)
            .finish()
    }
}
