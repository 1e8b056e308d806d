//! Batch address derivation from a seed.

use zeroize::Zeroizing;

use hdwallet::{ChildIndex, DerivationPath, Seed};

use crate::address::AddressFormat;
use crate::extended_key::ExtendedKey;
use crate::network::Network;
use crate::options::KeyOptions;
use crate::{Error, Result};

/// Bitcoin address deriver over a master key.
///
/// Follows the BIP-44/49/84/86 layout, choosing the purpose from the
/// address format and the coin type from the network.
#[derive(Debug, Clone)]
pub struct Deriver {
    /// Master extended private key.
    master_key: ExtendedKey,
    /// Network.
    network: Network,
}

/// A derived Bitcoin address with associated keys.
#[derive(Debug)]
pub struct DerivedAddress {
    /// Derivation path used.
    pub path: DerivationPath,
    /// Private key in WIF format.
    pub private_key_wif: Zeroizing<String>,
    /// Public key in hex format.
    pub public_key_hex: String,
    /// Bitcoin address.
    pub address: String,
    /// Address format.
    pub format: AddressFormat,
}

impl Deriver {
    /// Create a new deriver from a seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the master key derivation fails.
    pub fn new(seed: &Seed, network: Network) -> Result<Self> {
        Ok(Self {
            master_key: ExtendedKey::master(seed.as_bytes(), network)?,
            network,
        })
    }

    /// Create a deriver from key options (seed or mnemonic).
    ///
    /// # Errors
    ///
    /// Returns an error if the mnemonic is invalid or master key
    /// derivation fails.
    pub fn from_options(options: &KeyOptions) -> Result<Self> {
        Ok(Self {
            master_key: ExtendedKey::from_options(options)?,
            network: options.network,
        })
    }

    /// Derive an address using the standard path for `format`.
    ///
    /// # Arguments
    ///
    /// * `format` - Address format (determines BIP purpose: 44/49/84/86)
    /// * `account` - Account index (usually 0)
    /// * `change` - Whether this is a change address
    /// * `address_index` - Address index within the account
    ///
    /// # Errors
    ///
    /// Returns an error if an index is hardened or derivation fails.
    pub fn derive(
        &self,
        format: AddressFormat,
        account: u32,
        change: bool,
        address_index: u32,
    ) -> Result<DerivedAddress> {
        for index in [account, address_index] {
            if index >= ChildIndex::HARDENED_OFFSET {
                return Err(hdwallet::Error::InvalidPathSegment(index.to_string()).into());
            }
        }

        let path = DerivationPath::bip44(
            format.purpose(),
            self.network.coin_type(),
            account,
            u32::from(change),
            address_index,
        );
        self.derive_at_path(&path, format)
    }

    /// Derive an address at a custom derivation path.
    ///
    /// # Errors
    ///
    /// Returns an error if derivation fails.
    pub fn derive_at_path(
        &self,
        path: &DerivationPath,
        format: AddressFormat,
    ) -> Result<DerivedAddress> {
        let derived = self.master_key.derive_path(path)?;
        let private_key = derived.private_key().ok_or(Error::InvalidPrivateKey)?;
        let public_key = derived.public_key();

        Ok(DerivedAddress {
            path: *path,
            private_key_wif: private_key.to_wif(self.network),
            public_key_hex: public_key.to_string(),
            address: public_key.to_address(format, self.network)?,
            format,
        })
    }

    /// Derive `count` consecutive addresses starting at `start_index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range leaves the non-hardened index space
    /// or any derivation fails.
    pub fn derive_many(
        &self,
        format: AddressFormat,
        account: u32,
        change: bool,
        start_index: u32,
        count: u32,
    ) -> Result<Vec<DerivedAddress>> {
        let end = start_index
            .checked_add(count)
            .filter(|&end| end <= ChildIndex::HARDENED_OFFSET)
            .ok_or_else(|| hdwallet::Error::InvalidPathSegment(format!("{start_index}+{count}")))?;

        (start_index..end)
            .map(|index| self.derive(format, account, change, index))
            .collect()
    }

    /// Get the master key.
    #[must_use]
    pub const fn master_key(&self) -> &ExtendedKey {
        &self.master_key
    }

    /// Get the network.
    #[must_use]
    pub const fn network(&self) -> Network {
        self.network
    }
}
