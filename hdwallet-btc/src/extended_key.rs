//! BIP-32 Hierarchical Deterministic (HD) key derivation.

use core::fmt;
use core::str::FromStr;

use hmac::{Hmac, Mac};
use k256::elliptic_curve::PrimeField;
use k256::{NonZeroScalar, Scalar};
use sha2::Sha512;
use zeroize::Zeroizing;

use hdwallet::encoding::{base58check_decode, base58check_encode};
use hdwallet::{ChildIndex, Seed};

use crate::address::AddressFormat;
use crate::network::Network;
use crate::options::KeyOptions;
use crate::private_key::PrivateKey;
use crate::public_key::PublicKey;
use crate::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/// Length of a serialized extended key, without checksum.
pub const SERIALIZED_LEN: usize = 78;

const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";
const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

#[derive(Clone, PartialEq, Eq)]
enum KeyMaterial {
    Private(PrivateKey),
    Public(PublicKey),
}

/// A private/public key pair taken from an [`ExtendedKey`].
///
/// The private half is absent when the extended key has been neutered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    /// Private key, if known.
    pub private_key: Option<PrivateKey>,
    /// Compressed public key.
    pub public_key: PublicKey,
}

/// A BIP-32 extended key, private or public-only.
///
/// Derivation never mutates; every step returns a new key.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    key: KeyMaterial,
    chain_code: Zeroizing<[u8; 32]>,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
    network: Network,
}

impl ExtendedKey {
    /// Create the master key from a 16 to 64 byte seed.
    pub fn master(seed: &[u8], network: Network) -> Result<Self> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(Error::InvalidSeedLength(seed.len()));
        }

        let i = hmac_sha512(MASTER_HMAC_KEY, &[seed]).ok_or(Error::InvalidMasterKey)?;
        let private_key = PrivateKey::from_bytes(&i[..32]).map_err(|_| Error::InvalidMasterKey)?;

        tracing::debug!(%network, seed_len = seed.len(), "created master key");

        Ok(Self {
            key: KeyMaterial::Private(private_key),
            chain_code: chain_code(&i[32..]),
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
            network,
        })
    }

    /// Create the master key described by `options`.
    ///
    /// An explicit seed wins; otherwise the mnemonic, passphrase and
    /// wordlist are turned into one.
    pub fn from_options(options: &KeyOptions) -> Result<Self> {
        match &options.seed {
            Some(seed) => Self::master(seed.as_bytes(), options.network),
            None => {
                let seed =
                    Seed::from_mnemonic(&options.mnemonic, &options.passphrase, options.wordlist)?;
                Self::master(seed.as_bytes(), options.network)
            }
        }
    }

    /// Derive the child at `index`.
    ///
    /// Hardened indices need the private key. If the index yields an
    /// invalid key, [`Error::InvalidChildKey`] is returned and the caller
    /// should move on to the next index.
    pub fn derive_child(&self, index: impl Into<ChildIndex>) -> Result<Self> {
        let index: ChildIndex = index.into();
        let raw = index.to_u32();
        let hardened = raw >= ChildIndex::HARDENED_OFFSET;
        let depth = self.depth.checked_add(1).ok_or(Error::MaxDepthExceeded)?;

        let ser_i = raw.to_be_bytes();
        let i = match (&self.key, hardened) {
            (KeyMaterial::Private(k), true) => {
                // 0x00 || ser256(k) || ser32(i)
                hmac_sha512(&self.chain_code[..], &[&[0u8], &k.to_bytes()[..], &ser_i])
            }
            (KeyMaterial::Public(_), true) => {
                return Err(Error::HardenedDerivationRequiresPrivateKey);
            }
            (_, false) => {
                // serP(K) || ser32(i)
                let public = self.public_key().to_compressed_bytes();
                hmac_sha512(&self.chain_code[..], &[&public, &ser_i])
            }
        }
        .ok_or(Error::InvalidChildKey(raw))?;

        let mut il = Zeroizing::new([0u8; 32]);
        il.copy_from_slice(&i[..32]);
        let tweak = Option::<Scalar>::from(Scalar::from_repr((*il).into()))
            .ok_or(Error::InvalidChildKey(raw))?;

        let key = match &self.key {
            KeyMaterial::Private(k) => {
                let child = tweak + *k.to_scalar();
                let child = Option::<NonZeroScalar>::from(NonZeroScalar::new(child))
                    .ok_or(Error::InvalidChildKey(raw))?;
                KeyMaterial::Private(PrivateKey::from_scalar(child))
            }
            KeyMaterial::Public(k) => {
                KeyMaterial::Public(k.add_exp_tweak(&tweak).ok_or(Error::InvalidChildKey(raw))?)
            }
        };

        tracing::trace!(
            depth,
            index = raw & !ChildIndex::HARDENED_OFFSET,
            hardened,
            "derived child key"
        );

        Ok(Self {
            key,
            chain_code: chain_code(&i[32..]),
            depth,
            parent_fingerprint: self.fingerprint(),
            child_index: raw,
            network: self.network,
        })
    }

    /// Derive each index in turn, stopping at the first failure.
    ///
    /// Accepts a [`hdwallet::DerivationPath`] or any slice of raw indices.
    pub fn derive_path(&self, path: impl AsRef<[u32]>) -> Result<Self> {
        path.as_ref()
            .iter()
            .try_fold(self.clone(), |key, &index| key.derive_child(index))
    }

    /// Derive the path configured in `options` from this key.
    pub fn derive_options_path(&self, options: &KeyOptions) -> Result<Self> {
        self.derive_path(options.path)
    }

    /// Public-only copy of this key.
    pub fn neuter(&self) -> Self {
        Self {
            key: KeyMaterial::Public(self.public_key()),
            ..self.clone()
        }
    }

    /// Whether the key holds private material.
    pub const fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    /// Private key, if this is not a neutered key.
    pub fn private_key(&self) -> Option<&PrivateKey> {
        match &self.key {
            KeyMaterial::Private(k) => Some(k),
            KeyMaterial::Public(_) => None,
        }
    }

    /// Compressed public key.
    pub fn public_key(&self) -> PublicKey {
        match &self.key {
            KeyMaterial::Private(k) => k.public_key(),
            KeyMaterial::Public(k) => k.clone(),
        }
    }

    /// Split into a private/public key pair.
    pub fn to_key_pair(&self) -> KeyPair {
        KeyPair {
            private_key: self.private_key().cloned(),
            public_key: self.public_key(),
        }
    }

    /// Legacy P2PKH address of this key.
    pub fn address(&self) -> Result<String> {
        self.address_with_format(AddressFormat::Legacy)
    }

    /// Address of this key in the given format.
    pub fn address_with_format(&self, format: AddressFormat) -> Result<String> {
        self.public_key().to_address(format, self.network)
    }

    /// Hash160 of the public key.
    pub fn identifier(&self) -> [u8; 20] {
        self.public_key().hash160()
    }

    /// First four bytes of the identifier.
    pub fn fingerprint(&self) -> [u8; 4] {
        let mut fingerprint = [0u8; 4];
        fingerprint.copy_from_slice(&self.identifier()[..4]);
        fingerprint
    }

    /// Get the chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Get the depth.
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the parent fingerprint.
    pub const fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Get the raw child index, hardened bit included.
    pub const fn child_index(&self) -> u32 {
        self.child_index
    }

    /// Get the network.
    pub const fn network(&self) -> Network {
        self.network
    }

    /// BIP-32 serialization, without the Base58Check checksum.
    pub fn serialize(&self) -> Zeroizing<[u8; SERIALIZED_LEN]> {
        let params = self.network.params();
        let mut data = Zeroizing::new([0u8; SERIALIZED_LEN]);

        let version = if self.is_private() {
            params.xprv_version
        } else {
            params.xpub_version
        };
        data[..4].copy_from_slice(&version);
        data[4] = self.depth;
        data[5..9].copy_from_slice(&self.parent_fingerprint);
        data[9..13].copy_from_slice(&self.child_index.to_be_bytes());
        data[13..45].copy_from_slice(&self.chain_code[..]);

        match &self.key {
            KeyMaterial::Private(k) => {
                data[45] = 0x00;
                data[46..].copy_from_slice(&k.to_bytes()[..]);
            }
            KeyMaterial::Public(k) => data[45..].copy_from_slice(&k.to_compressed_bytes()),
        }

        data
    }

    /// Parse the 78-byte BIP-32 serialization.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.len() != SERIALIZED_LEN {
            return Err(Error::InvalidExtendedKey("wrong length"));
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&data[..4]);
        let depth = data[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&data[5..9]);
        let child_index = u32::from_be_bytes([data[9], data[10], data[11], data[12]]);

        if depth == 0 && (parent_fingerprint != [0u8; 4] || child_index != 0) {
            return Err(Error::InvalidExtendedKey("master key with parent fields set"));
        }

        let (key, network) = if let Some(network) = Network::from_xprv_version(version) {
            if data[45] != 0x00 {
                return Err(Error::InvalidExtendedKey("private key data must start with 0x00"));
            }
            let key = PrivateKey::from_bytes(&data[46..])?;
            (KeyMaterial::Private(key), network)
        } else if let Some(network) = Network::from_xpub_version(version) {
            let key = PublicKey::from_bytes(&data[45..])?;
            (KeyMaterial::Public(key), network)
        } else {
            return Err(Error::InvalidExtendedKey("unknown version"));
        };

        Ok(Self {
            key,
            chain_code: chain_code(&data[13..45]),
            depth,
            parent_fingerprint,
            child_index,
            network,
        })
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.serialize();
        f.write_str(&Zeroizing::new(base58check_encode(&data[..4], &data[4..])))
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let decoded = Zeroizing::new(base58check_decode(s)?);
        Self::deserialize(&decoded)
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("private", &self.is_private())
            .field("public_key", &self.public_key())
            .field("depth", &self.depth)
            .field("child_index", &ChildIndex::from(self.child_index))
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

fn hmac_sha512(key: &[u8], data: &[&[u8]]) -> Option<Zeroizing<[u8; 64]>> {
    let mut mac = HmacSha512::new_from_slice(key).ok()?;
    for part in data {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Some(out)
}

fn chain_code(bytes: &[u8]) -> Zeroizing<[u8; 32]> {
    let mut chain_code = Zeroizing::new([0u8; 32]);
    chain_code.copy_from_slice(bytes);
    chain_code
}
