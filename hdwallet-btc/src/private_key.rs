//! Bitcoin private key implementation.

use k256::{NonZeroScalar, SecretKey};
use zeroize::Zeroizing;

use hdwallet::encoding::{base58check_decode, base58check_encode};

use crate::network::Network;
use crate::public_key::PublicKey;
use crate::{Error, Result};

/// A secp256k1 private key. Always paired with a compressed public key.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SecretKey,
}

impl PrivateKey {
    /// Create from a raw 32-byte scalar in `[1, n)`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidPrivateKey);
        }
        let inner = SecretKey::from_slice(bytes).map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self { inner })
    }

    pub(crate) fn from_scalar(scalar: NonZeroScalar) -> Self {
        Self {
            inner: SecretKey::from(scalar),
        }
    }

    pub(crate) fn to_scalar(&self) -> NonZeroScalar {
        self.inner.to_nonzero_scalar()
    }

    /// Serialize to the raw 32-byte scalar.
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.inner.to_bytes().into())
    }

    /// Get the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_point(self.inner.public_key())
    }

    /// Export as compressed WIF (Wallet Import Format).
    pub fn to_wif(&self, network: Network) -> Zeroizing<String> {
        let mut payload = Zeroizing::new([0u8; 33]);
        payload[..32].copy_from_slice(&self.to_bytes()[..]);
        payload[32] = 0x01;
        Zeroizing::new(base58check_encode(
            &[network.params().wif_prefix],
            &payload[..],
        ))
    }

    /// Import a compressed WIF key and report the network it belongs to.
    pub fn from_wif(wif: &str) -> Result<(Self, Network)> {
        let decoded = Zeroizing::new(base58check_decode(wif)?);

        // prefix + 32-byte key + compression flag
        if decoded.len() != 34 || decoded[33] != 0x01 {
            return Err(Error::InvalidPrivateKey);
        }
        let network = Network::from_wif_prefix(decoded[0]).ok_or(Error::InvalidPrivateKey)?;

        Ok((Self::from_bytes(&decoded[1..33])?, network))
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for PrivateKey {}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] =
        hex_literal::hex!("0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d");

    #[test]
    fn test_wif_mainnet_vector() {
        let key = PrivateKey::from_bytes(&SECRET).unwrap();
        assert_eq!(
            key.to_wif(Network::Mainnet).as_str(),
            "KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617"
        );
    }

    #[test]
    fn test_wif_round_trip_keeps_network() {
        let key = PrivateKey::from_bytes(&SECRET).unwrap();
        let wif = key.to_wif(Network::Testnet);
        let (recovered, network) = PrivateKey::from_wif(&wif).unwrap();
        assert_eq!(recovered, key);
        assert_eq!(network, Network::Testnet);
    }

    #[test]
    fn test_uncompressed_wif_rejected() {
        assert!(PrivateKey::from_wif("5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ").is_err());
    }

    #[test]
    fn test_out_of_range_scalars_rejected() {
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
        assert!(PrivateKey::from_bytes(&[0xFF; 32]).is_err());
        assert!(PrivateKey::from_bytes(&SECRET[..31]).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = PrivateKey::from_bytes(&SECRET).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&hex::encode(SECRET)));
    }
}
