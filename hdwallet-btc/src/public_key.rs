//! Bitcoin public key implementation.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, Scalar};

use crate::address::AddressFormat;
use crate::network::Network;
use crate::{Error, Result};

/// A compressed secp256k1 public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Parse a 33-byte SEC1 compressed point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 33 {
            return Err(Error::InvalidPublicKey);
        }
        let inner = k256::PublicKey::from_sec1_bytes(bytes).map_err(|_| Error::InvalidPublicKey)?;
        Ok(Self { inner })
    }

    /// Lift an x-only key to the point with even y (BIP-340).
    pub fn from_x_only(x: &[u8; 32]) -> Result<Self> {
        let mut compressed = [0u8; 33];
        compressed[0] = 0x02;
        compressed[1..].copy_from_slice(x);
        Self::from_bytes(&compressed)
    }

    pub(crate) const fn from_point(inner: k256::PublicKey) -> Self {
        Self { inner }
    }

    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        self.inner.to_projective()
    }

    /// Compute `self + tweak * G`, failing if the sum is the point at infinity.
    pub(crate) fn add_exp_tweak(&self, tweak: &Scalar) -> Option<Self> {
        let sum = self.to_projective() + ProjectivePoint::GENERATOR * tweak;
        k256::PublicKey::from_affine(sum.to_affine())
            .ok()
            .map(Self::from_point)
    }

    /// Serialize to compressed bytes (33 bytes).
    pub fn to_compressed_bytes(&self) -> [u8; 33] {
        let point = self.inner.to_encoded_point(true);
        let mut result = [0u8; 33];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// The x coordinate alone, as used by BIP-340 and P2TR.
    pub fn to_x_only(&self) -> [u8; 32] {
        let mut x_only = [0u8; 32];
        x_only.copy_from_slice(&self.to_compressed_bytes()[1..]);
        x_only
    }

    /// Whether the y coordinate is even.
    pub fn has_even_y(&self) -> bool {
        self.to_compressed_bytes()[0] == 0x02
    }

    /// Hash160 of the compressed key.
    pub fn hash160(&self) -> [u8; 20] {
        hdwallet::hash::hash160(&self.to_compressed_bytes())
    }

    /// Encode an address for this key.
    pub fn to_address(&self, format: AddressFormat, network: Network) -> Result<String> {
        crate::address::encode(self, format, network)
    }
}

impl core::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&hex::encode(self.to_compressed_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATOR: [u8; 33] =
        hex_literal::hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");

    #[test]
    fn test_compressed_round_trip() {
        let key = PublicKey::from_bytes(&GENERATOR).unwrap();
        assert_eq!(key.to_compressed_bytes(), GENERATOR);
        assert!(key.has_even_y());
        assert_eq!(key.to_x_only(), GENERATOR[1..]);
    }

    #[test]
    fn test_rejects_invalid_points() {
        assert!(matches!(
            PublicKey::from_bytes(&GENERATOR[..32]),
            Err(Error::InvalidPublicKey)
        ));
        let mut bad_prefix = GENERATOR;
        bad_prefix[0] = 0x05;
        assert!(PublicKey::from_bytes(&bad_prefix).is_err());
        // x = 0 is not on the curve.
        let mut off_curve = [0u8; 33];
        off_curve[0] = 0x02;
        assert!(PublicKey::from_bytes(&off_curve).is_err());
    }

    #[test]
    fn test_uncompressed_rejected() {
        let uncompressed = hex_literal::hex!(
            "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        );
        assert!(PublicKey::from_bytes(&uncompressed).is_err());
    }

    #[test]
    fn test_from_x_only_lifts_even_y() {
        let mut odd = GENERATOR;
        odd[0] = 0x03;
        let odd = PublicKey::from_bytes(&odd).unwrap();
        let lifted = PublicKey::from_x_only(&odd.to_x_only()).unwrap();
        assert!(lifted.has_even_y());
        assert_eq!(lifted.to_x_only(), odd.to_x_only());
    }

    #[test]
    fn test_add_exp_tweak_by_one_doubles_generator() {
        let g = PublicKey::from_bytes(&GENERATOR).unwrap();
        let doubled = g.add_exp_tweak(&Scalar::ONE).unwrap();
        assert_eq!(
            hex::encode(doubled.to_compressed_bytes()),
            "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
        );
    }

    #[test]
    fn test_add_exp_tweak_to_infinity() {
        let g = PublicKey::from_bytes(&GENERATOR).unwrap();
        assert!(g.add_exp_tweak(&-Scalar::ONE).is_none());
    }
}
