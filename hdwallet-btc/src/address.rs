//! Bitcoin address encoding.
//!
//! Pure functions from a compressed public key to an address string. Each
//! [`AddressFormat`] applies its own hashing pipeline before the final
//! Base58Check or Bech32/Bech32m step:
//!
//! | format | payload | encoding |
//! |--------|---------|----------|
//! | Legacy (P2PKH) | `hash160(pubkey)` | Base58Check, P2PKH version |
//! | NestedSegwit (P2SH-P2WPKH) | `hash160(0x00 0x14 <hash160(pubkey)>)` | Base58Check, P2SH version |
//! | NativeSegwit (P2WPKH) | `hash160(pubkey)` | Bech32, witness v0 |
//! | Taproot (P2TR) | BIP-341 tweaked x-only key | Bech32m, witness v1 |

use core::fmt;
use core::str::FromStr;

use k256::Scalar;
use k256::elliptic_curve::PrimeField;

use hdwallet::encoding::{base58check_encode, segwit_encode};
use hdwallet::hash::{hash160, tagged_hash};

use crate::network::Network;
use crate::public_key::PublicKey;
use crate::{Error, Result};

/// Bitcoin address formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressFormat {
    /// Pay to Public Key Hash (Legacy) - starts with 1 or m/n
    #[default]
    Legacy,
    /// Pay to Script Hash wrapping P2WPKH - starts with 3 or 2
    NestedSegwit,
    /// Pay to Witness Public Key Hash - starts with bc1q or tb1q
    NativeSegwit,
    /// Pay to Taproot, key-path only - starts with bc1p or tb1p
    Taproot,
}

impl AddressFormat {
    /// All formats, in BIP purpose order.
    pub const ALL: [Self; 4] = [
        Self::Legacy,
        Self::NestedSegwit,
        Self::NativeSegwit,
        Self::Taproot,
    ];

    /// BIP purpose that conventionally holds keys for this format.
    #[inline]
    #[must_use]
    pub const fn purpose(self) -> u32 {
        match self {
            Self::Legacy => 44,
            Self::NestedSegwit => 49,
            Self::NativeSegwit => 84,
            Self::Taproot => 86,
        }
    }

    /// Get address format name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Legacy => "P2PKH (Legacy)",
            Self::NestedSegwit => "P2SH-P2WPKH (Nested SegWit)",
            Self::NativeSegwit => "P2WPKH (Native SegWit)",
            Self::Taproot => "P2TR (Taproot)",
        }
    }
}

impl fmt::Display for AddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an invalid address format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseAddressFormatError;

impl fmt::Display for ParseAddressFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid address format, expected: legacy, nested-segwit, native-segwit, or taproot"
        )
    }
}

impl std::error::Error for ParseAddressFormatError {}

impl FromStr for AddressFormat {
    type Err = ParseAddressFormatError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "p2pkh" => Ok(Self::Legacy),
            "nested-segwit" | "p2sh" | "p2sh-p2wpkh" | "segwit" => Ok(Self::NestedSegwit),
            "native-segwit" | "p2wpkh" | "bech32" => Ok(Self::NativeSegwit),
            "taproot" | "p2tr" | "bech32m" => Ok(Self::Taproot),
            _ => Err(ParseAddressFormatError),
        }
    }
}

/// Encode `public_key` as an address of the given format.
pub fn encode(public_key: &PublicKey, format: AddressFormat, network: Network) -> Result<String> {
    match format {
        AddressFormat::Legacy => Ok(p2pkh(public_key, network)),
        AddressFormat::NestedSegwit => Ok(p2sh_p2wpkh(public_key, network)),
        AddressFormat::NativeSegwit => p2wpkh(public_key, network),
        AddressFormat::Taproot => p2tr(public_key, network),
    }
}

/// Encode a 33-byte compressed public key as an address.
pub fn encode_address(public_key: &[u8], format: AddressFormat, network: Network) -> Result<String> {
    encode(&PublicKey::from_bytes(public_key)?, format, network)
}

/// Legacy P2PKH address.
pub fn p2pkh(public_key: &PublicKey, network: Network) -> String {
    base58check_encode(&[network.params().p2pkh_prefix], &public_key.hash160())
}

/// P2SH address wrapping a P2WPKH redeem script.
pub fn p2sh_p2wpkh(public_key: &PublicKey, network: Network) -> String {
    let script_hash = hash160(&p2wpkh_script(&public_key.hash160()));
    base58check_encode(&[network.params().p2sh_prefix], &script_hash)
}

/// Native SegWit v0 P2WPKH address.
pub fn p2wpkh(public_key: &PublicKey, network: Network) -> Result<String> {
    segwit(network, 0, &public_key.hash160())
}

/// Taproot (SegWit v1) address for a key-path-only output.
pub fn p2tr(public_key: &PublicKey, network: Network) -> Result<String> {
    segwit(network, 1, &taproot_output_key(public_key)?)
}

/// `OP_0 <20-byte key hash>`, the P2WPKH script pubkey.
pub fn p2wpkh_script(pubkey_hash: &[u8; 20]) -> [u8; 22] {
    let mut script = [0u8; 22];
    script[0] = 0x00;
    script[1] = 0x14;
    script[2..].copy_from_slice(pubkey_hash);
    script
}

/// BIP-341 output key for an internal key with no script tree.
///
/// The internal key is taken with even y, tweaked by
/// `t = H_TapTweak(x(P))` and the x coordinate of `Q = P + t*G` returned.
pub fn taproot_output_key(internal_key: &PublicKey) -> Result<[u8; 32]> {
    let x_only = internal_key.to_x_only();
    let internal = PublicKey::from_x_only(&x_only)?;

    let tweak = tagged_hash("TapTweak", &x_only);
    let tweak = Option::<Scalar>::from(Scalar::from_repr(tweak.into()))
        .ok_or_else(|| Error::AddressEncoding("taproot tweak exceeds curve order".into()))?;

    let output = internal
        .add_exp_tweak(&tweak)
        .ok_or_else(|| Error::AddressEncoding("taproot output key is infinity".into()))?;
    Ok(output.to_x_only())
}

fn segwit(network: Network, witness_version: u8, program: &[u8]) -> Result<String> {
    segwit_encode(network.params().bech32_hrp, witness_version, program)
        .map_err(|e| Error::AddressEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use hdwallet::encoding::base58check_decode;

    // Public key for secret key 1.
    const GENERATOR: [u8; 33] =
        hex_literal::hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    // BIP-84 m/84'/0'/0'/0/0 of "abandon ... about".
    const BIP84_KEY: [u8; 33] =
        hex_literal::hex!("0330d54fd0dd420a6e5f8d3624f5f3482cae350f79d5f0753bf5beef9c2d91af3c");
    // BIP-86 m/86'/0'/0'/0/0 internal key of "abandon ... about".
    const BIP86_KEY: [u8; 33] =
        hex_literal::hex!("03cc8a4bc64d897bddc5fbc2f670f7a8ba0b386779106cf1223c6fc5d7cd6fc115");

    #[test]
    fn test_legacy_vector() {
        assert_eq!(
            encode_address(&GENERATOR, AddressFormat::Legacy, Network::Mainnet).unwrap(),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
    }

    #[test]
    fn test_nested_segwit_wraps_witness_program() {
        let key = PublicKey::from_bytes(&BIP84_KEY).unwrap();
        let address = encode(&key, AddressFormat::NestedSegwit, Network::Mainnet).unwrap();
        assert!(address.starts_with('3'));

        let decoded = base58check_decode(&address).unwrap();
        assert_eq!(decoded[0], 0x05);
        assert_eq!(decoded[1..], hash160(&p2wpkh_script(&key.hash160())));
    }

    #[test]
    fn test_native_segwit_vector() {
        assert_eq!(
            encode_address(&BIP84_KEY, AddressFormat::NativeSegwit, Network::Mainnet).unwrap(),
            "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu"
        );
    }

    #[test]
    fn test_taproot_vector() {
        let key = PublicKey::from_bytes(&BIP86_KEY).unwrap();
        assert_eq!(
            hex::encode(taproot_output_key(&key).unwrap()),
            "a60869f0dbcf1dc659c9cecbaf8050135ea9e8cdc487053f1dc6880949dc684c"
        );
        assert_eq!(
            encode(&key, AddressFormat::Taproot, Network::Mainnet).unwrap(),
            "bc1p5cyxnuxmeuwuvkwfem96lqzszd02n6xdcjrs20cac6yqjjwudpxqkedrcr"
        );
    }

    #[test]
    fn test_taproot_ignores_y_parity() {
        let mut flipped = BIP86_KEY;
        flipped[0] = 0x02;
        let even = PublicKey::from_bytes(&flipped).unwrap();
        let odd = PublicKey::from_bytes(&BIP86_KEY).unwrap();
        assert_ne!(even.has_even_y(), odd.has_even_y());
        assert_eq!(
            taproot_output_key(&even).unwrap(),
            taproot_output_key(&odd).unwrap()
        );
    }

    #[test]
    fn test_testnet_prefixes() {
        let key = PublicKey::from_bytes(&BIP84_KEY).unwrap();
        let expect = [
            (AddressFormat::Legacy, "m"),
            (AddressFormat::NestedSegwit, "2"),
            (AddressFormat::NativeSegwit, "tb1q"),
            (AddressFormat::Taproot, "tb1p"),
        ];
        for (format, prefix) in expect {
            let address = encode(&key, format, Network::Testnet).unwrap();
            assert!(address.starts_with(prefix), "{format}: {address}");
        }
        assert!(
            encode(&key, AddressFormat::NativeSegwit, Network::Regtest)
                .unwrap()
                .starts_with("bcrt1q")
        );
    }

    #[test]
    fn test_invalid_public_key() {
        assert!(matches!(
            encode_address(&[0u8; 33], AddressFormat::Legacy, Network::Mainnet),
            Err(Error::InvalidPublicKey)
        ));
        assert!(matches!(
            encode_address(&BIP84_KEY[..20], AddressFormat::Taproot, Network::Mainnet),
            Err(Error::InvalidPublicKey)
        ));
    }

    #[test]
    fn test_p2wpkh_script_layout() {
        let script = p2wpkh_script(&[0xAA; 20]);
        assert_eq!(&script[..2], &[0x00, 0x14]);
        assert_eq!(&script[2..], &[0xAA; 20]);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("legacy".parse::<AddressFormat>().unwrap(), AddressFormat::Legacy);
        assert_eq!("P2SH".parse::<AddressFormat>().unwrap(), AddressFormat::NestedSegwit);
        assert_eq!(
            "native-segwit".parse::<AddressFormat>().unwrap(),
            AddressFormat::NativeSegwit
        );
        assert_eq!("p2tr".parse::<AddressFormat>().unwrap(), AddressFormat::Taproot);
        assert!("p2wsh".parse::<AddressFormat>().is_err());
    }

    #[test]
    fn test_purpose() {
        let purposes: Vec<u32> = AddressFormat::ALL.iter().map(|f| f.purpose()).collect();
        assert_eq!(purposes, [44, 49, 84, 86]);
    }
}
