//! Text encodings for addresses and extended keys.

use crate::error::{Error, Result};
use crate::hash::double_sha256;

/// Length of the Base58Check checksum in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Encode `prefix || payload || checksum` as Base58Check.
pub fn base58check_encode(prefix: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(prefix.len() + payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(prefix);
    data.extend_from_slice(payload);

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);

    bs58::encode(data).into_string()
}

/// Decode a Base58Check string, verifying and stripping the checksum.
///
/// The returned bytes still carry any version prefix.
pub fn base58check_decode(encoded: &str) -> Result<Vec<u8>> {
    let mut data = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| Error::InvalidEncoding)?;

    if data.len() <= CHECKSUM_LEN {
        return Err(Error::InvalidLength {
            expected: CHECKSUM_LEN + 1,
            actual: data.len(),
        });
    }

    let split = data.len() - CHECKSUM_LEN;
    let computed = double_sha256(&data[..split]);
    if data[split..] != computed[..CHECKSUM_LEN] {
        return Err(Error::InvalidChecksum);
    }

    data.truncate(split);
    Ok(data)
}

/// Encode a SegWit witness program.
///
/// Witness version 0 uses Bech32 (BIP-173), version 1 and above use
/// Bech32m (BIP-350).
pub fn segwit_encode(hrp: &str, witness_version: u8, program: &[u8]) -> Result<String> {
    let hrp = bech32::Hrp::parse(hrp).map_err(|_| Error::InvalidEncoding)?;
    let version = bech32::Fe32::try_from(witness_version).map_err(|_| Error::InvalidEncoding)?;

    bech32::segwit::encode(hrp, version, program).map_err(|_| Error::InvalidEncoding)
}

/// Decode a SegWit address into `(hrp, witness_version, program)`.
pub fn segwit_decode(encoded: &str) -> Result<(String, u8, Vec<u8>)> {
    let (hrp, version, program) =
        bech32::segwit::decode(encoded).map_err(|_| Error::InvalidEncoding)?;

    Ok((hrp.to_string(), version.to_u8(), program))
}
