//! Base58Check address derivation from an uncompressed public key.
//!
//! A Tron-style address is `version || keccak256(x || y)[12..32]` with a
//! 4-byte `sha256d` checksum appended before Base58 encoding.

use crate::error::{Error, Result};
use crate::{keccak256, sha256d};

/// Tron mainnet address version byte. Base58 output starts with `T`.
pub const TRON_MAINNET_VERSION: u8 = 0x41;

/// Derive the Base58Check address for an uncompressed public key given as
/// hex, with or without the `04` prefix.
pub fn derive_address(public_key_hex: &str, version: u8) -> Result<String> {
    let mut raw = hex::decode(public_key_hex).map_err(|_| Error::InvalidPublicKey)?;
    // the 04 marker is only a prefix on the 65-byte uncompressed encoding;
    // a raw 64-byte key may itself start with that byte
    if raw.len() == 65 && raw[0] == 0x04 {
        raw.remove(0);
    }
    if raw.len() != 64 {
        return Err(Error::InvalidPublicKey);
    }

    let digest = keccak256(&raw);
    let mut payload = Vec::with_capacity(21);
    payload.push(version);
    payload.extend_from_slice(&digest[12..]);
    Ok(base58check_encode(&payload))
}

/// Decode Base58Check text back to its payload (version byte included),
/// verifying and stripping the 4-byte checksum.
pub fn decode_address(text: &str) -> Result<Vec<u8>> {
    let data = bs58::decode(text)
        .into_vec()
        .map_err(|_| Error::MalformedAddress)?;
    if data.len() < 5 {
        return Err(Error::MalformedAddress);
    }
    let (payload, checksum) = data.split_at(data.len() - 4);
    if sha256d(payload)[..4] != *checksum {
        return Err(Error::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

fn base58check_encode(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    const PUBKEY: &str = "04b79b5acada5bce1cf0616f2393878daaf4af8a88caf6096fd5a2a818e11a25ee\
                          ec820383187c48bc7444163b197104ee65dc369b8ae62a369590cab9f6448f2f";
    const ADDRESS: &str = "TFVqmgSkmtagNmjDKKMpB7SeqW7xtD6Wpf";

    #[test]
    fn derive_known_address() {
        let addr = derive_address(PUBKEY, TRON_MAINNET_VERSION).unwrap();
        assert_eq!(addr, ADDRESS);
        // prefix stripping: same result without the leading 04
        let stripped = &PUBKEY[2..];
        assert_eq!(
            derive_address(stripped, TRON_MAINNET_VERSION).unwrap(),
            ADDRESS
        );
    }

    #[test]
    fn generator_address_vector() {
        let g_hex = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                     483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";
        assert_eq!(
            derive_address(g_hex, TRON_MAINNET_VERSION).unwrap(),
            "TMVQGm1qAQYVdetCeGRRkTWYYrLXuHK2HC"
        );
    }

    #[test]
    fn raw_key_starting_with_marker_byte() {
        // x coordinate of 45*G begins with byte 0x04; the unprefixed
        // 64-byte form must not be mistaken for a prefixed one
        let raw = "049370a4b5f43412ea25f514e8ecdad05266115e4a7ecb1387231808f8b45963\
                   758f3f41afd6ed428b3081b0512fd62a54c3f3afbb5b6764b653052a12949c9a";
        let expected = "TKq15h11sSkoDnGt83W71LmcTua4PtDHFd";
        assert_eq!(derive_address(raw, TRON_MAINNET_VERSION).unwrap(), expected);
        assert_eq!(
            derive_address(&format!("04{raw}"), TRON_MAINNET_VERSION).unwrap(),
            expected
        );
    }

    #[test]
    fn decode_roundtrip() {
        let payload = decode_address(ADDRESS).unwrap();
        assert_eq!(
            payload,
            hex!("413ca3cd204fd001373b6235c562e543546aebc150")
        );
        assert_eq!(payload[0], TRON_MAINNET_VERSION);
    }

    #[test]
    fn corruption_fails_checksum() {
        let mut corrupted = ADDRESS.to_string();
        // swap two distinct alphabet characters
        corrupted.replace_range(1..2, "G");
        let result = decode_address(&corrupted);
        assert!(
            matches!(
                result,
                Err(Error::ChecksumMismatch) | Err(Error::MalformedAddress)
            ),
            "corrupted address decoded: {result:?}"
        );
    }

    #[test]
    fn rejects_garbage() {
        // 0, O, I, l are not in the Base58 alphabet
        assert_eq!(decode_address("T0O0Il"), Err(Error::MalformedAddress));
        // too short to carry a checksum
        assert_eq!(decode_address("11"), Err(Error::MalformedAddress));
        // bad public key inputs
        assert_eq!(
            derive_address("04deadbeef", TRON_MAINNET_VERSION),
            Err(Error::InvalidPublicKey)
        );
        assert_eq!(
            derive_address("zz", TRON_MAINNET_VERSION),
            Err(Error::InvalidPublicKey)
        );
    }
}
