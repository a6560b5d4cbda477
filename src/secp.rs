//! Top-level signing facade: hex digests in, hex signatures and Base58Check
//! addresses out.
//!
//! Both `sign` and `verify` take the 64-char hex digest itself as the ECDSA
//! challenge; callers hash their messages (conventionally with `sha256`)
//! before calling in. Signatures use the non-canonical policy: `s` is left
//! exactly as computed, never folded below `n/2`.

use num_bigint::BigUint;

use crate::address::{self, TRON_MAINNET_VERSION};
use crate::ecdsa;
use crate::error::{Error, Result};
use crate::signature::Signature;
use crate::{random_secret_key, u256_bytes, EncodeHex};

/// Sign a hex digest with a hex private key; returns the 130-char signature.
pub fn sign(digest_hex: &str, private_key_hex: &str) -> Result<String> {
    let digest = parse_digest(digest_hex)?;
    let private_key = parse_private_key(private_key_hex)?;
    let sig = ecdsa::sign(&digest, &private_key, false)?;
    Ok(sig.to_hex())
}

/// Check whether `signature_hex` over `digest_hex` was produced by the key
/// behind `claimed_address` (case-insensitive compare).
///
/// Failing to validate is a normal outcome: malformed input, impossible
/// recovery ids and off-curve x values all come back as `false`, never as an
/// error.
pub fn verify(digest_hex: &str, signature_hex: &str, claimed_address: &str) -> bool {
    let Ok(digest) = parse_digest(digest_hex) else {
        return false;
    };
    let Ok(sig) = Signature::from_hex(signature_hex) else {
        return false;
    };
    let Ok(point) = ecdsa::recover_public_key(&digest, &sig) else {
        return false;
    };
    let Ok(public_key) = ecdsa::public_key_hex(&point) else {
        return false;
    };
    match address::derive_address(&public_key, TRON_MAINNET_VERSION) {
        Ok(derived) => derived.eq_ignore_ascii_case(claimed_address),
        Err(_) => false,
    }
}

/// A freshly generated identity: secret scalar, uncompressed public key and
/// mainnet address, all in their text forms.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

pub fn generate_key_pair() -> Result<KeyPair> {
    let secret = random_secret_key();
    let point = ecdsa::derive_public_key(&secret)?;
    let public_key = ecdsa::public_key_hex(&point)?;
    let address = address::derive_address(&public_key, TRON_MAINNET_VERSION)?;
    Ok(KeyPair {
        private_key: u256_bytes(&secret).hex(),
        public_key,
        address,
    })
}

fn parse_digest(digest_hex: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(digest_hex).map_err(|_| Error::MalformedDigest)?;
    bytes.try_into().map_err(|_| Error::MalformedDigest)
}

fn parse_private_key(private_key_hex: &str) -> Result<BigUint> {
    let bytes = hex::decode(private_key_hex).map_err(|_| Error::InvalidPrivateKey)?;
    if bytes.len() != 32 {
        return Err(Error::InvalidPrivateKey);
    }
    Ok(BigUint::from_bytes_be(&bytes))
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::sha256;

    const PRIVATE_KEY: &str = "3f4e2a07c9b8d16e5a0f9d84c21b73065e8fab91d04c62e5f17a8b3c9d05e641";
    const DIGEST: &str = "d5b23c36a02289e236036ea4df747ed5506808605b0a6974f13c0365f94aa0b8";
    const SIGNATURE: &str = "01b067db1174d66ce381ed859e343e95574f5ef92f33737592e028ef20c169e3\
                             981aa6b19b3167c014840a1eb157dbcca377f45c2dca2733b30260401333f38101";
    const ADDRESS: &str = "TFVqmgSkmtagNmjDKKMpB7SeqW7xtD6Wpf";

    #[test]
    fn hello_tron_end_to_end() {
        let digest = sha256(b"Hello, Tron!").hex();
        assert_eq!(digest, DIGEST);
        let sig = sign(&digest, PRIVATE_KEY).unwrap();
        assert_eq!(sig, SIGNATURE);
        assert!(verify(&digest, &sig, ADDRESS));
    }

    #[test]
    fn verify_is_case_insensitive_on_address() {
        assert!(verify(DIGEST, SIGNATURE, &ADDRESS.to_lowercase()));
        assert!(verify(DIGEST, SIGNATURE, &ADDRESS.to_uppercase()));
    }

    #[test]
    fn verify_rejects_wrong_address() {
        assert!(!verify(DIGEST, SIGNATURE, "TMVQGm1qAQYVdetCeGRRkTWYYrLXuHK2HC"));
    }

    #[test]
    fn verify_never_panics_on_malformed_input() {
        assert!(!verify(DIGEST, "", ADDRESS));
        assert!(!verify(DIGEST, "ab", ADDRESS));
        assert!(!verify(DIGEST, &SIGNATURE[..128], ADDRESS));
        assert!(!verify("not hex", SIGNATURE, ADDRESS));
        assert!(!verify("abcd", SIGNATURE, ADDRESS));
        assert!(!verify(DIGEST, SIGNATURE, ""));
    }

    #[test]
    fn tampering_flips_verification() {
        let mut sig_bytes = [0_u8; 65];
        hex::decode_to_slice(SIGNATURE, &mut sig_bytes).unwrap();
        let mut digest_bytes = [0_u8; 32];
        hex::decode_to_slice(DIGEST, &mut digest_bytes).unwrap();

        // every other recovery id
        for id in [0_u8, 2, 3] {
            let mut tampered = sig_bytes;
            tampered[64] = id;
            assert!(!verify(DIGEST, &tampered.hex(), ADDRESS));
        }

        // 10,000 randomized single-bit flips across r || s || recovery id
        // and the digest, seeded so every run exercises the same trials
        let mut rng = StdRng::seed_from_u64(0x7472_6f6e);
        for trial in 0..10_000 {
            let bit = rng.gen_range(0..(sig_bytes.len() + digest_bytes.len()) * 8);
            if bit < sig_bytes.len() * 8 {
                let mut tampered = sig_bytes;
                tampered[bit / 8] ^= 1 << (bit % 8);
                assert!(
                    !verify(DIGEST, &tampered.hex(), ADDRESS),
                    "trial {trial}: accepted signature with bit {bit} flipped"
                );
            } else {
                let bit = bit - sig_bytes.len() * 8;
                let mut tampered = digest_bytes;
                tampered[bit / 8] ^= 1 << (bit % 8);
                assert!(
                    !verify(&tampered.hex(), SIGNATURE, ADDRESS),
                    "trial {trial}: accepted digest with bit {bit} flipped"
                );
            }
        }
    }

    #[test]
    fn sign_surfaces_key_misuse() {
        assert_eq!(
            sign(DIGEST, "00"),
            Err(Error::InvalidPrivateKey)
        );
        let zero_key = "0".repeat(64);
        assert_eq!(sign(DIGEST, &zero_key), Err(Error::InvalidPrivateKey));
        assert_eq!(sign("abcd", PRIVATE_KEY), Err(Error::MalformedDigest));
    }

    #[test]
    fn generated_pairs_sign_and_verify() {
        for i in 0_u32..4 {
            let pair = generate_key_pair().unwrap();
            let digest = sha256(format!("round {i}").as_bytes()).hex();
            let sig = sign(&digest, &pair.private_key).unwrap();
            assert!(verify(&digest, &sig, &pair.address));
            // a signature from one key never verifies under another address
            assert!(!verify(&digest, &sig, ADDRESS));
        }
    }
}
