pub mod address;
pub mod curve;
pub mod ecdsa;
pub mod error;
pub mod field;
pub mod secp;
pub mod signature;

use digest::Digest;
use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use sha3::Keccak256;

pub use error::{Error, Result};

#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

#[inline]
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

#[inline]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Secret scalar from the OS RNG, rejection-sampled into `[1, n-1]`.
pub fn random_secret_key() -> BigUint {
    let mut bytes = [0_u8; 32];
    loop {
        OsRng.fill_bytes(&mut bytes);
        let k = BigUint::from_bytes_be(&bytes);
        if !k.is_zero() && k < *curve::N {
            return k;
        }
    }
}

/// Big-endian serialization zero-padded to 32 bytes.
///
/// Callers must pass a value already reduced below 2^256.
pub fn u256_bytes(v: &BigUint) -> [u8; 32] {
    let src = v.to_bytes_be();
    debug_assert!(src.len() <= 32, "value exceeds 256 bits");
    let mut out = [0_u8; 32];
    out[32 - src.len()..].copy_from_slice(&src);
    out
}

pub trait EncodeHex {
    fn hex(&self) -> String;
}

impl<A> EncodeHex for A
where
    A: AsRef<[u8]>,
{
    fn hex(&self) -> String {
        hex::encode(self)
    }
}
