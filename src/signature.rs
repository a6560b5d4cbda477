//! Wire codec for recoverable signatures: `r(32) || s(32) || recovery(1)`,
//! hex-encoded as 130 characters.

use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::{u256_bytes, EncodeHex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
    /// Bit 0: parity of the ephemeral point's y. Bit 1: set when its x
    /// exceeded the group order and recovery must take the `x + n` branch.
    pub recovery_id: u8,
}

impl Signature {
    /// Parse the 130-char hex form. The recovery byte may use either the
    /// raw `0..=3` convention or the legacy `27..=30` one; both normalize
    /// to `0..=3`.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        if hex_str.len() != 130 {
            return Err(Error::MalformedSignature);
        }
        let bytes = hex::decode(hex_str).map_err(|_| Error::MalformedSignature)?;
        let recovery_id = match bytes[64] {
            id @ 0..=3 => id,
            id @ 27..=30 => id - 27,
            _ => return Err(Error::MalformedSignature),
        };
        Ok(Signature {
            r: BigUint::from_bytes_be(&bytes[..32]),
            s: BigUint::from_bytes_be(&bytes[32..64]),
            recovery_id,
        })
    }

    pub fn to_hex(&self) -> String {
        format!(
            "{}{}{:02x}",
            u256_bytes(&self.r).hex(),
            u256_bytes(&self.s).hex(),
            self.recovery_id
        )
    }
}
