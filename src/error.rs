//! Error taxonomy for signing, recovery and address handling.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("private key must be in [1, n-1]")]
    InvalidPrivateKey,
    #[error("digest must be 32 bytes of hex")]
    MalformedDigest,
    #[error("signature must be 130 hex chars: r(32) || s(32) || recovery(1)")]
    MalformedSignature,
    #[error("recovery id must be in 0..=3, got {0}")]
    InvalidRecoveryId(u8),
    #[error("signature scalar out of range")]
    InvalidSignature,
    #[error("recovered x coordinate exceeds the field prime")]
    RecoveryOutOfRange,
    #[error("x coordinate has no matching y on the curve")]
    NotOnCurve,
    #[error("no public key recoverable from this signature")]
    RecoveryFailed,
    #[error("recovered the point at infinity")]
    PointAtInfinity,
    #[error("public key must be 65 uncompressed bytes (04 || x || y)")]
    InvalidPublicKey,
    #[error("address is not valid Base58Check")]
    MalformedAddress,
    #[error("address checksum mismatch")]
    ChecksumMismatch,
    #[error("no modular inverse exists")]
    NoInverse,
}
