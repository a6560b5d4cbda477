//! ECDSA signing and public-key recovery over secp256k1.
//!
//! Recovery solves `s·k ≡ e + r·d (mod n)` for `Q = d·G` using the ephemeral
//! point `R = k·G` rebuilt from `r` and the recovery id, so a verifier needs
//! only public quantities: `Q = r⁻¹·(s·R + (-e)·G)`.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::curve::{self, Point, G, N, P};
use crate::error::{Error, Result};
use crate::signature::Signature;
use crate::{field, sha256d, u256_bytes, EncodeHex};

/// Deterministic per-signature nonce: `sha256d(key || digest || counter)`
/// reduced mod `n`. Reproducible by design (no RFC 6979 machinery); the
/// counter only advances on the astronomically unlikely degenerate cases.
fn nonce(private_key: &BigUint, digest: &[u8; 32], counter: u32) -> BigUint {
    let mut data = Vec::with_capacity(68);
    data.extend_from_slice(&u256_bytes(private_key));
    data.extend_from_slice(digest);
    data.extend_from_slice(&counter.to_be_bytes());
    BigUint::from_bytes_be(&sha256d(&data)) % &*N
}

/// Sign a 32-byte digest, producing a recoverable signature.
///
/// With `canonical` set, an `s` above `n/2` is replaced by `n - s` and the
/// parity bit of the recovery id flipped to match; with it unset `s` is left
/// exactly as computed. Recovery works for either policy, but the signer and
/// any fixed expectations must agree on one.
pub fn sign(digest: &[u8; 32], private_key: &BigUint, canonical: bool) -> Result<Signature> {
    if private_key.is_zero() || *private_key >= *N {
        return Err(Error::InvalidPrivateKey);
    }

    let e = BigUint::from_bytes_be(digest);
    let half_n = &*N >> 1_u32;
    let mut counter = 0_u32;
    loop {
        let k = nonce(private_key, digest, counter);
        counter += 1;
        if k.is_zero() {
            continue;
        }

        let Point::Affine { x: rx, y: ry } = G.mul(&k) else {
            continue;
        };
        let r = &rx % &*N;
        if r.is_zero() {
            log::debug!("r = 0, retrying with next nonce");
            continue;
        }

        let k_inv = field::inverse_mod(&k, &N)?;
        let rd = field::mul(&r, private_key, &N);
        let s = field::mul(&k_inv, &field::add(&e, &rd, &N), &N);
        if s.is_zero() {
            log::debug!("s = 0, retrying with next nonce");
            continue;
        }

        let mut recovery_id = u8::from(ry.bit(0));
        if rx >= *N {
            recovery_id |= 2;
        }
        let s = if canonical && s > half_n {
            // negating s mirrors R across the x-axis for recovery
            recovery_id ^= 1;
            &*N - s
        } else {
            s
        };

        return Ok(Signature { r, s, recovery_id });
    }
}

/// Recover the signer's public key from a digest and signature.
pub fn recover_public_key(digest: &[u8; 32], sig: &Signature) -> Result<Point> {
    if sig.recovery_id > 3 {
        return Err(Error::InvalidRecoveryId(sig.recovery_id));
    }
    if sig.r.is_zero() || sig.s.is_zero() || sig.r >= *N || sig.s >= *N {
        return Err(Error::InvalidSignature);
    }

    let want_odd = sig.recovery_id & 1 == 1;
    let x = if sig.recovery_id & 2 != 0 {
        &sig.r + &*N
    } else {
        sig.r.clone()
    };
    if x >= *P {
        return Err(Error::RecoveryOutOfRange);
    }

    let y = curve::recover_y_from_x(&x, want_odd).map_err(|_| Error::RecoveryFailed)?;
    let ephemeral = Point::Affine { x, y };

    let e = BigUint::from_bytes_be(digest) % &*N;
    let e_neg = (&*N - e) % &*N;
    let r_inv = field::inverse_mod(&sig.r, &N)?;

    let q = ephemeral
        .mul(&sig.s)
        .add(&G.mul(&e_neg))
        .mul(&r_inv);
    if q.is_infinity() {
        return Err(Error::PointAtInfinity);
    }
    Ok(q)
}

/// `Q = d·G`, validating the private key range.
pub fn derive_public_key(private_key: &BigUint) -> Result<Point> {
    if private_key.is_zero() || *private_key >= *N {
        return Err(Error::InvalidPrivateKey);
    }
    Ok(G.mul(private_key))
}

/// Uncompressed serialization `04 || x || y`, coordinates zero-padded to
/// 32 bytes each.
pub fn public_key_hex(point: &Point) -> Result<String> {
    let Point::Affine { x, y } = point else {
        return Err(Error::PointAtInfinity);
    };
    Ok(format!("04{}{}", u256_bytes(x).hex(), u256_bytes(y).hex()))
}
