//! Modular big-integer arithmetic over an explicit modulus.
//!
//! Every function reduces its result into `[0, m)`. The same operations serve
//! both the coordinate field (mod p) and the group order (mod n); callers pick
//! the modulus. Timing is whatever `num-bigint` gives us, which matches the
//! GMP-backed arithmetic this replaces.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::error::{Error, Result};

pub fn add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

pub fn sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    ((a % m) + m - (b % m)) % m
}

pub fn mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

pub fn pow(base: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    base.modpow(exp, m)
}

/// Modular multiplicative inverse via the extended Euclidean algorithm.
///
/// Fails when `gcd(a, m) != 1`. For the prime moduli used by the curve this
/// only happens for `a ≡ 0`, which signing and recovery treat as a degenerate
/// signature.
pub fn inverse_mod(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    let mut r0 = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut r1 = BigInt::from_biguint(Sign::Plus, a % m);
    let mut t0 = BigInt::zero();
    let mut t1 = BigInt::one();

    while !r1.is_zero() {
        let q = &r0 / &r1;
        let r = &r0 - &q * &r1;
        r0 = r1;
        r1 = r;
        let t = &t0 - &q * &t1;
        t0 = t1;
        t1 = t;
    }

    if !r0.is_one() {
        return Err(Error::NoInverse);
    }
    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());
    let t = ((t0 % &m_int) + &m_int) % &m_int;
    // t is in [0, m) here, so the magnitude is the value itself
    Ok(t.magnitude().clone())
}

/// Square root in F_p for `p ≡ 3 (mod 4)`: `v^((p+1)/4) mod p`.
///
/// Returns `None` when `v` is a quadratic non-residue (the candidate root
/// squares to something else), which happens for about half of all inputs.
pub fn sqrt(v: &BigUint, p: &BigUint) -> Option<BigUint> {
    let exp = (p + 1_u8) >> 2_u32;
    let root = v.modpow(&exp, p);
    if mul(&root, &root, p) == v % p {
        Some(root)
    } else {
        None
    }
}
