//! secp256k1 group operations in affine short Weierstrass form (`y² = x³ + 7`).

use num_bigint::BigUint;
use num_traits::{Num, Zero};
use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::field;

/// Field prime `p = 2^256 - 2^32 - 977`.
pub static P: Lazy<BigUint> = Lazy::new(|| {
    uint("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f")
});

/// Group order `n`.
pub static N: Lazy<BigUint> = Lazy::new(|| {
    uint("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
});

/// Generator point `G`.
pub static G: Lazy<Point> = Lazy::new(|| Point::Affine {
    x: uint("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
    y: uint("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
});

fn uint(s: &str) -> BigUint {
    BigUint::from_str_radix(s, 16).unwrap()
}

/// A curve point. The identity is an explicit variant so it can never be
/// confused with real coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    pub fn is_on_curve(&self) -> bool {
        match self {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                let lhs = field::mul(y, y, &P);
                let rhs = curve_rhs(x);
                lhs == rhs
            }
        }
    }

    /// Group law. Handles identity operands, `P + (-P)` and `P + P`.
    pub fn add(&self, other: &Point) -> Point {
        let (x1, y1) = match self {
            Point::Infinity => return other.clone(),
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match other {
            Point::Infinity => return self.clone(),
            Point::Affine { x, y } => (x, y),
        };

        if x1 == x2 {
            // same x: either a doubling or mutually inverse points
            return if y1 == y2 {
                self.double()
            } else {
                Point::Infinity
            };
        }

        // chord slope (y2 - y1) / (x2 - x1)
        let slope = field::mul(
            &field::sub(y2, y1, &P),
            &prime_inverse(&field::sub(x2, x1, &P)),
            &P,
        );
        from_slope(&slope, x1, x2, y1)
    }

    /// Tangent-slope doubling; the identity and points with `y = 0` map to
    /// the identity.
    pub fn double(&self) -> Point {
        let (x, y) = match self {
            Point::Infinity => return Point::Infinity,
            Point::Affine { x, y } => (x, y),
        };
        if y.is_zero() {
            return Point::Infinity;
        }

        // tangent slope 3x² / 2y (a = 0)
        let three_x2 = field::mul(&BigUint::from(3_u8), &field::mul(x, x, &P), &P);
        let two_y = field::add(y, y, &P);
        let slope = field::mul(&three_x2, &prime_inverse(&two_y), &P);
        from_slope(&slope, x, x, y)
    }

    /// Double-and-add scalar multiplication; `k` is reduced mod `n` first,
    /// so `k = 0` (and `k = n`) yield the identity.
    pub fn mul(&self, k: &BigUint) -> Point {
        let mut k = k % &*N;
        let mut result = Point::Infinity;
        let mut base = self.clone();
        while !k.is_zero() {
            if k.bit(0) {
                result = result.add(&base);
            }
            base = base.double();
            k >>= 1_u32;
        }
        result
    }
}

/// `x³ + 7 mod p`.
fn curve_rhs(x: &BigUint) -> BigUint {
    field::add(
        &field::pow(x, &BigUint::from(3_u8), &P),
        &BigUint::from(7_u8),
        &P,
    )
}

/// x3 = s² - x1 - x2, y3 = s(x1 - x3) - y1
fn from_slope(slope: &BigUint, x1: &BigUint, x2: &BigUint, y1: &BigUint) -> Point {
    let x3 = field::sub(&field::sub(&field::mul(slope, slope, &P), x1, &P), x2, &P);
    let y3 = field::sub(&field::mul(slope, &field::sub(x1, &x3, &P), &P), y1, &P);
    Point::Affine { x: x3, y: y3 }
}

/// Inverse mod the prime `p`. The group law only inverts nonzero field
/// elements, which are always coprime to a prime modulus.
fn prime_inverse(a: &BigUint) -> BigUint {
    field::inverse_mod(a, &P).expect("nonzero element of a prime field")
}

/// Find the y with the requested parity for a given x, or fail when
/// `x³ + 7` has no square root (about half of all x values off the curve).
pub fn recover_y_from_x(x: &BigUint, want_odd: bool) -> Result<BigUint> {
    let v = curve_rhs(x);
    let root = field::sqrt(&v, &P).ok_or(Error::NotOnCurve)?;
    if root.bit(0) == want_odd {
        Ok(root)
    } else {
        Ok(&*P - root)
    }
}
