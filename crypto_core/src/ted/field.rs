//! Arithmetic modulo an odd prime, including square roots.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::CurveError;

#[inline]
pub fn add_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a + b) % p
}

#[inline]
pub fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    ((a % p) + p - (b % p)) % p
}

#[inline]
pub fn mul_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a * b) % p
}

#[inline]
pub fn neg_mod(a: &BigUint, p: &BigUint) -> BigUint {
    sub_mod(&BigUint::zero(), a, p)
}

/// Inverse modulo the prime `p` as `a^(p-2)`. Zero maps to zero.
#[inline]
pub fn inv_mod(a: &BigUint, p: &BigUint) -> BigUint {
    let e = p - BigUint::from(2u32);
    a.modpow(&e, p)
}

/// Legendre symbol of `a` modulo the odd prime `p` by Euler's criterion.
pub fn legendre(a: &BigUint, p: &BigUint) -> i8 {
    let e = (p - BigUint::one()) >> 1;
    let r = (a % p).modpow(&e, p);
    if r.is_zero() {
        0
    } else if r.is_one() {
        1
    } else {
        -1
    }
}

/// A square root of `a` modulo the odd prime `p`.
///
/// Uses `a^((p+1)/4)` when `p = 3 mod 4` and Tonelli-Shanks otherwise.
/// A non-residue is an error, never a wrong root.
pub fn sqrt_mod(a: &BigUint, p: &BigUint) -> Result<BigUint, CurveError> {
    if p.is_even() {
        return Err(CurveError::EvenModulus);
    }
    let a = a % p;
    match legendre(&a, p) {
        0 => return Ok(BigUint::zero()),
        1 => {}
        _ => return Err(CurveError::NonResidue),
    }

    let four = BigUint::from(4u32);
    if p % &four == BigUint::from(3u32) {
        let e = (p + BigUint::one()) / &four;
        return Ok(a.modpow(&e, p));
    }

    // p - 1 = odd * 2^twofac
    let one = BigUint::one();
    let p_minus_one = p - &one;
    let mut odd = p_minus_one.clone();
    let mut twofac = 0usize;
    while odd.is_even() {
        odd >>= 1;
        twofac += 1;
    }

    let mut z = BigUint::from(2u32);
    while legendre(&z, p) != -1 {
        z += 1u32;
    }

    let mut m = twofac;
    let mut c = z.modpow(&odd, p);
    let mut t = a.modpow(&odd, p);
    let mut r = a.modpow(&((&odd + &one) >> 1), p);

    while !t.is_one() {
        // Least 0 < i < m with t^(2^i) = 1.
        let mut i = 0;
        let mut t2 = t.clone();
        while !t2.is_one() {
            t2 = mul_mod(&t2, &t2, p);
            i += 1;
            if i == m {
                return Err(CurveError::NonResidue);
            }
        }

        let mut b = c.clone();
        for _ in 0..(m - i - 1) {
            b = mul_mod(&b, &b, p);
        }
        r = mul_mod(&r, &b, p);
        c = mul_mod(&b, &b, p);
        t = mul_mod(&t, &c, p);
        m = i;
    }

    Ok(r)
}
