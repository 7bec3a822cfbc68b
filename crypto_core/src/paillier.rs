//! Paillier encryption with generator `g = n + 1`.
//!
//! `Enc(m; r) = (1 + m n) r^n mod n^2`. Ciphertexts multiply to the
//! encryption of the sum of their plaintexts modulo `n`.

use num_bigint::{BigUint, RandBigInt, RandPrime};
use num_integer::Integer;
use num_traits::{CheckedSub, One};
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Debug, thiserror::Error)]
pub enum PaillierError {
    #[error("plaintext must be smaller than the modulus")]
    MessageTooLarge,

    #[error("ciphertext is not a unit of Z_(n^2)")]
    InvalidCiphertext,

    #[error("primes must be distinct and coprime to the group order")]
    InvalidPrimes,

    #[error("modulus of {0} bits is too small")]
    KeyTooSmall(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaillierPublicKey {
    n: BigUint,
    n_squared: BigUint,
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PaillierSecretKey {
    lambda: BigUint,
    mu: BigUint,
    #[zeroize(skip)]
    public: PaillierPublicKey,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaillierCiphertext(pub BigUint);

/// Smallest modulus [`keygen`] accepts.
pub const MIN_MODULUS_BITS: usize = 64;

/// A fresh key pair whose modulus has about `bits` bits.
pub fn keygen<R: Rng + CryptoRng>(
    bits: usize,
    rng: &mut R,
) -> Result<(PaillierPublicKey, PaillierSecretKey), PaillierError> {
    if bits < MIN_MODULUS_BITS {
        return Err(PaillierError::KeyTooSmall(bits));
    }
    loop {
        let p = rng.gen_prime(bits / 2);
        let q = rng.gen_prime(bits - bits / 2);
        match from_primes(&p, &q) {
            Ok(keys) => return Ok(keys),
            Err(PaillierError::InvalidPrimes) => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Build the key pair for `n = p q`.
pub fn from_primes(
    p: &BigUint,
    q: &BigUint,
) -> Result<(PaillierPublicKey, PaillierSecretKey), PaillierError> {
    let one = BigUint::one();
    if p == q || p <= &one || q <= &one {
        return Err(PaillierError::InvalidPrimes);
    }
    let n = p * q;
    let p1 = p - &one;
    let q1 = q - &one;
    let phi = &p1 * &q1;
    if !n.gcd(&phi).is_one() {
        return Err(PaillierError::InvalidPrimes);
    }

    let lambda = p1.lcm(&q1);
    // lambda is a unit mod n, so lambda^(phi - 1) is its inverse.
    let mu = lambda.modpow(&(&phi - &one), &n);

    let public = PaillierPublicKey {
        n_squared: &n * &n,
        n,
    };
    let secret = PaillierSecretKey {
        lambda,
        mu,
        public: public.clone(),
    };
    Ok((public, secret))
}

impl PaillierPublicKey {
    /// Rebuild a public key received from the key holder.
    pub fn from_modulus(n: BigUint) -> Result<Self, PaillierError> {
        if n.bits() < MIN_MODULUS_BITS {
            return Err(PaillierError::KeyTooSmall(n.bits()));
        }
        if n.is_even() {
            return Err(PaillierError::InvalidPrimes);
        }
        Ok(Self {
            n_squared: &n * &n,
            n,
        })
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    pub fn bits(&self) -> usize {
        self.n.bits()
    }

    pub fn encrypt<R: Rng + CryptoRng>(
        &self,
        m: &BigUint,
        rng: &mut R,
    ) -> Result<PaillierCiphertext, PaillierError> {
        if m >= &self.n {
            return Err(PaillierError::MessageTooLarge);
        }
        let one = BigUint::one();
        let r = loop {
            let r = rng.gen_biguint_range(&one, &self.n);
            if r.gcd(&self.n).is_one() {
                break r;
            }
        };
        let gm = (&one + m * &self.n) % &self.n_squared;
        let rn = r.modpow(&self.n, &self.n_squared);
        Ok(PaillierCiphertext((gm * rn) % &self.n_squared))
    }

    /// `Enc(m1) * Enc(m2) = Enc(m1 + m2 mod n)`.
    pub fn add(&self, a: &PaillierCiphertext, b: &PaillierCiphertext) -> PaillierCiphertext {
        PaillierCiphertext((&a.0 * &b.0) % &self.n_squared)
    }

    /// A valid ciphertext is a unit of `Z_(n^2)`.
    pub fn check_ciphertext(&self, c: &PaillierCiphertext) -> Result<(), PaillierError> {
        if c.0 >= self.n_squared || !c.0.gcd(&self.n).is_one() {
            Err(PaillierError::InvalidCiphertext)
        } else {
            Ok(())
        }
    }
}

impl PaillierSecretKey {
    pub fn public_key(&self) -> &PaillierPublicKey {
        &self.public
    }

    pub fn decrypt(&self, c: &PaillierCiphertext) -> Result<BigUint, PaillierError> {
        let pk = &self.public;
        pk.check_ciphertext(c)?;
        let u = c.0.modpow(&self.lambda, &pk.n_squared);
        // L(u) = (u - 1) / n
        let l = u
            .checked_sub(&BigUint::one())
            .ok_or(PaillierError::InvalidCiphertext)?
            / &pk.n;
        Ok((l * &self.mu) % &pk.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AesRng;

    /// Keys over the Mersenne primes 2^127 - 1 and 2^107 - 1.
    fn test_keys() -> (PaillierPublicKey, PaillierSecretKey) {
        let one = BigUint::one();
        let p = (&one << 127) - &one;
        let q = (&one << 107) - &one;
        from_primes(&p, &q).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt() {
        let mut rng = AesRng::new();
        let (pk, sk) = test_keys();
        for m in [0u64, 1, 42, u64::MAX] {
            let m = BigUint::from(m);
            let c = pk.encrypt(&m, &mut rng).unwrap();
            assert_eq!(sk.decrypt(&c).unwrap(), m);
        }
        let top = pk.n() - BigUint::one();
        let c = pk.encrypt(&top, &mut rng).unwrap();
        assert_eq!(sk.decrypt(&c).unwrap(), top);
    }

    #[test]
    fn test_randomized() {
        let mut rng = AesRng::new();
        let (pk, _) = test_keys();
        let m = BigUint::from(5u32);
        assert_ne!(pk.encrypt(&m, &mut rng).unwrap(), pk.encrypt(&m, &mut rng).unwrap());
    }

    #[test]
    fn test_homomorphic_add() {
        let mut rng = AesRng::new();
        let (pk, sk) = test_keys();
        let a = rng.gen_biguint_below(pk.n());
        let b = rng.gen_biguint_below(pk.n());
        let c = pk.add(
            &pk.encrypt(&a, &mut rng).unwrap(),
            &pk.encrypt(&b, &mut rng).unwrap(),
        );
        assert_eq!(sk.decrypt(&c).unwrap(), (a + b) % pk.n());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut rng = AesRng::new();
        let (pk, sk) = test_keys();
        assert!(matches!(
            pk.encrypt(pk.n(), &mut rng),
            Err(PaillierError::MessageTooLarge)
        ));
        for bad in [
            pk.n_squared().clone(),
            BigUint::from(0u32),
            pk.n().clone(),
            pk.n() * BigUint::from(3u32),
        ] {
            let bad = PaillierCiphertext(bad);
            assert!(matches!(sk.decrypt(&bad), Err(PaillierError::InvalidCiphertext)));
            assert!(pk.check_ciphertext(&bad).is_err());
        }
    }

    #[test]
    fn test_invalid_primes() {
        let p = BigUint::from(7u32);
        assert!(matches!(from_primes(&p, &p), Err(PaillierError::InvalidPrimes)));
        // gcd(3 * 7, 2 * 6) = 3
        assert!(matches!(
            from_primes(&BigUint::from(3u32), &BigUint::from(7u32)),
            Err(PaillierError::InvalidPrimes)
        ));
    }

    #[test]
    fn test_from_modulus() {
        let (pk, _) = test_keys();
        assert_eq!(PaillierPublicKey::from_modulus(pk.n().clone()).unwrap(), pk);
        assert!(matches!(
            PaillierPublicKey::from_modulus(BigUint::from(15u32)),
            Err(PaillierError::KeyTooSmall(4))
        ));
        assert!(matches!(
            PaillierPublicKey::from_modulus(pk.n() << 1),
            Err(PaillierError::InvalidPrimes)
        ));
    }

    #[test]
    fn test_keygen() {
        let mut rng = AesRng::new();
        let (pk, sk) = keygen(256, &mut rng).unwrap();
        assert!(pk.bits() >= 254);
        let m = BigUint::from(1234567u32);
        let c = pk.encrypt(&m, &mut rng).unwrap();
        assert_eq!(sk.decrypt(&c).unwrap(), m);
        assert!(matches!(keygen(32, &mut rng), Err(PaillierError::KeyTooSmall(32))));
    }
}
