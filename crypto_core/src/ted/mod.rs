//! Arithmetic on the Twisted Edwards curve `-x^2 + y^2 = 1 + d x^2 y^2` over
//! `GF(2^255 - 19)` (the Edwards form of Curve25519).
//!
//! Points are affine value types. Encoding packs `2y + lsb(x)` into 32
//! little-endian bytes; decoding recovers `x` from
//! `x^2 = (y^2 - 1) / (d y^2 + 1)`.

pub mod field;

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use rand::{CryptoRng, Rng};
use zeroize::Zeroize;

use crate::utils::biguint_to_le_fixed;
use field::{add_mod, inv_mod, mul_mod, neg_mod, sqrt_mod, sub_mod};

/// Byte length of an encoded point.
pub const POINT_BYTES: usize = 32;

pub type EncodedPoint = [u8; POINT_BYTES];

#[derive(Debug, thiserror::Error)]
pub enum CurveError {
    #[error("point does not satisfy the curve equation")]
    NotOnCurve,

    #[error("value is a quadratic non-residue")]
    NonResidue,

    #[error("non-canonical point encoding")]
    NonCanonicalEncoding,

    #[error("square roots need an odd prime modulus")]
    EvenModulus,

    #[error("point is not a generator of the prime-order subgroup")]
    NotInSubgroup,
}

/// Curve domain parameters.
pub struct CurveParams {
    /// Field prime `q`.
    pub q: BigUint,
    /// Curve coefficient `d`.
    pub d: BigUint,
    /// Order of the prime subgroup generated by the base point.
    pub order: BigUint,
    /// Base point.
    pub base: TedPoint,
}

fn hex(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("valid curve constant")
}

pub static CURVE: Lazy<CurveParams> = Lazy::new(|| CurveParams {
    q: hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
    d: hex("52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3"),
    order: hex("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed"),
    base: TedPoint {
        x: hex("216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a"),
        y: hex("6666666666666666666666666666666666666666666666666666666666666658"),
    },
});

#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct TedPoint {
    pub x: BigUint,
    pub y: BigUint,
}

impl TedPoint {
    /// A point from raw coordinates, reduced modulo `q`. Membership is not
    /// checked; see [`TedPoint::validate`].
    pub fn new(x: BigUint, y: BigUint) -> Self {
        let q = &CURVE.q;
        TedPoint { x: x % q, y: y % q }
    }

    /// The neutral element `(0, 1)`.
    pub fn identity() -> Self {
        TedPoint {
            x: BigUint::zero(),
            y: BigUint::one(),
        }
    }

    pub fn base() -> Self {
        CURVE.base.clone()
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_one()
    }

    /// Check `-x^2 + y^2 = 1 + d x^2 y^2 (mod q)`.
    pub fn is_on_curve(&self) -> bool {
        let CurveParams { q, d, .. } = &*CURVE;
        let x2 = mul_mod(&self.x, &self.x, q);
        let y2 = mul_mod(&self.y, &self.y, q);
        let lhs = sub_mod(&y2, &x2, q);
        let rhs = add_mod(&BigUint::one(), &mul_mod(d, &mul_mod(&x2, &y2, q), q), q);
        lhs == rhs
    }

    pub fn validate(self) -> Result<Self, CurveError> {
        if self.is_on_curve() {
            Ok(self)
        } else {
            Err(CurveError::NotOnCurve)
        }
    }

    pub fn negate(&self) -> Self {
        TedPoint {
            x: neg_mod(&self.x, &CURVE.q),
            y: self.y.clone(),
        }
    }

    /// Affine addition:
    /// `x3 = (x1 y2 + x2 y1) / (1 + d x1 x2 y1 y2)`,
    /// `y3 = (y1 y2 + x1 x2) / (1 - d x1 x2 y1 y2)`.
    pub fn add_point(&self, other: &TedPoint) -> TedPoint {
        let CurveParams { q, d, .. } = &*CURVE;
        let x1y2 = mul_mod(&self.x, &other.y, q);
        let x2y1 = mul_mod(&other.x, &self.y, q);
        let x1x2 = mul_mod(&self.x, &other.x, q);
        let y1y2 = mul_mod(&self.y, &other.y, q);
        let dxy = mul_mod(d, &mul_mod(&x1y2, &x2y1, q), q);

        let one = BigUint::one();
        let den_x = inv_mod(&add_mod(&one, &dxy, q), q);
        let den_y = inv_mod(&sub_mod(&one, &dxy, q), q);

        TedPoint {
            x: mul_mod(&add_mod(&x1y2, &x2y1, q), &den_x, q),
            y: mul_mod(&add_mod(&y1y2, &x1x2, q), &den_y, q),
        }
    }

    /// Affine doubling:
    /// `x3 = 2xy / (y^2 - x^2)`, `y3 = (y^2 + x^2) / (2 - y^2 + x^2)`.
    pub fn double(&self) -> TedPoint {
        let q = &CURVE.q;
        let x2 = mul_mod(&self.x, &self.x, q);
        let y2 = mul_mod(&self.y, &self.y, q);
        let two = BigUint::from(2u32);

        let den_x = sub_mod(&y2, &x2, q);
        let den_y = sub_mod(&two, &den_x, q);
        let two_xy = mul_mod(&two, &mul_mod(&self.x, &self.y, q), q);

        TedPoint {
            x: mul_mod(&two_xy, &inv_mod(&den_x, q), q),
            y: mul_mod(&add_mod(&y2, &x2, q), &inv_mod(&den_y, q), q),
        }
    }

    /// `s * P` by left-to-right double-and-add over the bits of `s`.
    ///
    /// The ladder runs in projective coordinates so that only the final
    /// conversion back to affine needs an inversion.
    pub fn scalar_mul(&self, s: &BigUint) -> TedPoint {
        let p = ProjectivePoint::from(self);
        let mut acc = ProjectivePoint::identity();
        let bytes = s.to_bytes_le();
        for i in (0..s.bits()).rev() {
            acc = acc.add(&acc);
            if (bytes[i / 8] >> (i % 8)) & 1 == 1 {
                acc = acc.add(&p);
            }
        }
        acc.to_affine()
    }

    /// Pack `2y + lsb(x)` into 32 little-endian bytes.
    pub fn encode(&self) -> EncodedPoint {
        let mut e: BigUint = &self.y << 1;
        if self.x.is_odd() {
            e += 1u32;
        }
        // y < q < 2^255, so 2y + 1 fits in 256 bits.
        biguint_to_le_fixed::<POINT_BYTES>(&e).unwrap_or([0u8; POINT_BYTES])
    }

    /// Recover a point from [`TedPoint::encode`] output. Fails closed: the
    /// result is guaranteed to be on the curve.
    pub fn decode(enc: &EncodedPoint) -> Result<TedPoint, CurveError> {
        let CurveParams { q, d, .. } = &*CURVE;
        let e = BigUint::from_bytes_le(enc);
        let sign = e.is_odd();
        let y: BigUint = e >> 1;
        if &y >= q {
            return Err(CurveError::NonCanonicalEncoding);
        }

        let one = BigUint::one();
        let y2 = mul_mod(&y, &y, q);
        let num = sub_mod(&y2, &one, q);
        let den = add_mod(&mul_mod(d, &y2, q), &one, q);
        let x2 = mul_mod(&num, &inv_mod(&den, q), q);

        let mut x = sqrt_mod(&x2, q)?;
        if x.is_odd() != sign {
            if x.is_zero() {
                return Err(CurveError::NonCanonicalEncoding);
            }
            x = neg_mod(&x, q);
        }

        TedPoint { x, y }.validate()
    }

    /// [`TedPoint::decode`] restricted to the prime-order subgroup, minus the
    /// identity. Rejects small-order points and torsion components.
    pub fn decode_subgroup(enc: &EncodedPoint) -> Result<TedPoint, CurveError> {
        let p = TedPoint::decode(enc)?;
        if p.is_identity() || !p.scalar_mul(&CURVE.order).is_identity() {
            return Err(CurveError::NotInSubgroup);
        }
        Ok(p)
    }

    /// `x + y` as a 32-byte little-endian integer (not reduced), the input of
    /// OT key derivation.
    pub fn coordinate_sum(&self) -> [u8; POINT_BYTES] {
        let sum = &self.x + &self.y;
        // x, y < 2^255
        biguint_to_le_fixed::<POINT_BYTES>(&sum).unwrap_or([0u8; POINT_BYTES])
    }
}

/// A uniformly random scalar in `[1, order)`.
pub fn random_scalar<R: Rng + CryptoRng>(rng: &mut R) -> BigUint {
    rng.gen_biguint_range(&BigUint::one(), &CURVE.order)
}

/// Projective `(X : Y : Z)` with `x = X/Z`, `y = Y/Z`.
struct ProjectivePoint {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl ProjectivePoint {
    fn identity() -> Self {
        ProjectivePoint {
            x: BigUint::zero(),
            y: BigUint::one(),
            z: BigUint::one(),
        }
    }

    /// Unified addition for `a = -1` (add-2008-bbjlp); also used for doubling.
    fn add(&self, other: &ProjectivePoint) -> ProjectivePoint {
        let CurveParams { q, d, .. } = &*CURVE;
        let a = mul_mod(&self.z, &other.z, q);
        let b = mul_mod(&a, &a, q);
        let c = mul_mod(&self.x, &other.x, q);
        let dd = mul_mod(&self.y, &other.y, q);
        let e = mul_mod(d, &mul_mod(&c, &dd, q), q);
        let f = sub_mod(&b, &e, q);
        let g = add_mod(&b, &e, q);

        let cross = mul_mod(
            &add_mod(&self.x, &self.y, q),
            &add_mod(&other.x, &other.y, q),
            q,
        );
        let cross = sub_mod(&sub_mod(&cross, &c, q), &dd, q);

        ProjectivePoint {
            x: mul_mod(&mul_mod(&a, &f, q), &cross, q),
            y: mul_mod(&mul_mod(&a, &g, q), &add_mod(&dd, &c, q), q),
            z: mul_mod(&f, &g, q),
        }
    }

    fn to_affine(&self) -> TedPoint {
        let q = &CURVE.q;
        let z_inv = inv_mod(&self.z, q);
        TedPoint {
            x: mul_mod(&self.x, &z_inv, q),
            y: mul_mod(&self.y, &z_inv, q),
        }
    }
}

impl From<&TedPoint> for ProjectivePoint {
    fn from(p: &TedPoint) -> Self {
        ProjectivePoint {
            x: p.x.clone(),
            y: p.y.clone(),
            z: BigUint::one(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AesRng;
    use curve25519_dalek::{constants::ED25519_BASEPOINT_POINT, scalar::Scalar};

    #[test]
    fn test_domain_parameters() {
        let CurveParams { q, d, order, base } = &*CURVE;
        // q = 2^255 - 19
        assert_eq!(q + BigUint::from(19u32), BigUint::one() << 255);
        // d * 121666 = -121665
        assert_eq!(
            mul_mod(d, &BigUint::from(121666u32), q),
            neg_mod(&BigUint::from(121665u32), q)
        );
        // y_B * 5 = 4
        assert_eq!(mul_mod(&base.y, &BigUint::from(5u32), q), BigUint::from(4u32));
        assert!(base.is_on_curve());
        assert!(base.scalar_mul(order).is_identity());
    }

    #[test]
    fn test_add_matches_double() {
        let b = TedPoint::base();
        assert_eq!(b.add_point(&b), b.double());
        assert_eq!(b.add_point(&TedPoint::identity()), b);
        assert!(b.add_point(&b.negate()).is_identity());
    }

    #[test]
    fn test_scalar_mul_small() {
        let b = TedPoint::base();
        let mut acc = TedPoint::identity();
        for s in 0..10u32 {
            assert_eq!(b.scalar_mul(&BigUint::from(s)), acc);
            acc = acc.add_point(&b);
            assert!(acc.is_on_curve());
        }
    }

    #[test]
    fn test_curve_closure() {
        let mut rng = AesRng::new();
        let b = TedPoint::base();
        for _ in 0..4 {
            let s = random_scalar(&mut rng);
            let t = random_scalar(&mut rng);
            let lhs = b.scalar_mul(&(&s + &t));
            let rhs = b.scalar_mul(&s).add_point(&b.scalar_mul(&t));
            assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn test_encode_decode() {
        let mut rng = AesRng::new();
        let b = TedPoint::base();
        for p in [TedPoint::identity(), b.clone(), b.negate(), b.double()] {
            assert_eq!(TedPoint::decode(&p.encode()).unwrap(), p);
        }
        for _ in 0..8 {
            let p = b.scalar_mul(&random_scalar(&mut rng));
            assert_eq!(TedPoint::decode(&p.encode()).unwrap(), p);
        }
    }

    #[test]
    fn test_decode_rejects_non_residue() {
        // About half of all y values have no matching x.
        let rejected = (2u32..40)
            .map(|y| TedPoint::new(BigUint::zero(), BigUint::from(y)).encode())
            .filter(|enc| matches!(TedPoint::decode(enc), Err(CurveError::NonResidue)))
            .count();
        assert!(rejected > 0);
    }

    #[test]
    fn test_decode_rejects_non_canonical() {
        assert!(matches!(
            TedPoint::decode(&[0xff; 32]),
            Err(CurveError::NonCanonicalEncoding)
        ));
        // (0, 1) with the sign bit set.
        let mut enc = TedPoint::identity().encode();
        enc[0] |= 1;
        assert!(matches!(
            TedPoint::decode(&enc),
            Err(CurveError::NonCanonicalEncoding)
        ));
    }

    #[test]
    fn test_decode_subgroup() {
        let q = &CURVE.q;
        // (0, -1) has order 2.
        let two_torsion = TedPoint::new(BigUint::zero(), q - BigUint::one());
        assert!(two_torsion.is_on_curve());
        let mixed = TedPoint::base().add_point(&two_torsion);

        for p in [TedPoint::identity(), two_torsion, mixed] {
            let enc = p.encode();
            assert!(TedPoint::decode(&enc).is_ok());
            assert!(matches!(
                TedPoint::decode_subgroup(&enc),
                Err(CurveError::NotInSubgroup)
            ));
        }

        let p = TedPoint::base().double();
        assert_eq!(TedPoint::decode_subgroup(&p.encode()).unwrap(), p);
    }

    #[test]
    fn test_validate() {
        let off = TedPoint::new(BigUint::one(), BigUint::one());
        assert!(matches!(off.validate(), Err(CurveError::NotOnCurve)));
        assert!(TedPoint::base().validate().is_ok());
    }

    #[test]
    fn test_matches_dalek() {
        // Standard Ed25519 compression is y with the sign of x in bit 255.
        fn compress(p: &TedPoint) -> [u8; 32] {
            let mut bytes = biguint_to_le_fixed::<32>(&p.y).unwrap();
            bytes[31] |= (p.x.is_odd() as u8) << 7;
            bytes
        }

        let mut rng = AesRng::new();
        for _ in 0..4 {
            let s = random_scalar(&mut rng);
            let ours = TedPoint::base().scalar_mul(&s);
            let scalar = Scalar::from_bytes_mod_order(biguint_to_le_fixed::<32>(&s).unwrap());
            let theirs = (scalar * ED25519_BASEPOINT_POINT).compress();
            assert_eq!(compress(&ours), theirs.to_bytes());
        }
    }
}
