use crypto_core::{utils::biguint_bits, PaillierCiphertext, PaillierPublicKey};
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::{CryptoRng, Rng};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{CompareError, ProtocolParams};

/// Bob's input hidden inside Alice's ciphertext.
///
/// `ct_gamma` encrypts `gamma = 2^l + rho - b + a` for a fresh
/// `(l + k)`-bit mask `rho`. The low `l + 1` bits of `gamma` and `rho`
/// are the circuit inputs of Alice and Bob.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BlindedInput {
    rho: BigUint,
    #[zeroize(skip)]
    ct_gamma: PaillierCiphertext,
}

impl BlindedInput {
    pub fn generate<R: Rng + CryptoRng>(
        params: &ProtocolParams,
        pk: &PaillierPublicKey,
        ct_input: &PaillierCiphertext,
        input: u64,
        rng: &mut R,
    ) -> Result<Self, CompareError> {
        params.check_input(input)?;
        pk.check_ciphertext(ct_input)?;

        let rho = rng.gen_biguint(params.l + params.k);
        // 2^l > input, so the difference is non-negative.
        let shift = (BigUint::one() << params.l) + &rho - BigUint::from(input);
        let ct_shift = pk.encrypt(&shift, rng)?;
        let ct_gamma = pk.add(&ct_shift, ct_input);

        Ok(Self { rho, ct_gamma })
    }

    pub fn ct_gamma(&self) -> &PaillierCiphertext {
        &self.ct_gamma
    }

    /// The low `n` bits of `rho`, least significant first.
    pub fn rho_bits(&self, n: usize) -> Vec<bool> {
        biguint_bits(&self.rho, n)
    }
}
