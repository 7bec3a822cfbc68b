use circuit::Inequality;
use crypto_core::PaillierPublicKey;
use serde::{Deserialize, Serialize};

use super::CompareError;

/// Largest supported input width.
pub const MAX_L: usize = 64;

/// Parameters both parties must agree on before a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParams {
    /// Bit length of the compared values.
    pub l: usize,
    /// Statistical slack of the blinding mask, in bits.
    pub k: usize,
    pub inequality: Inequality,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            l: 32,
            k: 40,
            inequality: Inequality::Greater,
        }
    }
}

impl ProtocolParams {
    pub fn new(l: usize, k: usize, inequality: Inequality) -> Self {
        Self { l, k, inequality }
    }

    /// Number of circuit input wires per party.
    #[inline]
    pub fn wires(&self) -> usize {
        self.l + 1
    }

    /// Blinded values stay below `2^(l+k+1)`, so the modulus needs more
    /// than `l + k + 2` bits for decryption to recover them exactly.
    pub fn validate(&self, pk: &PaillierPublicKey) -> Result<(), CompareError> {
        if self.l == 0 || self.l > MAX_L {
            return Err(CompareError::InvalidParams(format!(
                "l = {} outside 1..={}",
                self.l, MAX_L
            )));
        }
        if self.k == 0 {
            return Err(CompareError::InvalidParams("k must be positive".into()));
        }
        let need = self.l + self.k + 2;
        if pk.bits() <= need {
            return Err(CompareError::InvalidParams(format!(
                "modulus has {} bits, needs more than {}",
                pk.bits(),
                need
            )));
        }
        Ok(())
    }

    pub fn check_input(&self, input: u64) -> Result<(), CompareError> {
        if self.l < 64 && input >> self.l != 0 {
            return Err(CompareError::InputTooLarge { input, l: self.l });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_json_test() {
        let p: ProtocolParams = serde_json::from_str(r#"{"l": 16}"#).unwrap();
        assert_eq!(p, ProtocolParams::new(16, 40, Inequality::Greater));

        let p: ProtocolParams =
            serde_json::from_str(r#"{"k": 80, "inequality": "less_or_equal"}"#).unwrap();
        assert_eq!(p, ProtocolParams::new(32, 80, Inequality::LessOrEqual));
    }

    #[test]
    fn check_input_test() {
        let p = ProtocolParams::new(8, 40, Inequality::Less);
        assert!(p.check_input(255).is_ok());
        assert!(p.check_input(256).is_err());
        assert!(ProtocolParams::new(64, 40, Inequality::Less)
            .check_input(u64::MAX)
            .is_ok());
    }
}
