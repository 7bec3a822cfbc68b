//! The comparison circuit.
//!
//! Both parties hold `l + 1` bits, least significant first. A carry wire
//! runs over the low `l` bits: per bit, `c' = ((a ^ c) & (b ^ c)) ^ s`
//! where `s` is the carrying party's bit. The carry ends equal to the
//! carrying party's bit at the highest position where the inputs differ,
//! or 0 if the low bits are equal. The output is `c ^ b_l ^ a_l`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gate::Circuit;

/// Which relation the protocol decides between Alice's and Bob's values.
///
/// The numeric form (0..=3) selects the carry source and whether the decoded
/// bit is flipped: 0 and 1 carry the garbler's bit, 2 and 3 the evaluator's,
/// odd values flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Inequality {
    /// `a <= b`
    LessOrEqual,
    /// `a > b`
    #[default]
    Greater,
    /// `a >= b`
    GreaterOrEqual,
    /// `a < b`
    Less,
}

impl Inequality {
    /// Map a numeric parameter, taken modulo 4.
    pub fn from_param(param: u32) -> Self {
        match param % 4 {
            0 => Inequality::LessOrEqual,
            1 => Inequality::Greater,
            2 => Inequality::GreaterOrEqual,
            _ => Inequality::Less,
        }
    }

    pub fn param(&self) -> u32 {
        match self {
            Inequality::LessOrEqual => 0,
            Inequality::Greater => 1,
            Inequality::GreaterOrEqual => 2,
            Inequality::Less => 3,
        }
    }

    /// Whether the garbler's bit feeds the carry wire.
    #[inline]
    pub fn carries_garbler(&self) -> bool {
        self.param() < 2
    }

    /// Whether the decoded output bit is flipped.
    #[inline]
    pub fn flips(&self) -> bool {
        self.param() % 2 == 1
    }

    /// Apply the output flip to a decoded circuit bit.
    #[inline]
    pub fn finalize(&self, bit: bool) -> bool {
        bit ^ self.flips()
    }

    /// The relation in the clear.
    pub fn holds(&self, a: u64, b: u64) -> bool {
        match self {
            Inequality::LessOrEqual => a <= b,
            Inequality::Greater => a > b,
            Inequality::GreaterOrEqual => a >= b,
            Inequality::Less => a < b,
        }
    }
}

impl fmt::Display for Inequality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Inequality::LessOrEqual => "<=",
            Inequality::Greater => ">",
            Inequality::GreaterOrEqual => ">=",
            Inequality::Less => "<",
        };
        f.write_str(op)
    }
}

impl Circuit {
    /// The comparison circuit over `l + 1` input bits per party.
    ///
    /// It has exactly `l` AND gates, one per low bit. Bit 0 sees a zero
    /// carry, so its two carry XORs are skipped.
    pub fn comparison(l: usize, inequality: Inequality) -> Circuit {
        let mut circ = Circuit::new(l + 1, 1);
        let carries_garbler = inequality.carries_garbler();

        let mut carry = None;
        for i in 0..l {
            let a = circ.garbler_input(i);
            let b = circ.evaluator_input(i);
            let source = if carries_garbler { a } else { b };

            let (x1, x2) = match carry {
                None => (a, b),
                Some(c) => (circ.xor(a, c), circ.xor(b, c)),
            };
            let and = circ.and(x1, x2);
            carry = Some(circ.xor(and, source));
        }

        let a_top = circ.garbler_input(l);
        let b_top = circ.evaluator_input(l);
        match carry {
            Some(c) => {
                let t = circ.xor(c, b_top);
                circ.xor(t, a_top);
            }
            None => {
                circ.xor(b_top, a_top);
            }
        }
        circ
    }
}
