//! Round-constant derivation.
//!
//! Both tables are seeded by two 100-digit blocks of the decimal expansion
//! of pi. For round `r` and word `i`:
//!
//! ```text
//! p0 = pi0^r, p1 = pi1^i, s = (p0 + p1)^e
//! C[r][i] = g * p0^2 + s
//! D[r][i] = g * p1^2 + s + g^-1
//! ```
//!
//! where `e = alpha^-1 mod q`.

use super::params::{AnemoiParams, Branches};
use crate::field::{Fp, PrimeField};
use num_bigint::BigUint;
use num_traits::Zero;

/// Digits 1..=100 after the decimal point of pi.
const PI_0_DIGITS: &str = "1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";

/// Digits 101..=200 after the decimal point of pi.
const PI_1_DIGITS: &str = "8214808651328230664709384460955058223172535940812848111745028410270193852110555964462294895493038196";

fn digits_mod(field: &PrimeField, digits: &str) -> Fp {
    let value = digits
        .bytes()
        .fold(BigUint::zero(), |acc, d| acc * 10u32 + u32::from(d - b'0'));
    field.reduce(&value)
}

/// The `C` and `D` round-constant tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConstants {
    c: Vec<Vec<Fp>>,
    d: Vec<Vec<Fp>>,
}

impl RoundConstants {
    /// Derive both tables.
    ///
    /// `exponent` is the power applied to `p0 + p1`; the published
    /// parameter sets use `alpha⁻¹ mod q`.
    pub fn generate(
        field: &PrimeField,
        branches: Branches,
        num_rounds: usize,
        generator: &Fp,
        generator_inv: &Fp,
        exponent: &BigUint,
    ) -> Self {
        let pi_0 = digits_mod(field, PI_0_DIGITS);
        let pi_1 = digits_mod(field, PI_1_DIGITS);

        // pi1^i and g * (pi1^i)^2 do not depend on the round
        let mut p1 = Vec::with_capacity(branches.count());
        let mut acc = field.one();
        for _ in 0..branches.count() {
            p1.push(acc.clone());
            acc = field.mul(&acc, &pi_1);
        }
        let d_base: Vec<Fp> = p1
            .iter()
            .map(|p| field.mul(generator, &field.square(p)))
            .collect();

        // grown per round; num_rounds is caller-supplied here
        let mut c = Vec::new();
        let mut d = Vec::new();
        let mut p0 = field.one();

        for _ in 0..num_rounds {
            let c_base = field.mul(generator, &field.square(&p0));
            let mut c_row = Vec::with_capacity(branches.count());
            let mut d_row = Vec::with_capacity(branches.count());

            for (p1_i, d_base_i) in p1.iter().zip(&d_base) {
                let s = field.pow(&field.add(&p0, p1_i), exponent);
                c_row.push(field.add(&c_base, &s));
                d_row.push(field.add(&field.add(d_base_i, &s), generator_inv));
            }

            c.push(c_row);
            d.push(d_row);
            p0 = field.mul(&p0, &pi_0);
        }

        Self { c, d }
    }

    /// Derive the tables for a parameter set.
    pub fn for_params(params: &AnemoiParams) -> Self {
        Self::generate(
            params.field(),
            params.branches(),
            params.num_rounds(),
            params.generator(),
            params.generator_inv(),
            params.alpha_inv().value(),
        )
    }

    /// Number of rounds covered.
    pub fn num_rounds(&self) -> usize {
        self.c.len()
    }

    /// The `C` table (added to `X`).
    pub fn c(&self) -> &[Vec<Fp>] {
        &self.c
    }

    /// The `D` table (added to `Y`).
    pub fn d(&self) -> &[Vec<Fp>] {
        &self.d
    }

    /// `C[round]` and `D[round]`.
    pub fn round(&self, round: usize) -> Option<(&[Fp], &[Fp])> {
        Some((self.c.get(round)?, self.d.get(round)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_reduction_is_exact() {
        let field = PrimeField::new(BigUint::from(1_000_003u32)).unwrap();
        let parsed = BigUint::parse_bytes(PI_0_DIGITS.as_bytes(), 10).unwrap();
        assert_eq!(digits_mod(&field, PI_0_DIGITS), field.reduce(&parsed));
    }

    #[test]
    fn test_table_shape() {
        let params = AnemoiParams::bn254(3, 5).unwrap();
        let rc = RoundConstants::for_params(&params);
        assert_eq!(rc.num_rounds(), 12);
        assert_eq!(rc.c().len(), 12);
        assert!(rc.c().iter().chain(rc.d()).all(|row| row.len() == 3));
        assert!(rc.round(11).is_some());
        assert!(rc.round(12).is_none());
    }

    #[test]
    fn test_first_round_bn254() {
        let params = AnemoiParams::bn254(1, 5).unwrap();
        let rc = RoundConstants::for_params(&params);
        assert_eq!(
            rc.c()[0][0].to_string(),
            "3839885374615983619079149092436643520339116779748853678198206353802169405536"
        );
        assert_eq!(
            rc.d()[0][0].to_string(),
            "12595182523351693707977711390539553555758462539915267415677488028432492803783"
        );
    }

    #[test]
    fn test_deterministic() {
        let params = AnemoiParams::bn254(4, 7).unwrap();
        assert_eq!(
            RoundConstants::for_params(&params),
            RoundConstants::for_params(&params)
        );
    }
}
