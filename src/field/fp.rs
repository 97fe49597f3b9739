//! Prime field over a runtime modulus.
//!
//! [`PrimeField`] owns the modulus and performs all arithmetic; [`Fp`] is the
//! element type. Elements are only constructed by a field, so every `Fp` a
//! caller sees is reduced into `[0, q)`.

use super::primality::is_prime;
use super::{BLS12_381_SCALAR_MODULUS_BE, BN254_SCALAR_MODULUS_BE};
use crate::error::{AnemoiError, AnemoiResult};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::fmt;

/// An element of a prime field.
///
/// Carries no reference to its field; arithmetic goes through the
/// [`PrimeField`] that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fp(BigUint);

impl Fp {
    /// Get the canonical integer value in `[0, q)`.
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// Consume the element and return its canonical integer value.
    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// Returns true for the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Fp> for BigUint {
    fn from(e: Fp) -> BigUint {
        e.0
    }
}

impl fmt::Display for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A prime field `GF(q)` with `q` fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimeField {
    modulus: BigUint,
    byte_len: usize,
}

impl PrimeField {
    /// Create a field from a prime modulus.
    ///
    /// Returns [`AnemoiError::InvalidModulus`] if `modulus < 2` or if it is
    /// not prime.
    pub fn new(modulus: BigUint) -> AnemoiResult<Self> {
        if !is_prime(&modulus) {
            return Err(AnemoiError::InvalidModulus(modulus.to_string()));
        }
        Ok(Self::from_known_prime(modulus))
    }

    /// Create a field from a decimal or `0x`-prefixed hex modulus.
    pub fn parse_modulus(modulus: &str) -> AnemoiResult<Self> {
        Self::new(parse_integer(modulus)?)
    }

    /// The BN254 scalar field.
    ///
    /// q = 21888242871839275222246405745257275088548364400416034343698204186575808495617
    pub fn bn254() -> Self {
        Self::from_known_prime(BigUint::from_bytes_be(&BN254_SCALAR_MODULUS_BE))
    }

    /// The BLS12-381 scalar field.
    ///
    /// q = 52435875175126190479447740508185965837690552500527637822603658699938581184513
    pub fn bls12_381() -> Self {
        Self::from_known_prime(BigUint::from_bytes_be(&BLS12_381_SCALAR_MODULUS_BE))
    }

    fn from_known_prime(modulus: BigUint) -> Self {
        let byte_len = ((modulus.bits() + 7) / 8) as usize;
        Self { modulus, byte_len }
    }

    /// The modulus `q`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Number of bytes needed to hold any element.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// The additive identity.
    pub fn zero(&self) -> Fp {
        Fp(BigUint::zero())
    }

    /// The multiplicative identity.
    pub fn one(&self) -> Fp {
        Fp(BigUint::one())
    }

    /// Embed a u64, reducing modulo `q`.
    pub fn from_u64(&self, val: u64) -> Fp {
        self.reduce(&BigUint::from(val))
    }

    /// Reduce an arbitrary integer into the field.
    pub fn reduce(&self, val: &BigUint) -> Fp {
        Fp(val % &self.modulus)
    }

    /// Returns true if `val` is a canonical representative (`val < q`).
    pub fn contains(&self, val: &BigUint) -> bool {
        val < &self.modulus
    }

    /// Accept a canonical integer as a field element.
    ///
    /// Returns [`AnemoiError::OutOfRangeElement`] if `val >= q`.
    pub fn element(&self, val: BigUint) -> AnemoiResult<Fp> {
        self.named_element("value", val)
    }

    /// Like [`element`](Self::element), naming the value in the error.
    pub fn named_element(&self, name: &str, val: BigUint) -> AnemoiResult<Fp> {
        if !self.contains(&val) {
            return Err(AnemoiError::out_of_range(name, val));
        }
        Ok(Fp(val))
    }

    /// Parse a decimal or `0x`-prefixed hex string and range-check it.
    pub fn parse_element(&self, text: &str) -> AnemoiResult<Fp> {
        self.named_element(text.trim(), parse_integer(text)?)
    }

    /// a + b
    pub fn add(&self, a: &Fp, b: &Fp) -> Fp {
        let sum = &a.0 + &b.0;
        if sum >= self.modulus {
            Fp(sum - &self.modulus)
        } else {
            Fp(sum)
        }
    }

    /// a - b
    pub fn sub(&self, a: &Fp, b: &Fp) -> Fp {
        if a.0 >= b.0 {
            Fp(&a.0 - &b.0)
        } else {
            Fp(&self.modulus - (&b.0 - &a.0))
        }
    }

    /// -a
    pub fn neg(&self, a: &Fp) -> Fp {
        if a.is_zero() {
            self.zero()
        } else {
            Fp(&self.modulus - &a.0)
        }
    }

    /// a * b
    pub fn mul(&self, a: &Fp, b: &Fp) -> Fp {
        Fp((&a.0 * &b.0) % &self.modulus)
    }

    /// a^2
    pub fn square(&self, a: &Fp) -> Fp {
        self.mul(a, a)
    }

    /// base^exp for an arbitrary-precision exponent.
    pub fn pow(&self, base: &Fp, exp: &BigUint) -> Fp {
        Fp(base.0.modpow(exp, &self.modulus))
    }

    /// base^exp for a small exponent.
    pub fn pow_u64(&self, base: &Fp, exp: u64) -> Fp {
        self.pow(base, &BigUint::from(exp))
    }

    /// Multiplicative inverse.
    ///
    /// Returns [`AnemoiError::NotInvertible`] for zero.
    pub fn inv(&self, a: &Fp) -> AnemoiResult<Fp> {
        a.0.modinv(&self.modulus)
            .map(Fp)
            .ok_or_else(|| AnemoiError::NotInvertible(a.to_string()))
    }

    /// Sum of a sequence of elements.
    pub fn sum<'a, I>(&self, elements: I) -> Fp
    where
        I: IntoIterator<Item = &'a Fp>,
    {
        elements
            .into_iter()
            .fold(self.zero(), |acc, e| self.add(&acc, e))
    }

    /// Fixed-width big-endian hex encoding (`2 * byte_len` lowercase chars).
    pub fn to_hex(&self, a: &Fp) -> String {
        let bytes = a.0.to_bytes_be();
        let mut padded = vec![0u8; self.byte_len.saturating_sub(bytes.len())];
        padded.extend_from_slice(&bytes);
        hex::encode(padded)
    }
}

/// Parse a non-negative integer from decimal or `0x`-prefixed hex text.
pub fn parse_integer(text: &str) -> AnemoiResult<BigUint> {
    let trimmed = text.trim();
    let invalid = || AnemoiError::InvalidEncoding(text.to_string());

    if let Some(digits) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        if digits.is_empty() {
            return Err(invalid());
        }
        // hex::decode wants whole bytes
        let even = if digits.len() % 2 == 1 {
            format!("0{}", digits)
        } else {
            digits.to_string()
        };
        let bytes = hex::decode(even).map_err(|_| invalid())?;
        return Ok(BigUint::from_bytes_be(&bytes));
    }

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    BigUint::parse_bytes(trimmed.as_bytes(), 10).ok_or_else(invalid)
}
