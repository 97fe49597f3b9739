//! Prime field arithmetic over a runtime modulus.
//!
//! The permutation is defined for any prime `q`, so the modulus is a value
//! rather than a type parameter. [`PrimeField`] validates `q` once and then
//! provides modular add/sub/mul/pow/inverse; [`Fp`] holds canonical elements.

mod fp;
mod primality;

pub use fp::{parse_integer, Fp, PrimeField};

/// BN254 scalar field modulus as decimal string.
pub const BN254_SCALAR_MODULUS_DECIMAL: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// BLS12-381 scalar field modulus as decimal string.
pub const BLS12_381_SCALAR_MODULUS_DECIMAL: &str =
    "52435875175126190479447740508185965837690552500527637822603658699938581184513";

/// BN254 scalar field modulus, big-endian bytes.
pub(crate) const BN254_SCALAR_MODULUS_BE: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// BLS12-381 scalar field modulus, big-endian bytes.
pub(crate) const BLS12_381_SCALAR_MODULUS_BE: [u8; 32] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08, 0x09, 0xa1, 0xd8, 0x05,
    0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];
