//! Anemoi - the Anemoi arithmetization-oriented permutation and its Jive
//! compression mode over a runtime prime field.
//!
//! Outputs match the reference round constants, diffusion matrices and
//! flystel S-box bit-for-bit, so values produced here can be used directly
//! as circuit witnesses.
//!
//! # Architecture
//!
//! - [`field`] - prime field arithmetic over a runtime modulus
//! - [`anemoi`] - parameters, round constants, diffusion matrices, the round
//!   function, the permutation, Jive compression, and the derivation cache
//! - [`error`] - error codes shared by the library and the CLI
//!
//! # Example
//!
//! ```no_run
//! use anemoi_jive::{compress, RawParameters};
//! use num_bigint::BigUint;
//!
//! # fn main() -> anemoi_jive::AnemoiResult<()> {
//! let params = RawParameters::bn254(1, 5)?;
//! let h = compress(&params, &[BigUint::from(1u32)], &[BigUint::from(2u32)])?;
//! println!("{}", h);
//! # Ok(())
//! # }
//! ```

// Library code must avoid unwrap/expect/panic; tests are checked separately.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod anemoi;
pub mod error;
pub mod field;

// Re-export commonly used types
pub use anemoi::{
    compress, num_rounds, permute, Anemoi, AnemoiParams, DerivationCache, DiffusionMatrix,
    RawParameters, RoundConstants, State, ThreeBranchMixing,
};
pub use error::{AnemoiError, AnemoiResult};
pub use field::{Fp, PrimeField};
