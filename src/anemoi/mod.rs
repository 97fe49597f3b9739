//! Anemoi permutation and Jive compression.
//!
//! The permutation acts on `2n` field elements split into halves `X` and `Y`
//! for `n` in 1..=4. Each round adds constants, applies the linear layer and
//! PHT, then the flystel S-box; a final linear layer and PHT follow the last
//! round. Jive folds input and output into one element.
//!
//! ```no_run
//! use anemoi_jive::anemoi::{Anemoi, AnemoiParams, State};
//!
//! # fn main() -> anemoi_jive::AnemoiResult<()> {
//! let params = AnemoiParams::bn254(2, 5)?;
//! let anemoi = Anemoi::new(params);
//! let field = anemoi.params().field();
//! let state = State::new(
//!     vec![field.from_u64(1), field.from_u64(2)],
//!     vec![field.from_u64(3), field.from_u64(4)],
//! );
//! let digest = anemoi.compress(&state)?;
//! println!("{}", digest);
//! # Ok(())
//! # }
//! ```

mod cache;
mod constants;
mod jive;
mod matrix;
mod params;
mod permute;
mod round;

pub use cache::{DerivationCache, DerivationKey};
pub use constants::RoundConstants;
pub use jive::{compress, feed_forward};
pub use matrix::DiffusionMatrix;
pub use params::{
    num_rounds, rounds_for, AnemoiParams, Branches, RawParameters, SboxExponent, ThreeBranchMixing,
    BN254_GENERATOR, MAX_ROUNDS,
};
pub use permute::{permute, Anemoi, DerivedParameters};
pub use round::{add_round_constants, apply_round, finalize, linear_layer, pht, sbox_layer, State};
