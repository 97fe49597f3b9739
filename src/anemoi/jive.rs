//! Jive compression mode.
//!
//! `2n` words in, one word out: the input and the permutation output are
//! summed word by word.

use super::params::{AnemoiParams, RawParameters};
use super::permute::Anemoi;
use super::round::State;
use crate::error::AnemoiResult;
use crate::field::{Fp, PrimeField};
use num_bigint::BigUint;

/// `Σ_i X[i] + X'[i] + Y[i] + Y'[i] mod q`.
pub fn feed_forward(field: &PrimeField, input: &State, output: &State) -> Fp {
    field.sum(
        input
            .x()
            .iter()
            .chain(output.x())
            .chain(input.y())
            .chain(output.y()),
    )
}

impl Anemoi {
    /// Compress a full state into one field element.
    pub fn compress(&self, state: &State) -> AnemoiResult<Fp> {
        let out = self.permute(state)?;
        Ok(feed_forward(self.params().field(), state, &out))
    }
}

/// Jive compression of `(x, y)` under `params`.
pub fn compress(params: &RawParameters, x: &[BigUint], y: &[BigUint]) -> AnemoiResult<BigUint> {
    let params = AnemoiParams::try_from(params)?;
    let state = State::from_integers(params.field(), x, y)?;
    Ok(Anemoi::new(params).compress(&state)?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_forward_sums_all_words() {
        let field = PrimeField::new(BigUint::from(101u32)).unwrap();
        let s = |v: &[u64]| v.iter().map(|&x| field.from_u64(x)).collect::<Vec<_>>();
        let input = State::new(s(&[1, 2]), s(&[3, 4]));
        let output = State::new(s(&[50, 60]), s(&[70, 80]));
        // 270 mod 101
        assert_eq!(feed_forward(&field, &input, &output), field.from_u64(68));
    }

    #[test]
    fn test_zero_state_single_branch() {
        let raw = RawParameters::bn254(1, 5).unwrap();
        let zero = BigUint::from(0u32);
        let h = compress(&raw, &[zero.clone()], &[zero]).unwrap();
        assert_eq!(
            h.to_string(),
            "14973734357529750375854951053009838018501768597941102528612869540006082040594"
        );
    }

    #[test]
    fn test_instance_matches_free_function() {
        let params = AnemoiParams::bn254(4, 5).unwrap();
        let raw = params.to_raw();
        let field = params.field().clone();
        let x: Vec<BigUint> = [11u32, 22, 33, 44].iter().map(|&v| BigUint::from(v)).collect();
        let y: Vec<BigUint> = [55u32, 66, 77, 88].iter().map(|&v| BigUint::from(v)).collect();
        let state = State::from_integers(&field, &x, &y).unwrap();
        let via_instance = Anemoi::new(params).compress(&state).unwrap();
        assert_eq!(via_instance.into_inner(), compress(&raw, &x, &y).unwrap());
    }
}
