//! Anemoi permutation driver.
//!
//! Round constants and the diffusion matrix are derived once per [`Anemoi`]
//! instance (or fetched from a [`DerivationCache`]) and reused by every call.

use super::cache::DerivationCache;
use super::constants::RoundConstants;
use super::matrix::DiffusionMatrix;
use super::params::{AnemoiParams, RawParameters};
use super::round::{apply_round, finalize, State};
use crate::error::AnemoiResult;
use num_bigint::BigUint;
use std::sync::Arc;
use tracing::{debug, trace};

/// Tables derived from a parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedParameters {
    /// `C` and `D` tables.
    pub constants: RoundConstants,
    /// Linear-layer matrix.
    pub matrix: DiffusionMatrix,
}

impl DerivedParameters {
    /// Derive round constants and the diffusion matrix.
    pub fn derive(params: &AnemoiParams) -> Self {
        debug!(
            branches = params.branches().count(),
            rounds = params.num_rounds(),
            alpha = params.alpha().value(),
            "deriving anemoi round constants"
        );
        Self {
            constants: RoundConstants::for_params(params),
            matrix: DiffusionMatrix::generate(params.field(), params.branches(), params.generator()),
        }
    }
}

/// A prepared Anemoi permutation.
#[derive(Debug, Clone)]
pub struct Anemoi {
    params: AnemoiParams,
    derived: Arc<DerivedParameters>,
}

impl Anemoi {
    /// Prepare an instance, deriving its tables.
    pub fn new(params: AnemoiParams) -> Self {
        let derived = Arc::new(DerivedParameters::derive(&params));
        Self { params, derived }
    }

    /// Prepare an instance, taking its tables from `cache`.
    pub fn with_cache(params: AnemoiParams, cache: &DerivationCache) -> Self {
        let derived = cache.get_or_derive(&params);
        Self { params, derived }
    }

    /// The parameter set.
    pub fn params(&self) -> &AnemoiParams {
        &self.params
    }

    /// Round constants in use.
    pub fn round_constants(&self) -> &RoundConstants {
        &self.derived.constants
    }

    /// Diffusion matrix in use.
    pub fn matrix(&self) -> &DiffusionMatrix {
        &self.derived.matrix
    }

    /// Apply the permutation.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](crate::AnemoiError::LengthMismatch) if either half
    /// does not hold `n` words, [`OutOfRangeElement`](crate::AnemoiError::OutOfRangeElement)
    /// if a word is not reduced.
    pub fn permute(&self, state: &State) -> AnemoiResult<State> {
        state.validate(self.params.field(), self.params.branches())?;
        let mut st = state.clone();
        for (c, d) in self.round_constants().c().iter().zip(self.round_constants().d()) {
            apply_round(&mut st, &self.params, self.matrix(), c, d);
        }
        finalize(&mut st, &self.params, self.matrix());
        Ok(st)
    }

    /// Permutation with trace output for debugging.
    ///
    /// Returns `(final_state, traces)` where `traces` holds the state after
    /// every round followed by the state after the trailing linear layer
    /// and PHT, `num_rounds + 1` entries in all.
    pub fn permute_with_trace(&self, state: &State) -> AnemoiResult<(State, Vec<State>)> {
        state.validate(self.params.field(), self.params.branches())?;
        let mut st = state.clone();
        let mut traces = Vec::with_capacity(self.params.num_rounds() + 1);

        for (round, (c, d)) in self
            .round_constants()
            .c()
            .iter()
            .zip(self.round_constants().d())
            .enumerate()
        {
            apply_round(&mut st, &self.params, self.matrix(), c, d);
            trace!(round, x = ?st.x(), y = ?st.y(), "anemoi round");
            traces.push(st.clone());
        }

        finalize(&mut st, &self.params, self.matrix());
        trace!(x = ?st.x(), y = ?st.y(), "anemoi final linear layer");
        traces.push(st.clone());

        Ok((st, traces))
    }
}

/// Apply the permutation to `(x, y)` under `params`.
///
/// Validates the parameters and inputs, derives the tables, and returns
/// `(X', Y')` as canonical integers.
pub fn permute(
    params: &RawParameters,
    x: &[BigUint],
    y: &[BigUint],
) -> AnemoiResult<(Vec<BigUint>, Vec<BigUint>)> {
    let params = AnemoiParams::try_from(params)?;
    let state = State::from_integers(params.field(), x, y)?;
    let (x, y) = Anemoi::new(params).permute(&state)?.into_parts();
    Ok((
        x.into_iter().map(BigUint::from).collect(),
        y.into_iter().map(BigUint::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnemoiError;

    fn big(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 10).unwrap()
    }

    #[test]
    fn test_single_branch_output() {
        let raw = RawParameters::bn254(1, 5).unwrap();
        let x = [big("21284495204729344431162124129465134439933874215855908349147367482226264795899")];
        let y = [big("2320104909775456241592764390901219230983708351369023735970742517587841188432")];
        let (px, py) = permute(&raw, &x, &y).unwrap();
        assert_eq!(
            px,
            vec![big("10984596737689351770456233900212612773210714251502146601827225716210063529988")]
        );
        assert_eq!(
            py,
            vec![big("12540996370652627701187783004510677855706886073017455235708830746314252631287")]
        );
    }

    #[test]
    fn test_permute_deterministic() {
        let anemoi = Anemoi::new(AnemoiParams::bn254(2, 5).unwrap());
        let field = anemoi.params().field();
        let state = State::new(
            vec![field.one(), field.from_u64(2)],
            vec![field.zero(), field.from_u64(3)],
        );
        assert_eq!(anemoi.permute(&state).unwrap(), anemoi.permute(&state).unwrap());
    }

    #[test]
    fn test_trace_length_and_tail() {
        let anemoi = Anemoi::new(AnemoiParams::bn254(3, 5).unwrap());
        let field = anemoi.params().field();
        let state = State::new(vec![field.one(); 3], vec![field.zero(); 3]);
        let (out, traces) = anemoi.permute_with_trace(&state).unwrap();
        assert_eq!(traces.len(), 13);
        assert_eq!(traces.last(), Some(&out));
        assert_eq!(anemoi.permute(&state).unwrap(), out);
    }

    #[test]
    fn test_zero_rounds_is_linear_pass() {
        let params = AnemoiParams::bn254(1, 5)
            .unwrap()
            .with_num_rounds(0)
            .unwrap();
        let anemoi = Anemoi::new(params);
        let field = anemoi.params().field();
        let state = State::new(vec![field.from_u64(2)], vec![field.from_u64(3)]);
        // only PHT: y = 5, x = 7
        let out = anemoi.permute(&state).unwrap();
        assert_eq!(out, State::new(vec![field.from_u64(7)], vec![field.from_u64(5)]));
    }

    #[test]
    fn test_length_mismatch() {
        let raw = RawParameters::bn254(2, 5).unwrap();
        let one = BigUint::from(1u32);
        let err = permute(&raw, &[one.clone(), one.clone()], &[one]).unwrap_err();
        assert_eq!(
            err,
            AnemoiError::LengthMismatch {
                half: "Y",
                expected: 2,
                got: 1
            }
        );
    }
}
