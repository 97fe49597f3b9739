//! The Anemoi round function.
//!
//! A round applies, in order:
//! 1. round-constant addition
//! 2. the linear layer (word rotation of `Y`, then the diffusion matrix)
//! 3. the pseudo-Hadamard transform
//! 4. the flystel S-box
//!
//! The permutation finishes with one more linear layer and PHT.

use super::matrix::DiffusionMatrix;
use super::params::{AnemoiParams, Branches, ThreeBranchMixing};
use crate::error::{AnemoiError, AnemoiResult};
use crate::field::{Fp, PrimeField};
use num_bigint::BigUint;

/// The two halves of an Anemoi state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    x: Vec<Fp>,
    y: Vec<Fp>,
}

impl State {
    /// Build a state from field elements.
    pub fn new(x: Vec<Fp>, y: Vec<Fp>) -> Self {
        Self { x, y }
    }

    /// Build a state from integers, rejecting values `>= q`.
    pub fn from_integers(field: &PrimeField, x: &[BigUint], y: &[BigUint]) -> AnemoiResult<Self> {
        let half = |label: &str, values: &[BigUint]| -> AnemoiResult<Vec<Fp>> {
            values
                .iter()
                .enumerate()
                .map(|(i, v)| field.named_element(&format!("{}[{}]", label, i), v.clone()))
                .collect()
        };
        Ok(Self::new(half("X", x)?, half("Y", y)?))
    }

    /// The `X` half.
    pub fn x(&self) -> &[Fp] {
        &self.x
    }

    /// The `Y` half.
    pub fn y(&self) -> &[Fp] {
        &self.y
    }

    /// Split into `(X, Y)`.
    pub fn into_parts(self) -> (Vec<Fp>, Vec<Fp>) {
        (self.x, self.y)
    }

    /// Check lengths against the branch count and elements against `q`.
    pub(crate) fn validate(&self, field: &PrimeField, branches: Branches) -> AnemoiResult<()> {
        for (half, values) in [("X", &self.x), ("Y", &self.y)] {
            if values.len() != branches.count() {
                return Err(AnemoiError::LengthMismatch {
                    half,
                    expected: branches.count(),
                    got: values.len(),
                });
            }
            if let Some((i, v)) = values
                .iter()
                .enumerate()
                .find(|(_, v)| !field.contains(v.value()))
            {
                return Err(AnemoiError::out_of_range(format!("{}[{}]", half, i), v));
            }
        }
        Ok(())
    }
}

/// `X[i] += C[i]`, `Y[i] += D[i]`.
pub fn add_round_constants(field: &PrimeField, state: &mut State, c: &[Fp], d: &[Fp]) {
    for (x, c) in state.x.iter_mut().zip(c) {
        *x = field.add(x, c);
    }
    for (y, d) in state.y.iter_mut().zip(d) {
        *y = field.add(y, d);
    }
}

/// Word rotation followed by the diffusion matrix.
pub fn linear_layer(
    field: &PrimeField,
    state: &mut State,
    matrix: &DiffusionMatrix,
    branches: Branches,
    mixing: ThreeBranchMixing,
) {
    // Y'[i] = Y[(i + 1) mod n]
    state.y.rotate_left(1);

    match (branches, mixing) {
        (Branches::One, _) => {}
        (Branches::Three, ThreeBranchMixing::Reference) => {
            let rows = matrix.rows();
            let mixed: Vec<Fp> = state
                .x
                .iter()
                .zip(rows)
                .map(|(x, row)| {
                    row.iter()
                        .fold(field.zero(), |acc, m| field.add(&acc, &field.mul(x, m)))
                })
                .collect();
            state.y = mixed.clone();
            state.x = mixed;
        }
        _ => {
            state.x = matrix.mul_row_vector(field, &state.x);
            state.y = matrix.mul_row_vector(field, &state.y);
        }
    }
}

/// Pseudo-Hadamard transform: `Y[i] += X[i]`, then `X[i] += Y[i]`.
pub fn pht(field: &PrimeField, state: &mut State) {
    for (x, y) in state.x.iter_mut().zip(state.y.iter_mut()) {
        *y = field.add(x, y);
        *x = field.add(x, y);
    }
}

/// Flystel S-box applied to each word.
///
/// ```text
/// x -= beta * y^2 + gamma
/// y -= x^alpha
/// x += beta * y^2 + delta
/// ```
pub fn sbox_layer(field: &PrimeField, state: &mut State, params: &AnemoiParams) {
    let alpha = params.alpha().value();
    for (x, y) in state.x.iter_mut().zip(state.y.iter_mut()) {
        let q_gamma = field.add(&field.mul(params.beta(), &field.square(y)), params.gamma());
        *x = field.sub(x, &q_gamma);
        *y = field.sub(y, &field.pow_u64(x, alpha));
        let q_delta = field.add(&field.mul(params.beta(), &field.square(y)), params.delta());
        *x = field.add(x, &q_delta);
    }
}

/// One full round with constants `c`, `d`.
pub fn apply_round(
    state: &mut State,
    params: &AnemoiParams,
    matrix: &DiffusionMatrix,
    c: &[Fp],
    d: &[Fp],
) {
    let field = params.field();
    add_round_constants(field, state, c, d);
    linear_layer(field, state, matrix, params.branches(), params.three_branch_mixing());
    pht(field, state);
    sbox_layer(field, state, params);
}

/// Trailing linear layer and PHT, without S-box.
pub fn finalize(state: &mut State, params: &AnemoiParams, matrix: &DiffusionMatrix) {
    let field = params.field();
    linear_layer(field, state, matrix, params.branches(), params.three_branch_mixing());
    pht(field, state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_state(field: &PrimeField, x: &[u64], y: &[u64]) -> State {
        State::new(
            x.iter().map(|&v| field.from_u64(v)).collect(),
            y.iter().map(|&v| field.from_u64(v)).collect(),
        )
    }

    #[test]
    fn test_pht_is_sequential() {
        let field = PrimeField::bn254();
        let mut st = small_state(&field, &[2], &[3]);
        pht(&field, &mut st);
        // y = 2 + 3 = 5, then x = 2 + 5 = 7
        assert_eq!(st, small_state(&field, &[7], &[5]));
    }

    #[test]
    fn test_rotation_only_for_one_branch() {
        let field = PrimeField::bn254();
        let g = field.from_u64(5);
        let m = DiffusionMatrix::generate(&field, Branches::One, &g);
        let mut st = small_state(&field, &[2], &[3]);
        linear_layer(&field, &mut st, &m, Branches::One, ThreeBranchMixing::Reference);
        assert_eq!(st, small_state(&field, &[2], &[3]));
    }

    #[test]
    fn test_two_branch_linear_layer() {
        let field = PrimeField::bn254();
        let g = field.from_u64(5);
        let m = DiffusionMatrix::generate(&field, Branches::Two, &g);
        let mut st = small_state(&field, &[2, 3], &[1, 4]);
        linear_layer(&field, &mut st, &m, Branches::Two, ThreeBranchMixing::Reference);
        // X * M = [2 + 15, 10 + 78]; Y' = [4, 1], Y' * M = [4 + 5, 20 + 26]
        assert_eq!(st, small_state(&field, &[17, 88], &[9, 46]));
    }

    #[test]
    fn test_three_branch_reference_mixing() {
        let field = PrimeField::bn254();
        let g = field.from_u64(5);
        let m = DiffusionMatrix::generate(&field, Branches::Three, &g);
        let mut st = small_state(&field, &[1, 2, 3], &[4, 5, 6]);
        linear_layer(&field, &mut st, &m, Branches::Three, ThreeBranchMixing::Reference);
        // row sums: 13, 7, 7
        assert_eq!(st, small_state(&field, &[13, 14, 21], &[13, 14, 21]));
    }

    #[test]
    fn test_three_branch_corrected_mixing() {
        let field = PrimeField::bn254();
        let g = field.from_u64(5);
        let m = DiffusionMatrix::generate(&field, Branches::Three, &g);
        let mut st = small_state(&field, &[1, 2, 3], &[4, 5, 6]);
        linear_layer(&field, &mut st, &m, Branches::Three, ThreeBranchMixing::Corrected);
        // X * M = [6 + 2 + 15, 1 + 2 + 3, 6 + 10 + 3]
        // Y' = [5, 6, 4], Y' * M = [30 + 6 + 20, 5 + 6 + 4, 30 + 30 + 4]
        assert_eq!(st, small_state(&field, &[23, 6, 19], &[56, 15, 64]));
    }

    #[test]
    fn test_sbox_zero_state() {
        let params = AnemoiParams::bn254(1, 5).unwrap();
        let field = params.field();
        let mut st = small_state(field, &[0], &[0]);
        sbox_layer(field, &mut st, &params);
        // x = -gamma, y = gamma^5, x = -gamma + beta * gamma^10 + delta
        let x0 = field.neg(params.gamma());
        let y1 = field.neg(&field.pow_u64(&x0, 5));
        let x1 = field.add(
            &field.add(&x0, &field.mul(params.beta(), &field.square(&y1))),
            params.delta(),
        );
        assert_eq!(st, State::new(vec![x1], vec![y1]));
    }

    #[test]
    fn test_validate() {
        let field = PrimeField::bn254();
        let st = small_state(&field, &[1, 2], &[3]);
        assert_eq!(
            st.validate(&field, Branches::Two),
            Err(AnemoiError::LengthMismatch {
                half: "Y",
                expected: 2,
                got: 1
            })
        );
        let st = small_state(&field, &[1, 2], &[3, 4]);
        assert!(st.validate(&field, Branches::Two).is_ok());
    }

    #[test]
    fn test_from_integers_names_offending_word() {
        let field = PrimeField::bn254();
        let too_big = field.modulus().clone();
        let err = State::from_integers(&field, &[BigUint::from(1u32)], &[too_big]).unwrap_err();
        match err {
            AnemoiError::OutOfRangeElement { name, .. } => assert_eq!(name, "Y[0]"),
            other => panic!("Expected OutOfRangeElement, got {:?}", other),
        }
    }
}
