//! Anemoi parameter sets.
//!
//! Branch count and S-box exponent are closed enums, so every lookup keyed on
//! them is total. [`AnemoiParams`] is the validated parameter set of one
//! instance; [`RawParameters`] is the untyped form accepted at the public
//! function boundary.

use crate::error::{AnemoiError, AnemoiResult};
use crate::field::{Fp, PrimeField};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

/// Multiplicative generator of the BN254 scalar field used by the reference
/// parameter sets.
pub const BN254_GENERATOR: u64 = 5;

/// Round counts indexed by `[branches - 1][exponent column]` for
/// alpha = 3, 5, 7, 11 (128-bit security).
const ROUND_TABLE: [[usize; 4]; 4] = [
    [21, 21, 20, 19],
    [14, 14, 13, 13],
    [12, 12, 12, 11],
    [12, 12, 11, 11],
];

/// Round count for six branches, independent of alpha.
const SIX_BRANCH_ROUNDS: usize = 10;

/// Largest round count accepted by a parameter set.
pub const MAX_ROUNDS: usize = 256;

fn check_rounds(num_rounds: usize) -> AnemoiResult<()> {
    if num_rounds > MAX_ROUNDS {
        return Err(AnemoiError::TooManyRounds {
            got: num_rounds,
            max: MAX_ROUNDS,
        });
    }
    Ok(())
}

/// Number of words in each half of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branches {
    /// n = 1
    One = 1,
    /// n = 2
    Two = 2,
    /// n = 3
    Three = 3,
    /// n = 4
    Four = 4,
}

impl Branches {
    /// All supported branch counts, ascending.
    pub const ALL: [Branches; 4] = [Branches::One, Branches::Two, Branches::Three, Branches::Four];

    /// The branch count as a number.
    pub fn count(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Branches {
    type Error = AnemoiError;

    fn try_from(n: usize) -> AnemoiResult<Self> {
        match n {
            1 => Ok(Branches::One),
            2 => Ok(Branches::Two),
            3 => Ok(Branches::Three),
            4 => Ok(Branches::Four),
            other => Err(AnemoiError::UnsupportedBranchCount(other)),
        }
    }
}

/// Supported S-box exponents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SboxExponent {
    /// alpha = 3
    Three,
    /// alpha = 5
    Five,
    /// alpha = 7
    Seven,
    /// alpha = 11
    Eleven,
}

impl SboxExponent {
    /// All supported exponents, ascending.
    pub const ALL: [SboxExponent; 4] = [
        SboxExponent::Three,
        SboxExponent::Five,
        SboxExponent::Seven,
        SboxExponent::Eleven,
    ];

    /// The exponent as a number.
    pub fn value(self) -> u64 {
        match self {
            SboxExponent::Three => 3,
            SboxExponent::Five => 5,
            SboxExponent::Seven => 7,
            SboxExponent::Eleven => 11,
        }
    }

    fn column(self) -> usize {
        match self {
            SboxExponent::Three => 0,
            SboxExponent::Five => 1,
            SboxExponent::Seven => 2,
            SboxExponent::Eleven => 3,
        }
    }
}

impl TryFrom<u64> for SboxExponent {
    type Error = AnemoiError;

    fn try_from(alpha: u64) -> AnemoiResult<Self> {
        match alpha {
            3 => Ok(SboxExponent::Three),
            5 => Ok(SboxExponent::Five),
            7 => Ok(SboxExponent::Seven),
            11 => Ok(SboxExponent::Eleven),
            other => Err(AnemoiError::UnsupportedExponent(other)),
        }
    }
}

/// Round count for a typed branch count and exponent.
pub fn rounds_for(branches: Branches, alpha: SboxExponent) -> usize {
    ROUND_TABLE[branches.count() - 1][alpha.column()]
}

/// Look up the number of rounds for `branches` words per half-state and
/// S-box exponent `alpha`.
///
/// Six branches map to 10 rounds for every alpha. Otherwise `branches` must
/// be 1..=4 and `alpha` one of 3, 5, 7, 11.
pub fn num_rounds(branches: usize, alpha: u64) -> AnemoiResult<usize> {
    if branches == 6 {
        return Ok(SIX_BRANCH_ROUNDS);
    }
    let branches = Branches::try_from(branches)?;
    let alpha = SboxExponent::try_from(alpha)?;
    Ok(rounds_for(branches, alpha))
}

/// How the linear layer mixes a three-branch state.
///
/// The published vectors come from a layer that multiplies `X` by the
/// matrix rows for both output halves and drops the rotated `Y`.
/// `Reference` reproduces that and is required for compatibility with
/// existing vectors and circuits; `Corrected` applies the same row-vector
/// product used for two and four branches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThreeBranchMixing {
    /// Both halves become `X[col] * M[col][row]` summed over rows.
    #[default]
    Reference,
    /// `X * M` and `Y' * M`, as for two and four branches.
    Corrected,
}

fn check_coprime(field: &PrimeField, alpha: SboxExponent) -> AnemoiResult<()> {
    let order = field.modulus() - 1u32;
    if !BigUint::from(alpha.value()).gcd(&order).is_one() {
        return Err(AnemoiError::ExponentNotCoprime(alpha.value()));
    }
    Ok(())
}

/// Validated parameters of one Anemoi instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnemoiParams {
    field: PrimeField,
    branches: Branches,
    num_rounds: usize,
    generator: Fp,
    generator_inv: Fp,
    alpha: SboxExponent,
    alpha_inv: Fp,
    beta: Fp,
    gamma: Fp,
    delta: Fp,
    mixing: ThreeBranchMixing,
}

impl AnemoiParams {
    /// Derive a full parameter set from the field, branch count, exponent
    /// and multiplicative generator.
    ///
    /// The round count comes from the round table; `g⁻¹` and `alpha⁻¹` are
    /// inverses modulo `q`; `beta = g`, `gamma = g⁻¹`, `delta = 0`.
    pub fn new(field: PrimeField, branches: usize, alpha: u64, generator: u64) -> AnemoiResult<Self> {
        let branches = Branches::try_from(branches)?;
        let alpha = SboxExponent::try_from(alpha)?;
        check_coprime(&field, alpha)?;

        let generator = field.named_element("generator", BigUint::from(generator))?;
        let generator_inv = field.inv(&generator)?;
        let alpha_inv = field.inv(&field.from_u64(alpha.value()))?;

        Ok(Self {
            num_rounds: rounds_for(branches, alpha),
            beta: generator.clone(),
            gamma: generator_inv.clone(),
            delta: field.zero(),
            mixing: ThreeBranchMixing::default(),
            field,
            branches,
            generator,
            generator_inv,
            alpha,
            alpha_inv,
        })
    }

    /// Parameters over the BN254 scalar field with generator 5.
    pub fn bn254(branches: usize, alpha: u64) -> AnemoiResult<Self> {
        Self::new(PrimeField::bn254(), branches, alpha, BN254_GENERATOR)
    }

    /// Override the number of rounds.
    ///
    /// Returns [`AnemoiError::TooManyRounds`] above [`MAX_ROUNDS`].
    pub fn with_num_rounds(mut self, num_rounds: usize) -> AnemoiResult<Self> {
        check_rounds(num_rounds)?;
        self.num_rounds = num_rounds;
        Ok(self)
    }

    /// Override the S-box layer constants.
    pub fn with_sbox_constants(mut self, beta: Fp, gamma: Fp, delta: Fp) -> AnemoiResult<Self> {
        for (name, value) in [("beta", &beta), ("gamma", &gamma), ("delta", &delta)] {
            if !self.field.contains(value.value()) {
                return Err(AnemoiError::out_of_range(name, value));
            }
        }
        self.beta = beta;
        self.gamma = gamma;
        self.delta = delta;
        Ok(self)
    }

    /// Select the three-branch linear layer.
    pub fn with_three_branch_mixing(mut self, mixing: ThreeBranchMixing) -> Self {
        self.mixing = mixing;
        self
    }

    /// The prime field.
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// Words per half-state.
    pub fn branches(&self) -> Branches {
        self.branches
    }

    /// Number of full rounds before the trailing linear pass.
    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    /// Multiplicative generator `g`.
    pub fn generator(&self) -> &Fp {
        &self.generator
    }

    /// `g⁻¹`
    pub fn generator_inv(&self) -> &Fp {
        &self.generator_inv
    }

    /// S-box exponent.
    pub fn alpha(&self) -> SboxExponent {
        self.alpha
    }

    /// `alpha⁻¹ mod q`, the exponent used when deriving round constants.
    pub fn alpha_inv(&self) -> &Fp {
        &self.alpha_inv
    }

    /// S-box multiplier `beta`.
    pub fn beta(&self) -> &Fp {
        &self.beta
    }

    /// S-box offset `gamma` (first quadratic step).
    pub fn gamma(&self) -> &Fp {
        &self.gamma
    }

    /// S-box offset `delta` (last quadratic step).
    pub fn delta(&self) -> &Fp {
        &self.delta
    }

    /// Three-branch linear layer variant.
    pub fn three_branch_mixing(&self) -> ThreeBranchMixing {
        self.mixing
    }

    /// Export as the untyped parameter record.
    pub fn to_raw(&self) -> RawParameters {
        RawParameters {
            modulus: self.field.modulus().clone(),
            branches: self.branches.count(),
            num_rounds: self.num_rounds,
            generator: self.generator.value().clone(),
            generator_inv: self.generator_inv.value().clone(),
            alpha: self.alpha.value(),
            alpha_inv: self.alpha_inv.value().clone(),
            beta: self.beta.value().clone(),
            gamma: self.gamma.value().clone(),
            delta: self.delta.value().clone(),
        }
    }
}

/// Untyped parameter record of the public `permute`/`compress` contract.
///
/// Nothing is derived from it: the caller supplies the inverses and S-box
/// constants, and conversion into [`AnemoiParams`] only validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameters {
    /// Prime modulus `q`.
    pub modulus: BigUint,
    /// Words per half-state (1..=4).
    pub branches: usize,
    /// Number of rounds.
    pub num_rounds: usize,
    /// Generator `g`.
    pub generator: BigUint,
    /// `g⁻¹`
    pub generator_inv: BigUint,
    /// S-box exponent.
    pub alpha: u64,
    /// `alpha⁻¹`, used only for round-constant derivation.
    pub alpha_inv: BigUint,
    /// S-box multiplier.
    pub beta: BigUint,
    /// S-box offset of the first quadratic step.
    pub gamma: BigUint,
    /// S-box offset of the last quadratic step.
    pub delta: BigUint,
}

impl RawParameters {
    /// Reference parameters over BN254 with generator 5.
    pub fn bn254(branches: usize, alpha: u64) -> AnemoiResult<Self> {
        AnemoiParams::bn254(branches, alpha).map(|p| p.to_raw())
    }
}

impl TryFrom<&RawParameters> for AnemoiParams {
    type Error = AnemoiError;

    fn try_from(raw: &RawParameters) -> AnemoiResult<Self> {
        // table lookups first, before any big-integer work
        let branches = Branches::try_from(raw.branches)?;
        let alpha = SboxExponent::try_from(raw.alpha)?;
        check_rounds(raw.num_rounds)?;

        let field = PrimeField::new(raw.modulus.clone())?;
        check_coprime(&field, alpha)?;

        let element = |name: &str, v: &BigUint| field.named_element(name, v.clone());
        let generator = element("generator", &raw.generator)?;
        let generator_inv = element("generator_inv", &raw.generator_inv)?;
        let alpha_inv = element("alpha_inv", &raw.alpha_inv)?;
        let beta = element("beta", &raw.beta)?;
        let gamma = element("gamma", &raw.gamma)?;
        let delta = element("delta", &raw.delta)?;

        Ok(Self {
            field,
            branches,
            num_rounds: raw.num_rounds,
            generator,
            generator_inv,
            alpha,
            alpha_inv,
            beta,
            gamma,
            delta,
            mixing: ThreeBranchMixing::default(),
        })
    }
}
