//! Error handling for the Anemoi permutation and Jive compression.
//!
//! Every failure is a parameter-validation failure detected before the first
//! round runs. Once parameters and state validate, the round function is
//! total: modular arithmetic over a prime field cannot fail.
//!
//! Each variant carries a stable numeric code so that external harnesses
//! (the circuit witness generator, the CLI) can match on codes rather than
//! message text.

use thiserror::Error;

/// All error conditions raised by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum AnemoiError {
    /// The modulus is smaller than 2 or not prime (code 100).
    #[error("invalid modulus {0}: expected a prime greater than 1")]
    InvalidModulus(String),

    /// The branch count is outside the supported set (code 101).
    #[error("unsupported branch count {0}: expected 1, 2, 3 or 4")]
    UnsupportedBranchCount(usize),

    /// The S-box exponent is not one of 3, 5, 7, 11 (code 102).
    #[error("unsupported S-box exponent {0}: expected 3, 5, 7 or 11")]
    UnsupportedExponent(u64),

    /// The S-box exponent shares a factor with `q - 1`, so `x^alpha` is
    /// not a permutation of the field (code 103).
    #[error("S-box exponent {0} is not coprime to q - 1")]
    ExponentNotCoprime(u64),

    /// One half of the state has the wrong number of words (code 104).
    #[error("state half {half} has {got} elements, expected {expected}")]
    LengthMismatch {
        /// Which half of the state (`"X"` or `"Y"`).
        half: &'static str,
        /// Branch count of the instance.
        expected: usize,
        /// Number of elements supplied.
        got: usize,
    },

    /// An element or parameter is not below the modulus (code 105).
    #[error("{name} = {value} is not below the modulus")]
    OutOfRangeElement {
        /// What the value is (`"X[0]"`, `"generator"`, ...).
        name: String,
        /// Decimal rendering of the offending value.
        value: String,
    },

    /// A modular inverse was requested for zero (code 106).
    #[error("{0} has no inverse modulo q")]
    NotInvertible(String),

    /// Text could not be parsed as a decimal or `0x` hex integer (code 107).
    #[error("cannot parse {0:?} as a field element")]
    InvalidEncoding(String),

    /// The round count exceeds the supported maximum (code 108).
    #[error("round count {got} exceeds the maximum of {max}")]
    TooManyRounds {
        /// Rounds requested.
        got: usize,
        /// Largest accepted round count.
        max: usize,
    },
}

impl AnemoiError {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            AnemoiError::InvalidModulus(_) => 100,
            AnemoiError::UnsupportedBranchCount(_) => 101,
            AnemoiError::UnsupportedExponent(_) => 102,
            AnemoiError::ExponentNotCoprime(_) => 103,
            AnemoiError::LengthMismatch { .. } => 104,
            AnemoiError::OutOfRangeElement { .. } => 105,
            AnemoiError::NotInvertible(_) => 106,
            AnemoiError::InvalidEncoding(_) => 107,
            AnemoiError::TooManyRounds { .. } => 108,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            AnemoiError::InvalidModulus(_) => "InvalidModulus",
            AnemoiError::UnsupportedBranchCount(_) => "UnsupportedBranchCount",
            AnemoiError::UnsupportedExponent(_) => "UnsupportedExponent",
            AnemoiError::ExponentNotCoprime(_) => "ExponentNotCoprime",
            AnemoiError::LengthMismatch { .. } => "LengthMismatch",
            AnemoiError::OutOfRangeElement { .. } => "OutOfRangeElement",
            AnemoiError::NotInvertible(_) => "NotInvertible",
            AnemoiError::InvalidEncoding(_) => "InvalidEncoding",
            AnemoiError::TooManyRounds { .. } => "TooManyRounds",
        }
    }

    pub(crate) fn out_of_range(name: impl Into<String>, value: impl ToString) -> Self {
        AnemoiError::OutOfRangeElement {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

/// Result type for Anemoi operations.
pub type AnemoiResult<T> = Result<T, AnemoiError>;
