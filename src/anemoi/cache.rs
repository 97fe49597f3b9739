//! Memoization of derived round constants and matrices.
//!
//! Keyed by every input of the derivation, so two parameter sets share an
//! entry only when their tables are identical.

use super::params::AnemoiParams;
use super::permute::DerivedParameters;
use num_bigint::BigUint;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::debug;

/// Inputs that determine [`DerivedParameters`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationKey {
    modulus: BigUint,
    branches: usize,
    num_rounds: usize,
    generator: BigUint,
    generator_inv: BigUint,
    alpha_inv: BigUint,
}

impl DerivationKey {
    /// Key for a parameter set.
    pub fn for_params(params: &AnemoiParams) -> Self {
        Self {
            modulus: params.field().modulus().clone(),
            branches: params.branches().count(),
            num_rounds: params.num_rounds(),
            generator: params.generator().value().clone(),
            generator_inv: params.generator_inv().value().clone(),
            alpha_inv: params.alpha_inv().value().clone(),
        }
    }
}

/// Thread-safe derivation cache.
#[derive(Debug, Default)]
pub struct DerivationCache {
    entries: Mutex<HashMap<DerivationKey, Arc<DerivedParameters>>>,
}

impl DerivationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache instance.
    pub fn global() -> &'static DerivationCache {
        static GLOBAL: OnceLock<DerivationCache> = OnceLock::new();
        GLOBAL.get_or_init(DerivationCache::new)
    }

    /// Return the cached tables for `params`, deriving them on a miss.
    pub fn get_or_derive(&self, params: &AnemoiParams) -> Arc<DerivedParameters> {
        let key = DerivationKey::for_params(params);
        if let Some(hit) = self.lock().get(&key) {
            debug!(branches = key.branches, rounds = key.num_rounds, "derivation cache hit");
            return Arc::clone(hit);
        }

        debug!(branches = key.branches, rounds = key.num_rounds, "derivation cache miss");
        // Derive without holding the lock; a concurrent miss may derive twice
        // but the first insert wins.
        let derived = Arc::new(DerivedParameters::derive(params));
        Arc::clone(self.lock().entry(key).or_insert(derived))
    }

    /// Number of cached parameter sets.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<DerivationKey, Arc<DerivedParameters>>> {
        // entries are only ever inserted whole
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
