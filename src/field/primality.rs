//! Modulus primality check.
//!
//! Trial division by the first twelve primes followed by a Miller–Rabin round
//! for each of them as a witness. Deterministic for every modulus below
//! 3.3 * 10^24 and a strong probable-prime test above that.

use num_bigint::BigUint;
use num_traits::{One, Zero};

const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Returns true if `n` is (probably, for very large `n`) prime.
pub(crate) fn is_prime(n: &BigUint) -> bool {
    if n < &BigUint::from(2u32) {
        return false;
    }

    for &p in WITNESSES.iter() {
        let p = BigUint::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // n - 1 = d * 2^s with d odd
    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for &a in WITNESSES.iter() {
        let mut x = BigUint::from(a).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}
