//! Universal string hashing.
//!
//! A key is first reduced to a 64-bit digest (`digest * 33 + byte`, seeded
//! with 5381, wrapping), then mapped into `[0, m)` with
//! `((a * digest + b) mod p) mod m` where `p = 2^61 - 1`.
//!
//! `a` and `b` are drawn once per process. [`init`] installs them in a
//! process-wide cell; tables built with [`ChainTable::new`] read that cell,
//! while [`ChainTable::with_params`] takes an explicit value.
//!
//! [`ChainTable::new`]: crate::ChainTable::new
//! [`ChainTable::with_params`]: crate::ChainTable::with_params

use crate::error::{Result, TableError};
use once_cell::sync::OnceCell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Mersenne prime `2^61 - 1`.
pub const MODULUS: i64 = (1 << 61) - 1;

/// Starting value of the string digest.
pub const DIGEST_SEED: i64 = 5381;

const DIGEST_MULTIPLIER: i64 = 33;

static GLOBAL: OnceCell<HashParams> = OnceCell::new();

/// Coefficients of one member of the universal family.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HashParams {
    a: i64,
    b: i64,
    p: i64,
}

impl HashParams {
    /// Draws `a` from `[1, p)` and `b` from `[0, p)` using the OS-seeded
    /// thread RNG.
    pub fn random() -> Self {
        Self::draw(&mut rand::rng())
    }

    /// Reproducible coefficients; the same seed always yields the same family
    /// member.
    pub fn from_seed(seed: u64) -> Self {
        Self::draw(&mut StdRng::seed_from_u64(seed))
    }

    /// Explicit coefficients, validated against the modulus.
    pub fn new(a: i64, b: i64) -> Result<Self> {
        if !(1..MODULUS).contains(&a) {
            return Err(TableError::InvalidCoefficient {
                name: "a",
                value: a,
                min: 1,
                modulus: MODULUS,
            });
        }
        if !(0..MODULUS).contains(&b) {
            return Err(TableError::InvalidCoefficient {
                name: "b",
                value: b,
                min: 0,
                modulus: MODULUS,
            });
        }
        Ok(Self { a, b, p: MODULUS })
    }

    /// Degenerate member sending every key to bucket 0.
    #[cfg(test)]
    pub(crate) fn colliding() -> Self {
        Self { a: 0, b: 0, p: MODULUS }
    }

    fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            a: rng.random_range(1..MODULUS),
            b: rng.random_range(0..MODULUS),
            p: MODULUS,
        }
    }

    pub fn a(&self) -> i64 {
        self.a
    }

    pub fn b(&self) -> i64 {
        self.b
    }

    pub fn modulus(&self) -> i64 {
        self.p
    }

    /// Bucket index of `key` in a table of `m` buckets; always in `[0, m)`.
    ///
    /// `m` must be non-zero. Tables never call this while unallocated.
    #[inline]
    pub fn bucket(&self, key: &str, m: usize) -> usize {
        debug_assert!(m > 0, "hashing into an unallocated table");
        // a < 2^61 and |digest| <= 2^63, so the product fits in i128 exactly.
        let x = i128::from(self.a) * i128::from(digest(key)) + i128::from(self.b);
        let reduced = x.rem_euclid(i128::from(self.p));
        // Result is below m, so the narrowing cast is lossless.
        reduced.rem_euclid(m as i128) as usize
    }
}

/// Multiplicative string digest over every byte of `key`.
#[inline]
pub fn digest(key: &str) -> i64 {
    key.bytes().fold(DIGEST_SEED, |d, byte| {
        d.wrapping_mul(DIGEST_MULTIPLIER).wrapping_add(i64::from(byte))
    })
}

/// Installs random process-wide parameters on first call; later calls return
/// the installed value unchanged.
pub fn init() -> &'static HashParams {
    GLOBAL.get_or_init(|| {
        let params = HashParams::random();
        tracing::debug!(a = params.a, b = params.b, "installed process-wide hash parameters");
        params
    })
}

/// Installs `params` as the process-wide parameters. If parameters were
/// already installed they are kept and returned.
pub fn init_with(params: HashParams) -> &'static HashParams {
    let mut installed = false;
    let current = GLOBAL.get_or_init(|| {
        installed = true;
        params
    });
    if installed {
        tracing::debug!(a = params.a, b = params.b, "installed process-wide hash parameters");
    } else if *current != params {
        tracing::warn!("hash parameters already initialized, ignoring new parameters");
    }
    current
}

/// The process-wide parameters, if [`init`] or [`init_with`] has run.
pub fn global() -> Option<&'static HashParams> {
    GLOBAL.get()
}
