//! Maxima of all fixed-width windows of a sequence.
//!
//! The main entry point is [`deque_max`], which keeps a monotone deque of
//! candidate indices and runs in O(n) total. [`brute_force_max`] and
//! [`rescan_max`] are baselines it is tested and benchmarked against, and
//! [`SlidingMaxExt::sliding_max`] does the same over arbitrary iterators.

pub mod deque;
pub mod error;
pub mod monotone_queue;
pub mod window;

pub use deque::{Deque, RingDeque};
pub use error::{DequeError, InvariantError, WindowError};
pub use monotone_queue::{Elem, MonotoneQueue, SlidingMax, SlidingMaxExt};
pub use window::{
    brute_force_max, check_window_invariant, deque_max, deque_max_deferred, deque_max_in,
    deque_max_inspect, rescan_max, sliding_min, validate_window,
};

use rand_chacha::{
    rand_core::{RngCore, SeedableRng},
    ChaChaRng,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Generate `n` random values in `0..max`, reproducible from `seed`.
pub fn generate_random_values(n: usize, max: u64, seed: u64) -> Vec<u64> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let max = max.max(1);
    (0..n).map(|_| rng.next_u64() % max).collect()
}

/// The windowed maximum implementations, selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Monotone deque on a ring buffer.
    Deque,
    /// Monotone deque on `std::collections::VecDeque`.
    VecDeque,
    /// Monotone deque, emitting each window before sliding.
    Deferred,
    /// Brute force that reuses the previous maximum.
    Rescan,
    /// Scan every window.
    BruteForce,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Deque,
        Algorithm::VecDeque,
        Algorithm::Deferred,
        Algorithm::Rescan,
        Algorithm::BruteForce,
    ];

    pub fn run<T: Ord + Clone>(&self, input: &[T], k: usize) -> Result<Vec<T>, WindowError> {
        match self {
            Algorithm::Deque => deque_max(input, k),
            Algorithm::VecDeque => deque_max_in::<T, VecDeque<usize>>(input, k),
            Algorithm::Deferred => deque_max_deferred(input, k),
            Algorithm::Rescan => rescan_max(input, k),
            Algorithm::BruteForce => brute_force_max(input, k),
        }
    }

    /// Whether the running time grows with `k` as well as with the input length.
    pub fn is_quadratic(&self) -> bool {
        matches!(self, Algorithm::Rescan | Algorithm::BruteForce)
    }
}

#[cfg(test)]
#[ctor::ctor]
fn init_color_backtrace() {
    color_backtrace::install();
}
