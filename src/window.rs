//! Maxima (and minima) of all windows of width `k` over a slice.
//!
//! [`deque_max`] is the linear-time algorithm. [`brute_force_max`] and
//! [`rescan_max`] are simple baselines that must always agree with it.

use std::cmp::{max, Reverse};

use itertools::Itertools;

use crate::deque::{Deque, RingDeque};
use crate::error::{DequeError, InvariantError, WindowError};

/// Check that `k` windows fit in an input of length `len`.
pub fn validate_window(len: usize, k: usize) -> Result<(), WindowError> {
    if len == 0 {
        return Err(WindowError::EmptyInput);
    }
    if k == 0 {
        return Err(WindowError::ZeroWidth);
    }
    if k > len {
        return Err(WindowError::InvalidWidth { k, len });
    }
    Ok(())
}

/// Compare every window element against the first. O(n*k).
pub fn brute_force_max<T: Ord + Clone>(input: &[T], k: usize) -> Result<Vec<T>, WindowError> {
    validate_window(input.len(), k)?;
    Ok(input
        .windows(k)
        .map(|window| window[1..].iter().fold(&window[0], max).clone())
        .collect())
}

/// Brute force that remembers where the last maximum was.
///
/// While the previous maximum is still inside the window, only the elements
/// that entered since the last scan are compared against it. When it falls
/// out, the whole window is rescanned. Equal values prefer the later
/// position. Worst case (decreasing input) is still O(n*k).
pub fn rescan_max<T: Ord + Clone>(input: &[T], k: usize) -> Result<Vec<T>, WindowError> {
    validate_window(input.len(), k)?;
    let mut output = Vec::with_capacity(input.len() - k + 1);
    // Position of the maximum of the last window.
    let mut max_pos = 0;
    // Everything up to and including `scanned` has been compared against `max_pos`.
    let mut scanned = 0;
    for start in 0..=input.len() - k {
        let end = start + k;
        if max_pos < start {
            // `position_max` returns the last of equal maxima.
            max_pos = start + input[start..end].iter().position_max().unwrap_or(0);
        } else {
            for pos in scanned + 1..end {
                if input[pos] >= input[max_pos] {
                    max_pos = pos;
                }
            }
        }
        scanned = end - 1;
        output.push(input[max_pos].clone());
    }
    Ok(output)
}

/// The maximum of every window of width `k`, in O(n) total.
///
/// A deque holds the indices of the elements that can still become a window
/// maximum. Their values are strictly decreasing from front to back, so the
/// front is the maximum of the current window.
///
/// ```
/// let maxima = slidemax::deque_max(&[3, 1, 6, 4, 2, 10, 5, 9], 3).unwrap();
/// assert_eq!(maxima, [6, 6, 10, 10, 10, 10]);
/// ```
pub fn deque_max<T: Ord + Clone>(input: &[T], k: usize) -> Result<Vec<T>, WindowError> {
    deque_max_with(input, k, RingDeque::with_capacity(k), |_, _| {})
}

/// [`deque_max`], using a deque of type `D` for the candidate indices.
pub fn deque_max_in<T: Ord + Clone, D: Deque<usize> + Default>(
    input: &[T],
    k: usize,
) -> Result<Vec<T>, WindowError> {
    deque_max_with(input, k, D::default(), |_, _| {})
}

/// [`deque_max`], calling `inspect(i, &deque)` right after index `i` was admitted.
pub fn deque_max_inspect<T: Ord + Clone>(
    input: &[T],
    k: usize,
    inspect: impl FnMut(usize, &RingDeque<usize>),
) -> Result<Vec<T>, WindowError> {
    deque_max_with(input, k, RingDeque::with_capacity(k), inspect)
}

fn deque_max_with<T: Ord + Clone, D: Deque<usize>>(
    input: &[T],
    k: usize,
    mut deque: D,
    mut inspect: impl FnMut(usize, &D),
) -> Result<Vec<T>, WindowError> {
    validate_window(input.len(), k)?;
    let mut output = Vec::with_capacity(input.len() - k + 1);
    for i in 0..input.len() {
        // The window is now [i+1-k, i]. At most one index, i-k, just left it,
        // and it can only be at the front.
        if i >= k && *deque.first()? == i - k {
            deque.remove_first()?;
        }
        admit(input, &mut deque, i)?;
        inspect(i, &deque);
        if i + 1 >= k {
            output.push(input[*deque.first()?].clone());
        }
    }
    Ok(output)
}

/// Drop candidates from the back that are not larger than `input[i]`, then push `i`.
/// On ties the newer index wins: the older one leaves the window first anyway.
#[inline(always)]
fn admit<T: Ord, D: Deque<usize>>(input: &[T], deque: &mut D, i: usize) -> Result<(), DequeError> {
    while let Ok(&back) = deque.last() {
        if input[back] <= input[i] {
            deque.remove_last()?;
        } else {
            break;
        }
    }
    deque.insert_back(i);
    Ok(())
}

/// Same result as [`deque_max`], structured differently: the first window is
/// filled up front, and each later step emits the previous window's maximum
/// before sliding. The last window is emitted after the loop.
pub fn deque_max_deferred<T: Ord + Clone>(input: &[T], k: usize) -> Result<Vec<T>, WindowError> {
    validate_window(input.len(), k)?;
    let mut deque = RingDeque::with_capacity(k);
    let mut output = Vec::with_capacity(input.len() - k + 1);
    for i in 0..k {
        admit(input, &mut deque, i)?;
    }
    for i in k..input.len() {
        output.push(input[*deque.first()?].clone());
        while let Ok(&front) = deque.first() {
            if front > i - k {
                break;
            }
            deque.remove_first()?;
        }
        admit(input, &mut deque, i)?;
    }
    output.push(input[*deque.first()?].clone());
    Ok(output)
}

/// The minimum of every window of width `k`.
pub fn sliding_min<T: Ord + Clone>(input: &[T], k: usize) -> Result<Vec<T>, WindowError> {
    let reversed = input.iter().map(Reverse).collect_vec();
    Ok(deque_max(&reversed, k)?
        .into_iter()
        .map(|Reverse(x)| x.clone())
        .collect())
}

/// Check the candidate deque of [`deque_max`] after index `i` was admitted:
/// it is non-empty, its indices increase and lie in the window `[i+1-k, i]`,
/// and the values they point to strictly decrease.
pub fn check_window_invariant<T: Ord>(
    input: &[T],
    k: usize,
    i: usize,
    deque: &RingDeque<usize>,
) -> Result<(), InvariantError> {
    let lo = (i + 1).saturating_sub(k);
    if deque.iter().next().is_none() {
        return Err(InvariantError::new(format!("deque empty after admitting {i}")));
    }
    if let Some(&j) = deque.iter().find(|&&j| j < lo || j > i) {
        return Err(InvariantError::new(format!(
            "index {j} outside window [{lo}, {i}]"
        )));
    }
    for (&a, &b) in deque.iter().tuple_windows() {
        if a >= b {
            return Err(InvariantError::new(format!(
                "indices {a} and {b} are not increasing"
            )));
        }
        if input[a] <= input[b] {
            return Err(InvariantError::new(format!(
                "values at indices {a} and {b} are not strictly decreasing"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::random;
    use std::collections::VecDeque;

    type Alg = fn(&[i64], usize) -> Result<Vec<i64>, WindowError>;

    const ALGS: [(&str, Alg); 5] = [
        ("brute_force", brute_force_max),
        ("rescan", rescan_max),
        ("deque", deque_max),
        ("vecdeque", deque_max_in::<i64, VecDeque<usize>>),
        ("deferred", deque_max_deferred),
    ];

    fn random_input(len: usize, sigma: u64) -> Vec<i64> {
        (0..len).map(|_| (random::<u64>() % sigma) as i64).collect()
    }

    #[test]
    fn scenarios() {
        let cases: [(&[i64], usize, &[i64]); 5] = [
            (&[9, 1, 1, 0, 0, 0, 1, 0, 6, 8], 3, &[9, 1, 1, 0, 1, 1, 6, 8]),
            (&[3, 1, 6, 4, 2, 10, 5, 9], 3, &[6, 6, 10, 10, 10, 10]),
            (&[1, 3, 5, 7, 9], 2, &[3, 5, 7, 9]),
            (&[9, 7, 5, 3, 1], 2, &[9, 7, 5, 3]),
            (
                &[3, 1, 6, 4, 2, 10, 5, 9, 8, 5, 7, 9, 2, 1, 3, 6],
                5,
                &[6, 10, 10, 10, 10, 10, 9, 9, 9, 9, 9, 9],
            ),
        ];
        for (input, k, expected) in cases {
            for (name, alg) in ALGS {
                assert_eq!(alg(input, k).unwrap(), expected, "alg={name} k={k}");
            }
        }
    }

    #[test]
    fn boundary_widths() {
        for len in 1..50 {
            let input = random_input(len, 20);
            let max = *input.iter().max().unwrap();
            for (name, alg) in ALGS {
                assert_eq!(alg(&input, 1).unwrap(), input, "alg={name} len={len}");
                assert_eq!(alg(&input, len).unwrap(), [max], "alg={name} len={len}");
            }
        }
    }

    /// All algorithms agree on random inputs, for every window width.
    /// A small alphabet forces many ties.
    #[test]
    fn equivalence() {
        for sigma in [2, 5, 1000] {
            for len in (1..70).chain([500]) {
                let input = random_input(len, sigma);
                for k in 1..=len.min(70) {
                    let expected = brute_force_max(&input, k).unwrap();
                    assert_eq!(expected.len(), len - k + 1);
                    for (p, m) in expected.iter().enumerate() {
                        assert_eq!(m, input[p..p + k].iter().max().unwrap());
                    }
                    for (name, alg) in ALGS {
                        assert_eq!(
                            alg(&input, k).unwrap(),
                            expected,
                            "alg={name} len={len} k={k} sigma={sigma}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn invariant_holds_at_every_step() {
        for sigma in [3, 1000] {
            for len in 1..60 {
                let input = random_input(len, sigma);
                for k in 1..=len {
                    let mut steps = 0;
                    deque_max_inspect(&input, k, |i, deque| {
                        assert_eq!(i, steps);
                        steps += 1;
                        assert!(deque.len() <= k);
                        if let Err(e) = check_window_invariant(&input, k, i, deque) {
                            panic!("len={len} k={k} i={i}: {e}");
                        }
                    })
                    .unwrap();
                    assert_eq!(steps, len);
                }
            }
        }
    }

    #[test]
    fn invariant_check_rejects_bad_deques() {
        let input = [5, 3, 3, 1];
        let mut d = RingDeque::new();
        assert!(check_window_invariant(&input, 2, 1, &d).is_err());
        d.insert_back(1);
        d.insert_back(2);
        // Equal values are not strictly decreasing.
        assert!(check_window_invariant(&input, 3, 2, &d).is_err());
        let mut d = RingDeque::new();
        d.insert_back(0);
        d.insert_back(3);
        // Index 0 has left the window [2, 3].
        assert!(check_window_invariant(&input, 2, 3, &d).is_err());
        assert!(check_window_invariant(&input, 4, 3, &d).is_ok());
    }

    #[test]
    fn ties_keep_the_newest_index() {
        let input = [4, 4, 4, 1];
        let mut fronts = vec![];
        deque_max_inspect(&input, 2, |_, deque| {
            fronts.push(*deque.first().unwrap());
        })
        .unwrap();
        assert_eq!(fronts, [0, 1, 2, 2]);
    }

    #[test]
    fn invalid_windows() {
        for (name, alg) in ALGS {
            assert_eq!(alg(&[], 1), Err(WindowError::EmptyInput), "alg={name}");
            assert_eq!(alg(&[], 0), Err(WindowError::EmptyInput), "alg={name}");
            assert_eq!(alg(&[1, 2, 3], 0), Err(WindowError::ZeroWidth), "alg={name}");
            assert_eq!(
                alg(&[1, 2, 3], 4),
                Err(WindowError::InvalidWidth { k: 4, len: 3 }),
                "alg={name}"
            );
        }
        assert_eq!(
            sliding_min(&[1, 2], 3),
            Err(WindowError::InvalidWidth { k: 3, len: 2 })
        );
    }

    #[test]
    fn minimum() {
        assert_eq!(
            sliding_min(&[9, 1, 1, 0, 0, 0, 1, 0, 6, 8], 3).unwrap(),
            [1, 0, 0, 0, 0, 0, 0, 0]
        );
        for len in 1..60 {
            let input = random_input(len, 10);
            for k in 1..=len {
                let expected = input
                    .windows(k)
                    .map(|w| *w.iter().min().unwrap())
                    .collect_vec();
                assert_eq!(sliding_min(&input, k).unwrap(), expected, "len={len} k={k}");
            }
        }
    }

    #[test]
    fn non_copy_values() {
        let input = ["pear", "apple", "zucchini", "fig", "kiwi"].map(String::from);
        let expected = ["pear", "zucchini", "zucchini", "kiwi"].map(String::from);
        assert_eq!(deque_max(&input, 2).unwrap(), expected);
        assert_eq!(rescan_max(&input, 2).unwrap(), expected);
        assert_eq!(brute_force_max(&input, 2).unwrap(), expected);
    }
}
