use itertools::Itertools;
use serde::Serialize;

use crate::deque::{Deque, RingDeque};
use crate::error::{InvariantError, WindowError};

/// Upper bound on the slots reserved up front; the deque grows past it on demand.
const MAX_PREALLOC: usize = 1024;

/// A value at an absolute position in a stream.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Elem<V> {
    pub pos: usize,
    pub val: V,
}

/// Sliding window maximum over a stream of unknown length.
///
/// Holds (pos, val) pairs. Positions are increasing and values strictly
/// decreasing, so the largest value of the last `w` elements is at the front.
/// Eviction only looks at absolute positions, so the input never has to be
/// materialized.
pub struct MonotoneQueue<V: Ord> {
    w: usize,
    /// Position of the next element.
    pos: usize,
    q: RingDeque<Elem<V>>,
}

impl<V: Ord> MonotoneQueue<V> {
    /// Initialize a new queue for windows of `w` elements.
    pub fn new(w: usize) -> Result<Self, WindowError> {
        if w == 0 {
            return Err(WindowError::ZeroWidth);
        }
        // The queue never holds more than `w` elements, but `w` may be far
        // larger than the stream.
        Ok(Self {
            w,
            pos: 0,
            q: RingDeque::with_capacity(w.min(MAX_PREALLOC)),
        })
    }

    /// Push the next value of the stream.
    /// Preceding values that are not larger are removed, so the newest of equal
    /// maxima is kept.
    ///
    /// Returns the maximum of the last `w` values, or `None` while fewer than
    /// `w` values have been pushed.
    pub fn push(&mut self, val: V) -> Option<&Elem<V>> {
        while self.q.last().is_ok_and(|back| back.val <= val) {
            self.q.remove_last().ok();
        }
        self.q.insert_back(Elem { pos: self.pos, val });
        self.pos += 1;

        // Drop elements at positions < pos - w.
        while self.q.first().is_ok_and(|front| self.pos - front.pos > self.w) {
            self.q.remove_first().ok();
        }

        if self.pos >= self.w {
            self.q.first().ok()
        } else {
            None
        }
    }

    /// The window width.
    pub fn w(&self) -> usize {
        self.w
    }

    /// Number of values pushed so far.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Number of candidates currently held.
    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// Verify that positions increase, values strictly decrease, and every
    /// position is inside the last window.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let lo = self.pos.saturating_sub(self.w);
        if let Some(e) = self.q.iter().find(|e| e.pos < lo || e.pos >= self.pos) {
            return Err(InvariantError::new(format!(
                "position {} outside window [{lo}, {})",
                e.pos, self.pos
            )));
        }
        for (a, b) in self.q.iter().tuple_windows() {
            if a.pos >= b.pos {
                return Err(InvariantError::new(format!(
                    "positions {} and {} are not increasing",
                    a.pos, b.pos
                )));
            }
            if a.val <= b.val {
                return Err(InvariantError::new(format!(
                    "values at positions {} and {} are not strictly decreasing",
                    a.pos, b.pos
                )));
            }
        }
        Ok(())
    }
}

/// Iterator over the maxima of all windows of an underlying iterator.
/// Created by [`SlidingMaxExt::sliding_max`].
pub struct SlidingMax<I>
where
    I: Iterator,
    I::Item: Ord,
{
    it: I,
    q: MonotoneQueue<I::Item>,
}

impl<I> Iterator for SlidingMax<I>
where
    I: Iterator,
    I::Item: Ord + Clone,
{
    type Item = Elem<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let val = self.it.next()?;
            if let Some(max) = self.q.push(val) {
                return Some(max.clone());
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Values still needed before the first window is complete.
        let pending = self.q.w().saturating_sub(self.q.pos() + 1);
        let (lo, hi) = self.it.size_hint();
        (
            lo.saturating_sub(pending),
            hi.map(|hi| hi.saturating_sub(pending)),
        )
    }
}

/// An iterator extension trait so we can conveniently call `.sliding_max` on any iterator.
pub trait SlidingMaxExt: Iterator + Sized {
    /// The maxima of all windows of `w` consecutive items, with the position
    /// of the last occurrence of each maximum.
    fn sliding_max(self, w: usize) -> Result<SlidingMax<Self>, WindowError>
    where
        Self::Item: Ord,
    {
        Ok(SlidingMax {
            it: self,
            q: MonotoneQueue::new(w)?,
        })
    }
}

impl<I: Iterator> SlidingMaxExt for I {}
