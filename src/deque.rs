//! A minimal double-ended queue.
//!
//! [`Deque`] is the capability set the windowed maximum needs: insert and
//! remove at both ends, peek at both ends, and a size. Nothing else.
//! [`RingDeque`] implements it with a growable ring buffer so that every
//! operation is O(1) (inserts amortized). [`VecDeque`] implements it too.

use std::collections::VecDeque;

use crate::error::DequeError;

/// A double-ended queue.
///
/// Removals and peeks fail with [`DequeError::Empty`] when there is nothing
/// to return. Inserts never fail.
pub trait Deque<T> {
    /// Place `item` before the current front.
    fn insert_front(&mut self, item: T);
    /// Place `item` after the current back.
    fn insert_back(&mut self, item: T);
    /// Remove and return the front element.
    fn remove_first(&mut self) -> Result<T, DequeError>;
    /// Remove and return the back element.
    fn remove_last(&mut self) -> Result<T, DequeError>;
    fn first(&self) -> Result<&T, DequeError>;
    fn last(&self) -> Result<&T, DequeError>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A ring buffer that doubles its capacity when full.
///
/// `data[head]` holds the front; the following `len` slots, wrapping around
/// the end of `data`, hold the rest in order. Slots outside that range are
/// `None`.
#[derive(Debug, Clone)]
pub struct RingDeque<T> {
    head: usize,
    len: usize,
    data: Vec<Option<T>>,
}

impl<T> Default for RingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RingDeque<T> {
    pub fn new() -> Self {
        RingDeque {
            head: 0,
            len: 0,
            data: Vec::new(),
        }
    }

    /// A deque that can hold `cap` elements before it reallocates.
    pub fn with_capacity(cap: usize) -> Self {
        RingDeque {
            head: 0,
            len: 0,
            data: (0..cap).map(|_| None).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Iterate from front to back.
    ///
    /// Only used to inspect the contents; the algorithms go through [`Deque`].
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.data[self.slot(i)].as_ref())
    }

    /// Index in `data` of the `i`'th element from the front.
    /// Requires a non-zero capacity.
    #[inline(always)]
    fn slot(&self, i: usize) -> usize {
        let idx = self.head + i;
        if idx >= self.data.len() {
            idx - self.data.len()
        } else {
            idx
        }
    }

    /// Move the elements into a buffer of twice the size, front at slot 0.
    fn grow(&mut self) {
        let cap = (2 * self.data.len()).max(4);
        let mut data: Vec<Option<T>> = (0..cap).map(|_| None).collect();
        for (i, slot) in data.iter_mut().enumerate().take(self.len) {
            let s = self.slot(i);
            *slot = self.data[s].take();
        }
        self.data = data;
        self.head = 0;
    }
}

impl<T> Deque<T> for RingDeque<T> {
    #[inline(always)]
    fn insert_front(&mut self, item: T) {
        if self.len == self.data.len() {
            self.grow();
        }
        self.head = if self.head == 0 {
            self.data.len() - 1
        } else {
            self.head - 1
        };
        self.data[self.head] = Some(item);
        self.len += 1;
    }

    #[inline(always)]
    fn insert_back(&mut self, item: T) {
        if self.len == self.data.len() {
            self.grow();
        }
        let s = self.slot(self.len);
        self.data[s] = Some(item);
        self.len += 1;
    }

    #[inline(always)]
    fn remove_first(&mut self) -> Result<T, DequeError> {
        const OP: &str = "remove_first";
        if self.len == 0 {
            return Err(DequeError::Empty { op: OP });
        }
        let item = self.data[self.head].take();
        self.head = self.slot(1);
        self.len -= 1;
        item.ok_or(DequeError::Empty { op: OP })
    }

    #[inline(always)]
    fn remove_last(&mut self) -> Result<T, DequeError> {
        const OP: &str = "remove_last";
        if self.len == 0 {
            return Err(DequeError::Empty { op: OP });
        }
        let s = self.slot(self.len - 1);
        self.len -= 1;
        self.data[s].take().ok_or(DequeError::Empty { op: OP })
    }

    #[inline(always)]
    fn first(&self) -> Result<&T, DequeError> {
        const OP: &str = "first";
        if self.len == 0 {
            return Err(DequeError::Empty { op: OP });
        }
        self.data[self.head]
            .as_ref()
            .ok_or(DequeError::Empty { op: OP })
    }

    #[inline(always)]
    fn last(&self) -> Result<&T, DequeError> {
        const OP: &str = "last";
        if self.len == 0 {
            return Err(DequeError::Empty { op: OP });
        }
        self.data[self.slot(self.len - 1)]
            .as_ref()
            .ok_or(DequeError::Empty { op: OP })
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> Deque<T> for VecDeque<T> {
    fn insert_front(&mut self, item: T) {
        self.push_front(item);
    }

    fn insert_back(&mut self, item: T) {
        self.push_back(item);
    }

    fn remove_first(&mut self) -> Result<T, DequeError> {
        self.pop_front()
            .ok_or(DequeError::Empty { op: "remove_first" })
    }

    fn remove_last(&mut self) -> Result<T, DequeError> {
        self.pop_back().ok_or(DequeError::Empty { op: "remove_last" })
    }

    fn first(&self) -> Result<&T, DequeError> {
        self.front().ok_or(DequeError::Empty { op: "first" })
    }

    fn last(&self) -> Result<&T, DequeError> {
        self.back().ok_or(DequeError::Empty { op: "last" })
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}
