//! Priority queue whose ordering can be changed while it holds elements
//!
//! [`PriorityQueue`] is a thin front over [`Heap`]. Changing its ordering
//! builds a fresh heap under the new [`SortOrder`], moves every element across
//! with [`reheapify`], and drops the old heap.
//!
//! # Example
//!
//! ```rust
//! use rust_pqueue::pqueue::PriorityQueue;
//! use rust_pqueue::sort_order::{shared, Ascending, Descending};
//!
//! let mut queue = PriorityQueue::new(shared(Ascending));
//! queue.push(3);
//! queue.push(9);
//! queue.push(5);
//! assert_eq!(*queue.peek_front().unwrap(), 9);
//!
//! queue.change_ordering(shared(Descending)).unwrap();
//! assert_eq!(queue.pop_front(), Ok(3));
//! assert_eq!(queue.len(), 2);
//! ```

use std::cell::Ref;
use std::fmt;

use log::debug;

use crate::heap::{reheapify, Heap};
use crate::traits::{HeapError, SortOrderRef};

/// A priority queue with a swappable sort order
pub struct PriorityQueue<T> {
    heap: Heap<T>,
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue ordered by `order`
    pub fn new(order: SortOrderRef<T>) -> Self {
        Self {
            heap: Heap::new(order),
        }
    }

    /// Creates an empty queue with room for `capacity` elements
    pub fn with_capacity(order: SortOrderRef<T>, capacity: usize) -> Self {
        Self {
            heap: Heap::with_capacity(order, capacity),
        }
    }

    /// Number of queued elements
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The ordering currently in force
    pub fn sort_order(&self) -> &SortOrderRef<T> {
        self.heap.sort_order()
    }

    /// Adds an element
    pub fn push(&mut self, item: T) {
        self.heap.insert(item);
    }

    /// Borrows the front (highest-priority) element
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the queue is empty.
    pub fn peek_front(&self) -> Result<Ref<'_, T>, HeapError> {
        self.heap.peek_top()
    }

    /// Removes and returns the front element
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the queue is empty.
    pub fn pop_front(&mut self) -> Result<T, HeapError> {
        self.heap.pop_top()
    }

    /// Re-ranks every queued element under `order`
    ///
    /// # Time Complexity
    /// O(n log n)
    pub fn change_ordering(&mut self, order: SortOrderRef<T>) -> Result<(), HeapError> {
        let mut reordered = Heap::with_capacity(order, self.heap.len());
        let moved = reheapify(&mut reordered, &mut self.heap)?;
        self.heap = reordered;
        debug!("changed queue ordering, {moved} elements re-ranked");
        Ok(())
    }

    /// Consumes the queue, returning its elements front first
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.heap.into_sorted_vec()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("heap", &self.heap)
            .finish()
    }
}
