//! Binary heap over a [`CompleteTree`] with a pluggable [`SortOrder`]
//!
//! The heap keeps the element that no other element is "less than" (under
//! its sort order) at the root of a complete tree. With [`Ascending`] that is
//! the largest element, with [`Descending`] the smallest.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `insert`  | O(log n)   |
//! | `pop_top` | O(log n)   |
//! | `peek_top`| O(1)       |
//! | `reheapify` | O(n log n) |
//!
//! # Tie-breaking
//!
//! Sift-down first compares the two children, letting the right child win an
//! exact tie, then compares that winner with the node being sifted, letting
//! the node win an exact tie. Elements of equal priority therefore always end
//! up in the same positions for the same sequence of operations.
//!
//! # Example
//!
//! ```rust
//! use rust_pqueue::heap::Heap;
//! use rust_pqueue::sort_order::Descending;
//!
//! let mut heap = Heap::with_order(Descending);
//! heap.insert(3);
//! heap.insert(1);
//! heap.insert(2);
//!
//! assert_eq!(*heap.peek_top().unwrap(), 1);
//! assert_eq!(heap.pop_top(), Ok(1));
//! assert_eq!(heap.into_sorted_vec(), vec![2, 3]);
//! ```
//!
//! [`Ascending`]: crate::sort_order::Ascending
//! [`Descending`]: crate::sort_order::Descending

use std::cell::Ref;
use std::fmt;

use log::{debug, trace};

use crate::complete_tree::{pick_largest_of_three, swap_node_values, CompleteTree};
use crate::index;
use crate::traits::{HeapError, SortOrder, SortOrderRef, TreeError};

/// A binary heap ordered by a runtime-chosen [`SortOrder`]
pub struct Heap<T> {
    tree: CompleteTree<T>,
    order: SortOrderRef<T>,
}

impl<T> Heap<T> {
    /// Creates an empty heap using a shared sort order
    pub fn new(order: SortOrderRef<T>) -> Self {
        Self {
            tree: CompleteTree::new(),
            order,
        }
    }

    /// Creates an empty heap from any sort order value
    pub fn with_order<S>(order: S) -> Self
    where
        S: SortOrder<T> + 'static,
    {
        Self::new(crate::sort_order::shared(order))
    }

    /// Creates an empty heap that can hold `capacity` elements before
    /// reallocating
    pub fn with_capacity(order: SortOrderRef<T>, capacity: usize) -> Self {
        Self {
            tree: CompleteTree::with_capacity(capacity),
            order,
        }
    }

    /// The sort order this heap maintains
    pub fn sort_order(&self) -> &SortOrderRef<T> {
        &self.order
    }

    /// Number of elements in the heap
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True if the heap has no elements
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn insert(&mut self, value: T) {
        self.tree.append(value);
        self.bubble_up(self.tree.len() - 1);
    }

    /// Borrows the top element
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap is empty.
    pub fn peek_top(&self) -> Result<Ref<'_, T>, HeapError> {
        self.tree.get(0).ok_or(HeapError::EmptyHeap)
    }

    /// Removes and returns the top element
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn pop_top(&mut self) -> Result<T, HeapError> {
        if self.tree.is_empty() {
            return Err(HeapError::EmptyHeap);
        }

        swap_node_values(&self.tree.root(), &self.tree.last_node())?;
        let top = self.tree.erase_last()?;

        if !self.tree.is_empty() {
            self.sift_down()?;
        }

        Ok(top)
    }

    /// Moves every element out of this heap and back in
    ///
    /// The element count is taken once up front, so each of the original
    /// elements is popped and reinserted exactly once. The content and pop
    /// order are unchanged. Returns the number of elements moved.
    pub fn reheapify_in_place(&mut self) -> Result<usize, HeapError> {
        let count = self.len();
        for _ in 0..count {
            let value = self.pop_top()?;
            self.insert(value);
        }
        debug!("reheapified {count} elements in place");
        Ok(count)
    }

    /// Iterator that pops elements in priority order
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T> {
        DrainSorted { heap: self }
    }

    /// Consumes the heap, returning its elements in pop order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        sorted.extend(self.drain_sorted());
        sorted
    }

    /// True if no parent is strictly less than one of its children
    pub fn is_heap_ordered(&self) -> bool {
        let nodes = self.tree.nodes();
        (1..nodes.len()).all(|offset| match index::parent(offset) {
            Some(parent) => !self.order.less_than(&nodes[parent], &nodes[offset]),
            None => true,
        })
    }

    /// Move the node at `offset` towards the root while its parent is
    /// strictly less than it
    fn bubble_up(&mut self, mut offset: usize) {
        while let Some(parent) = index::parent(offset) {
            let parent_is_less = {
                let nodes = self.tree.nodes();
                self.order.less_than(&nodes[parent], &nodes[offset])
            };
            if !parent_is_less {
                break;
            }
            self.tree.swap(parent, offset);
            offset = parent;
        }
    }

    /// Move the root towards the leaves while a child outranks it
    fn sift_down(&mut self) -> Result<(), TreeError> {
        let mut current = self.tree.root();
        loop {
            let mut left = current.clone();
            left.go_left_child();
            let mut right = current.clone();
            right.go_right_child();

            let best = pick_largest_of_three(&left, &right, &current, &*self.order)?;
            if best == current {
                return Ok(());
            }

            trace!("sift down {} -> {}", current.offset(), best.offset());
            swap_node_values(&current, &best)?;
            current = best;
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap").field("tree", &self.tree).finish_non_exhaustive()
    }
}

/// Moves every element of `src` into `dest`, returning how many were moved
///
/// `src.len()` is read once before the transfer starts. Afterwards `src` is
/// empty and `dest` holds its former elements ordered by `dest`'s own sort
/// order, whatever order `src` used. Moving a heap into itself is done with
/// [`Heap::reheapify_in_place`].
///
/// # Errors
/// Only if `src` turns out to be structurally broken.
///
/// # Example
///
/// ```rust
/// use rust_pqueue::heap::{reheapify, Heap};
/// use rust_pqueue::sort_order::{Ascending, Descending};
///
/// let mut max_heap = Heap::with_order(Ascending);
/// for v in [4, 8, 1] {
///     max_heap.insert(v);
/// }
///
/// let mut min_heap = Heap::with_order(Descending);
/// assert_eq!(reheapify(&mut min_heap, &mut max_heap), Ok(3));
/// assert!(max_heap.is_empty());
/// assert_eq!(min_heap.into_sorted_vec(), vec![1, 4, 8]);
/// ```
pub fn reheapify<T>(dest: &mut Heap<T>, src: &mut Heap<T>) -> Result<usize, HeapError> {
    let count = src.len();
    for _ in 0..count {
        let value = src.pop_top()?;
        dest.insert(value);
    }
    debug!("reheapified {count} elements");
    Ok(count)
}

/// Draining iterator returned by [`Heap::drain_sorted`]
///
/// Elements not consumed stay in the heap.
pub struct DrainSorted<'a, T> {
    heap: &'a mut Heap<T>,
}

impl<T> Iterator for DrainSorted<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.heap.pop_top() {
            Ok(value) => Some(value),
            Err(HeapError::EmptyHeap) => None,
            Err(err) => {
                debug_assert!(false, "drain stopped on a broken heap: {err}");
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for DrainSorted<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort_order::{shared, Ascending, Composite, Descending};

    fn max_heap() -> Heap<i32> {
        Heap::with_order(Ascending)
    }

    #[test]
    fn test_tops_while_inserting() {
        let mut heap = max_heap();
        let mut tops = Vec::new();
        for v in [5, 13, 17, 15, 3, 17] {
            heap.insert(v);
            tops.push(*heap.peek_top().unwrap());
        }
        assert_eq!(tops, vec![5, 13, 17, 17, 17, 17]);
        assert!(heap.is_heap_ordered());

        let mut popped = Vec::new();
        while let Ok(v) = heap.pop_top() {
            popped.push(v);
        }
        assert_eq!(popped, vec![17, 17, 15, 13, 5, 3]);
        assert_eq!(heap.pop_top(), Err(HeapError::EmptyHeap));
    }

    #[test]
    fn test_empty_heap_errors() {
        let mut heap = max_heap();
        assert!(heap.is_empty());
        assert_eq!(heap.peek_top().err(), Some(HeapError::EmptyHeap));
        assert_eq!(heap.pop_top(), Err(HeapError::EmptyHeap));
    }

    #[test]
    fn test_refill_after_emptying() {
        let mut heap = max_heap();
        heap.insert(1);
        assert_eq!(heap.pop_top(), Ok(1));

        heap.insert(3);
        heap.insert(4);
        assert_eq!(*heap.peek_top().unwrap(), 4);
        heap.insert(3);
        assert_eq!(heap.pop_top(), Ok(4));
        assert_eq!(heap.pop_top(), Ok(3));
        assert_eq!(heap.pop_top(), Ok(3));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_reheapify_switches_order() {
        let mut heap = max_heap();
        let mut expected_top = i32::MIN;
        for v in [50, 45, 40, 35, 55, 30, 25, 20, 10, 12, 12] {
            heap.insert(v);
            expected_top = expected_top.max(v);
            assert_eq!(*heap.peek_top().unwrap(), expected_top);
        }

        let mut reheaped = Heap::with_order(Descending);
        assert_eq!(reheapify(&mut reheaped, &mut heap), Ok(11));
        assert!(heap.is_empty());
        assert_eq!(reheaped.len(), 11);

        let firsts: Vec<i32> = reheaped.drain_sorted().take(6).collect();
        assert_eq!(firsts, vec![10, 12, 12, 20, 25, 30]);
        assert_eq!(reheaped.len(), 5);
    }

    #[test]
    fn test_reheapify_in_place_keeps_order() {
        let mut heap = max_heap();
        for v in [9, 2, 7, 7, 1, 8] {
            heap.insert(v);
        }
        assert_eq!(heap.reheapify_in_place(), Ok(6));
        assert_eq!(heap.len(), 6);
        assert_eq!(heap.into_sorted_vec(), vec![9, 8, 7, 7, 2, 1]);
    }

    #[test]
    fn test_equal_children_sift_into_right() {
        // Tags are ignored by the order, so the tag layout exposes tie-breaking
        let order = shared(|a: &(i32, char), b: &(i32, char)| a.0 < b.0);
        let mut heap = Heap::new(order);
        heap.insert((9, 'r'));
        heap.insert((5, 'a'));
        heap.insert((5, 'b'));
        heap.insert((1, 'z'));

        // Root 9 with equal children 5a (left) and 5b (right)
        assert_eq!(heap.pop_top(), Ok((9, 'r')));
        // 1z moved to the root and sank into the right child's slot
        assert_eq!(*heap.peek_top().unwrap(), (5, 'b'));
        assert_eq!(&*heap.tree.nodes(), &[(5, 'b'), (5, 'a'), (1, 'z')]);
    }

    #[test]
    fn test_equal_element_does_not_bubble_past_parent() {
        let order = shared(|a: &(i32, char), b: &(i32, char)| a.0 < b.0);
        let mut heap = Heap::new(order);
        heap.insert((4, 'f'));
        heap.insert((4, 's'));
        assert_eq!(*heap.peek_top().unwrap(), (4, 'f'));
    }

    #[test]
    fn test_composite_heap() {
        let by_first = shared(|a: &(u8, u8), b: &(u8, u8)| a.0 < b.0);
        let by_second_desc = shared(|a: &(u8, u8), b: &(u8, u8)| a.1 > b.1);
        let mut heap = Heap::with_order(Composite::new([by_first, by_second_desc]));
        for pair in [(1, 5), (3, 9), (3, 2), (2, 0), (3, 2)] {
            heap.insert(pair);
        }
        assert_eq!(
            heap.into_sorted_vec(),
            vec![(3, 2), (3, 2), (3, 9), (2, 0), (1, 5)]
        );
    }

    #[test]
    fn test_large_random_like_sequence() {
        let mut heap = Heap::with_capacity(shared(Descending), 1000);
        let mut state: u32 = 12345;
        let mut values = Vec::new();
        for _ in 0..1000 {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            let v = (state >> 16) as i32 % 500;
            values.push(v);
            heap.insert(v);
        }
        assert!(heap.is_heap_ordered());
        values.sort();
        assert_eq!(heap.into_sorted_vec(), values);
    }

    #[test]
    fn test_drain_sorted_size_hint() {
        let mut heap = max_heap();
        for v in 0..10 {
            heap.insert(v);
        }
        let drain = heap.drain_sorted();
        assert_eq!(drain.len(), 10);
    }

    #[test]
    fn test_drain_sorted_stops_when_empty() {
        let mut heap = max_heap();
        for v in [3, 1, 2] {
            heap.insert(v);
        }

        let mut drain = heap.drain_sorted();
        assert_eq!(drain.by_ref().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(drain.next(), None);
        assert_eq!(drain.len(), 0);
        assert!(heap.is_empty());
        assert_eq!(heap.pop_top(), Err(HeapError::EmptyHeap));
    }
}
