//! Common traits and error types
//!
//! - [`SortOrder`]: the single ordering capability every heap in this crate
//!   is driven by
//! - [`TreeError`]: misuse of a [`CompleteTree`](crate::complete_tree::CompleteTree)
//!   or one of its cursors
//! - [`HeapError`]: misuse of a [`Heap`](crate::heap::Heap)
//!
//! All errors describe caller contract violations. Nothing in the crate
//! retries or recovers from them; they are returned to the caller as soon as
//! the misuse is detected.

use std::fmt;
use std::rc::Rc;

/// Error type for complete tree and cursor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// A cursor was read or written at an offset past the end of the tree
    OutOfBounds {
        /// Offset the cursor pointed at
        offset: usize,
        /// Size of the tree at the time of access
        len: usize,
    },
    /// A cursor was used after the tree it points into was dropped
    DanglingTree,
    /// `erase_last` was called on a tree with no nodes
    EmptyTree,
    /// The tree's storage was already borrowed in a way that conflicts with
    /// the access, e.g. a write while a `Ref` from `CompleteTree::get` is alive
    StorageBorrowed,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::OutOfBounds { offset, len } => {
                write!(f, "cursor offset {offset} is outside a tree of size {len}")
            }
            TreeError::DanglingTree => {
                write!(f, "cursor refers to a tree that no longer exists")
            }
            TreeError::EmptyTree => write!(f, "cannot erase from an empty complete tree"),
            TreeError::StorageBorrowed => {
                write!(f, "complete tree storage is already borrowed")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `peek_top` or `pop_top` was called on an empty heap
    EmptyHeap,
    /// The underlying tree rejected an access
    ///
    /// Heap maintenance only touches positions it has checked, so seeing this
    /// means the heap's shape invariant was broken.
    Tree(TreeError),
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "cannot access the top of an empty heap"),
            HeapError::Tree(err) => write!(f, "heap storage error: {err}"),
        }
    }
}

impl std::error::Error for HeapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeapError::EmptyHeap => None,
            HeapError::Tree(err) => Some(err),
        }
    }
}

impl From<TreeError> for HeapError {
    fn from(err: TreeError) -> Self {
        HeapError::Tree(err)
    }
}

/// An ordering policy over `T`
///
/// `less_than` is the only source of ordering truth for a heap: the heap keeps
/// an element on top that no other element is "less than". Implementations
/// must form a strict weak ordering (irreflexive, transitive, with transitive
/// ties), otherwise the heap property cannot be maintained. This is not
/// checked at runtime.
///
/// Any `Fn(&T, &T) -> bool` closure is a sort order:
///
/// ```rust
/// use rust_pqueue::SortOrder;
///
/// let by_len = |a: &&str, b: &&str| a.len() < b.len();
/// assert!(by_len.less_than(&"ab", &"abc"));
/// assert!(by_len.equivalent(&"ab", &"cd"));
/// ```
pub trait SortOrder<T: ?Sized> {
    /// Returns true if `lhs` sorts strictly before `rhs`
    fn less_than(&self, lhs: &T, rhs: &T) -> bool;

    /// Returns true if neither argument sorts before the other
    fn equivalent(&self, lhs: &T, rhs: &T) -> bool {
        !self.less_than(lhs, rhs) && !self.less_than(rhs, lhs)
    }
}

impl<T: ?Sized, F> SortOrder<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn less_than(&self, lhs: &T, rhs: &T) -> bool {
        self(lhs, rhs)
    }
}

/// A shared, type-erased sort order
///
/// Criteria are reference counted so the same criterion can appear in several
/// [`Composite`](crate::sort_order::Composite) orders and heaps at once.
pub type SortOrderRef<T> = Rc<dyn SortOrder<T>>;
