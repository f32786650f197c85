//! Index arithmetic for array-backed complete binary trees
//!
//! A complete tree packs its nodes level by level, left to right, into a flat
//! array. With 1-based numbering the node `i` has children `2i` and `2i + 1`
//! and parent `i / 2`, so [`TreeIndex`] keeps a 1-based position internally
//! and exposes the 0-based array offset.
//!
//! Nothing here checks bounds: an index happily walks past the last node of a
//! tree. Deciding whether a position is still inside the tree is the caller's
//! job (see [`Cursor::is_in_tree`](crate::complete_tree::Cursor::is_in_tree)).
//!
//! The arithmetic saturates instead of overflowing. A walk deep enough to
//! exceed `usize` pins the index at `usize::MAX`, which no move brings back,
//! so the position stays out of range for any tree.
//!
//! # Example
//!
//! ```rust
//! use rust_pqueue::index::TreeIndex;
//!
//! let mut idx = TreeIndex::root();
//! idx.move_to_left();
//! idx.move_to_left();
//! idx.move_to_left();
//! assert_eq!(idx.offset(), 7);
//! idx.move_to_parent();
//! assert_eq!(idx.offset(), 3);
//! idx.move_to_right();
//! assert_eq!(idx.offset(), 8);
//! ```

/// Offset of the left child of the node stored at `offset`
#[inline]
pub fn left_child(offset: usize) -> usize {
    offset.saturating_add(1).saturating_mul(2) - 1
}

/// Offset of the right child of the node stored at `offset`
#[inline]
pub fn right_child(offset: usize) -> usize {
    offset.saturating_add(1).saturating_mul(2)
}

/// Offset of the parent of the node stored at `offset`, or `None` for the root
#[inline]
pub fn parent(offset: usize) -> Option<usize> {
    (offset.saturating_add(1) / 2).checked_sub(1)
}

/// A position in a complete tree
///
/// Stored 1-based so that moving between generations is a doubling or a
/// halving. The stored value is never zero; `usize::MAX` marks a position
/// that has run off the bottom of any representable tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeIndex {
    one_based: usize,
}

impl TreeIndex {
    /// The index of the root node (array offset 0)
    pub fn root() -> Self {
        Self { one_based: 1 }
    }

    /// Creates an index pointing at the given 0-based array offset
    pub fn from_offset(offset: usize) -> Self {
        Self {
            one_based: offset.saturating_add(1),
        }
    }

    /// The 0-based offset into the tree's backing array
    #[inline]
    pub fn offset(&self) -> usize {
        self.one_based - 1
    }

    /// True if this index addresses the root
    #[inline]
    pub fn is_root(&self) -> bool {
        self.one_based == 1
    }

    /// Moves to where this node's left child would be
    #[inline]
    pub fn move_to_left(&mut self) {
        self.one_based = self.one_based.saturating_mul(2);
    }

    /// Moves to where this node's right child would be
    #[inline]
    pub fn move_to_right(&mut self) {
        self.one_based = self.one_based.saturating_mul(2).saturating_add(1);
    }

    /// Moves to this node's parent
    ///
    /// The root is its own parent: calling this at the root leaves the index
    /// unchanged. A saturated index stays saturated.
    #[inline]
    pub fn move_to_parent(&mut self) {
        if !self.is_root() && self.one_based != usize::MAX {
            self.one_based /= 2;
        }
    }
}

impl Default for TreeIndex {
    fn default() -> Self {
        Self::root()
    }
}
