//! Array-backed complete binary tree with navigable cursors
//!
//! A [`CompleteTree`] is a growable array read as a binary tree: offset 0 is
//! the root and the children of offset `i` live at `2i + 1` and `2i + 2` (see
//! [`crate::index`]). Nodes are only ever added or removed at the end, so the
//! array never has gaps and the tree is always filled level by level, left to
//! right.
//!
//! # Ownership
//!
//! The tree owns its storage through an `Rc<RefCell<Vec<T>>>`. A [`Cursor`]
//! holds only a `Weak` handle plus a [`TreeIndex`], so it never keeps the tree
//! alive. Every cursor access upgrades the weak handle first and reports
//! [`TreeError::DanglingTree`] once the tree is gone.
//!
//! # Example
//!
//! ```rust
//! use rust_pqueue::complete_tree::CompleteTree;
//!
//! let mut tree = CompleteTree::new();
//! for value in [1, 2, 3, 4] {
//!     tree.append(value);
//! }
//!
//! let mut cursor = tree.root();
//! cursor.go_left_child();
//! cursor.go_left_child();
//! assert_eq!(cursor.value(), Ok(4));
//! cursor.go_up();
//! assert_eq!(cursor.value(), Ok(2));
//! cursor.go_up();
//! assert_eq!(cursor.value(), Ok(1));
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::index::TreeIndex;
use crate::traits::{SortOrder, TreeError};

type Nodes<T> = RefCell<Vec<T>>;

fn read_nodes<T>(nodes: &Nodes<T>) -> Result<Ref<'_, Vec<T>>, TreeError> {
    nodes.try_borrow().map_err(|_| TreeError::StorageBorrowed)
}

fn write_nodes<T>(nodes: &Nodes<T>) -> Result<RefMut<'_, Vec<T>>, TreeError> {
    nodes.try_borrow_mut().map_err(|_| TreeError::StorageBorrowed)
}

/// A complete binary tree stored as a flat array
pub struct CompleteTree<T> {
    nodes: Rc<Nodes<T>>,
}

impl<T> CompleteTree<T> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            nodes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Creates an empty tree with room for `capacity` nodes before reallocating
    ///
    /// The capacity is only an allocation hint; the tree still grows past it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Rc::new(RefCell::new(Vec::with_capacity(capacity))),
        }
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// True if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// A cursor at the root
    ///
    /// The cursor is created even for an empty tree; it just isn't in the
    /// tree until something is appended.
    pub fn root(&self) -> Cursor<T> {
        Cursor::new(Rc::downgrade(&self.nodes), TreeIndex::root())
    }

    /// A cursor at the most recently appended node
    ///
    /// For an empty tree this is the same as [`root`](Self::root) and is not
    /// in the tree.
    pub fn last_node(&self) -> Cursor<T> {
        let offset = self.len().saturating_sub(1);
        Cursor::new(Rc::downgrade(&self.nodes), TreeIndex::from_offset(offset))
    }

    /// Adds a node at the next free position (the leftmost gap of the deepest
    /// level, or the start of a new level)
    pub fn append(&mut self, value: T) {
        self.nodes.borrow_mut().push(value);
    }

    /// Removes and returns the last node
    ///
    /// # Errors
    /// Returns [`TreeError::EmptyTree`] if there is nothing to remove.
    pub fn erase_last(&mut self) -> Result<T, TreeError> {
        self.nodes.borrow_mut().pop().ok_or(TreeError::EmptyTree)
    }

    /// Borrows the node at `offset`, if there is one
    pub fn get(&self, offset: usize) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.nodes.borrow(), |nodes| nodes.get(offset)).ok()
    }

    /// Borrows all nodes in array order
    pub fn nodes(&self) -> Ref<'_, [T]> {
        Ref::map(self.nodes.borrow(), |nodes| nodes.as_slice())
    }

    /// Swaps the values stored at two offsets
    ///
    /// # Panics
    /// Panics if either offset is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.nodes.borrow_mut().swap(a, b);
    }
}

impl<T> Default for CompleteTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for CompleteTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompleteTree")
            .field("nodes", &*self.nodes.borrow())
            .finish()
    }
}

/// A non-owning position inside a [`CompleteTree`]
///
/// Moving a cursor never fails: it may wander below the last level or past
/// the end of the array. Whether it still points at a node is checked only
/// when it is read or written.
///
/// Cursor reads and writes borrow the tree's storage for the duration of the
/// call. Writing through a cursor while a [`Ref`] obtained from
/// [`CompleteTree::get`] or [`CompleteTree::nodes`] is alive fails with
/// [`TreeError::StorageBorrowed`] and leaves the tree untouched.
pub struct Cursor<T> {
    tree: Weak<Nodes<T>>,
    index: TreeIndex,
}

impl<T> Cursor<T> {
    fn new(tree: Weak<Nodes<T>>, index: TreeIndex) -> Self {
        Self { tree, index }
    }

    fn upgrade(&self) -> Result<Rc<Nodes<T>>, TreeError> {
        self.tree.upgrade().ok_or(TreeError::DanglingTree)
    }

    /// The array offset this cursor points at
    pub fn offset(&self) -> usize {
        self.index.offset()
    }

    /// The tree position this cursor points at
    pub fn index(&self) -> TreeIndex {
        self.index
    }

    /// Moves to the left child of the current position
    pub fn go_left_child(&mut self) {
        self.index.move_to_left();
    }

    /// Moves to the right child of the current position
    pub fn go_right_child(&mut self) {
        self.index.move_to_right();
    }

    /// Moves to the parent of the current position; stays put at the root
    pub fn go_up(&mut self) {
        self.index.move_to_parent();
    }

    /// True if the cursor currently points at a node of its tree
    ///
    /// A cursor that has walked further down than any tree can be deep is
    /// never in the tree.
    ///
    /// # Errors
    /// Returns [`TreeError::DanglingTree`] if the tree has been dropped.
    pub fn is_in_tree(&self) -> Result<bool, TreeError> {
        let nodes = self.upgrade()?;
        let in_tree = self.offset() < read_nodes(&nodes)?.len();
        Ok(in_tree)
    }

    /// Runs `f` on the value under the cursor
    ///
    /// # Errors
    /// [`TreeError::DanglingTree`] if the tree is gone,
    /// [`TreeError::OutOfBounds`] if the cursor is past the end of the tree.
    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, TreeError> {
        let nodes = self.upgrade()?;
        let nodes = read_nodes(&nodes)?;
        let value = nodes.get(self.offset()).ok_or(TreeError::OutOfBounds {
            offset: self.offset(),
            len: nodes.len(),
        })?;
        Ok(f(value))
    }

    /// Returns a copy of the value under the cursor
    ///
    /// # Errors
    /// Same as [`with_value`](Self::with_value).
    pub fn value(&self) -> Result<T, TreeError>
    where
        T: Clone,
    {
        self.with_value(T::clone)
    }

    /// Overwrites the value under the cursor, returning the previous one
    ///
    /// # Errors
    /// Same as [`with_value`](Self::with_value), plus
    /// [`TreeError::StorageBorrowed`] if the tree is borrowed elsewhere.
    pub fn set_value(&self, value: T) -> Result<T, TreeError> {
        let nodes = self.upgrade()?;
        let mut nodes = write_nodes(&nodes)?;
        let len = nodes.len();
        let slot = nodes.get_mut(self.offset()).ok_or(TreeError::OutOfBounds {
            offset: self.offset(),
            len,
        })?;
        Ok(std::mem::replace(slot, value))
    }

    fn check_in_tree(&self, nodes: &[T]) -> Result<usize, TreeError> {
        let offset = self.offset();
        if offset < nodes.len() {
            Ok(offset)
        } else {
            Err(TreeError::OutOfBounds {
                offset,
                len: nodes.len(),
            })
        }
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self {
            tree: Weak::clone(&self.tree),
            index: self.index,
        }
    }
}

/// Two cursors are equal when they point into the same tree at the same offset
impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && Weak::ptr_eq(&self.tree, &other.tree)
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("tree", &self.tree.as_ptr())
            .field("offset", &self.offset())
            .finish()
    }
}

/// Exchanges the values under two cursors
///
/// The cursors may point into the same tree or into two different trees.
/// `T` does not need to be `Clone`.
///
/// # Errors
/// [`TreeError::DanglingTree`] if either tree is gone,
/// [`TreeError::OutOfBounds`] if either cursor is outside its tree,
/// [`TreeError::StorageBorrowed`] if either tree is borrowed elsewhere.
pub fn swap_node_values<T>(a: &Cursor<T>, b: &Cursor<T>) -> Result<(), TreeError> {
    let a_nodes = a.upgrade()?;
    let b_nodes = b.upgrade()?;

    if Rc::ptr_eq(&a_nodes, &b_nodes) {
        let mut nodes = write_nodes(&a_nodes)?;
        let a_offset = a.check_in_tree(&nodes)?;
        let b_offset = b.check_in_tree(&nodes)?;
        nodes.swap(a_offset, b_offset);
    } else {
        let mut a_vec = write_nodes(&a_nodes)?;
        let mut b_vec = write_nodes(&b_nodes)?;
        let a_offset = a.check_in_tree(&a_vec)?;
        let b_offset = b.check_in_tree(&b_vec)?;
        std::mem::swap(&mut a_vec[a_offset], &mut b_vec[b_offset]);
    }
    Ok(())
}

/// Picks whichever of two cursors holds the larger value under `order`
///
/// - Both in their trees: `a` wins only if `b` is strictly less than `a`;
///   on an exact tie `b` wins.
/// - Only one in its tree: that one wins.
/// - Neither in its tree: `a` is returned.
///
/// # Errors
/// [`TreeError::DanglingTree`] if either tree is gone.
pub fn pick_largest<T, S>(a: &Cursor<T>, b: &Cursor<T>, order: &S) -> Result<Cursor<T>, TreeError>
where
    S: SortOrder<T> + ?Sized,
{
    let a_nodes = a.upgrade()?;
    let b_nodes = b.upgrade()?;
    let a_vec = read_nodes(&a_nodes)?;
    let b_vec = read_nodes(&b_nodes)?;

    let winner = match (a_vec.get(a.offset()), b_vec.get(b.offset())) {
        (Some(a_value), Some(b_value)) => {
            if order.less_than(b_value, a_value) {
                a
            } else {
                b
            }
        }
        (None, Some(_)) => b,
        _ => a,
    };
    Ok(winner.clone())
}

/// Picks the largest of three cursors: `a` and `b` are compared first, then
/// the winner is compared with `c`
///
/// Following [`pick_largest`], the later argument wins every exact tie, so a
/// tie between `a` and `b` goes to `b`, and a tie with `c` goes to `c`.
///
/// # Errors
/// [`TreeError::DanglingTree`] if any tree is gone.
pub fn pick_largest_of_three<T, S>(
    a: &Cursor<T>,
    b: &Cursor<T>,
    c: &Cursor<T>,
    order: &S,
) -> Result<Cursor<T>, TreeError>
where
    S: SortOrder<T> + ?Sized,
{
    let first = pick_largest(a, b, order)?;
    pick_largest(&first, c, order)
}
