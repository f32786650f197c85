//! Ready-made sort orders
//!
//! | Order | `less_than(a, b)` | Heap top |
//! |-------|-------------------|----------|
//! | [`Ascending`] | `a < b` | largest element |
//! | [`Descending`] | `a > b` | smallest element |
//! | [`ByKey`] | `key(a) < key(b)` | element with the largest key |
//! | [`Reversed`] | `inner(b, a)` | the inner order's bottom |
//! | [`Composite`] | first criterion that tells `a` and `b` apart | lexicographic maximum |
//!
//! # Example
//!
//! ```rust
//! use rust_pqueue::sort_order::{shared, Composite, ByKey};
//! use rust_pqueue::SortOrder;
//!
//! // Order (len, value) pairs by length, then by value
//! let by_len = shared(ByKey::new(|s: &String| s.len()));
//! let by_text = shared(ByKey::new(|s: &String| s.clone()));
//! let order = Composite::new([by_len, by_text]);
//!
//! assert!(order.less_than(&"zz".to_string(), &"aaa".to_string()));
//! assert!(order.less_than(&"aa".to_string(), &"ab".to_string()));
//! assert!(order.equivalent(&"ab".to_string(), &"ab".to_string()));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::traits::{SortOrder, SortOrderRef};

/// Wraps a sort order in a shared handle
pub fn shared<T, S>(order: S) -> SortOrderRef<T>
where
    S: SortOrder<T> + 'static,
{
    Rc::new(order)
}

/// Natural `<` ordering: the largest element sits on top of the heap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ascending;

impl<T: PartialOrd + ?Sized> SortOrder<T> for Ascending {
    #[inline]
    fn less_than(&self, lhs: &T, rhs: &T) -> bool {
        lhs < rhs
    }
}

/// Natural `>` ordering: the smallest element sits on top of the heap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Descending;

impl<T: PartialOrd + ?Sized> SortOrder<T> for Descending {
    #[inline]
    fn less_than(&self, lhs: &T, rhs: &T) -> bool {
        lhs > rhs
    }
}

/// Orders elements by a projected key
pub struct ByKey<F, K> {
    key: F,
    _key: PhantomData<fn() -> K>,
}

impl<F, K> ByKey<F, K> {
    /// Creates an order comparing `key(a) < key(b)`
    pub fn new<T>(key: F) -> Self
    where
        F: Fn(&T) -> K,
    {
        Self {
            key,
            _key: PhantomData,
        }
    }
}

impl<T, F, K> SortOrder<T> for ByKey<F, K>
where
    F: Fn(&T) -> K,
    K: PartialOrd,
{
    fn less_than(&self, lhs: &T, rhs: &T) -> bool {
        (self.key)(lhs) < (self.key)(rhs)
    }
}

impl<F, K> fmt::Debug for ByKey<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByKey").finish_non_exhaustive()
    }
}

/// Flips another order around
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<S>(pub S);

impl<T: ?Sized, S: SortOrder<T>> SortOrder<T> for Reversed<S> {
    #[inline]
    fn less_than(&self, lhs: &T, rhs: &T) -> bool {
        self.0.less_than(rhs, lhs)
    }
}

/// Lexicographic combination of several criteria
///
/// Criteria are consulted in order. The first one that considers `a` less
/// than `b` makes the composite answer `true`; the first one that considers
/// `b` less than `a` makes it answer `false`. A criterion that ties passes the
/// decision on to the next. If every criterion ties, `a` and `b` are
/// equivalent and `less_than` is false in both directions.
///
/// An empty composite considers every pair equivalent.
pub struct Composite<T> {
    criteria: SmallVec<[SortOrderRef<T>; 4]>,
}

impl<T> Composite<T> {
    /// Builds a composite from criteria listed most significant first
    pub fn new<I>(criteria: I) -> Self
    where
        I: IntoIterator<Item = SortOrderRef<T>>,
    {
        Self {
            criteria: criteria.into_iter().collect(),
        }
    }

    /// Appends a criterion that is consulted after all existing ones
    pub fn then(mut self, criterion: SortOrderRef<T>) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Number of criteria
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// True if the composite has no criteria
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl<T> SortOrder<T> for Composite<T> {
    fn less_than(&self, lhs: &T, rhs: &T) -> bool {
        for criterion in &self.criteria {
            if criterion.less_than(lhs, rhs) {
                return true;
            }
            if criterion.less_than(rhs, lhs) {
                return false;
            }
        }
        false
    }
}

impl<T> Clone for Composite<T> {
    fn clone(&self) -> Self {
        Self {
            criteria: self.criteria.clone(),
        }
    }
}

impl<T> fmt::Debug for Composite<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("criteria", &self.criteria.len())
            .finish()
    }
}

impl<T> FromIterator<SortOrderRef<T>> for Composite<T> {
    fn from_iter<I: IntoIterator<Item = SortOrderRef<T>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        a: u32,
        b: f64,
        c: &'static str,
    }

    fn rec(a: u32, b: f64, c: &'static str) -> Record {
        Record { a, b, c }
    }

    fn by_a() -> SortOrderRef<Record> {
        shared(|l: &Record, r: &Record| l.a < r.a)
    }

    fn by_b() -> SortOrderRef<Record> {
        shared(|l: &Record, r: &Record| l.b < r.b)
    }

    fn by_c() -> SortOrderRef<Record> {
        shared(|l: &Record, r: &Record| l.c < r.c)
    }

    #[test]
    fn test_ascending_and_descending() {
        assert!(Ascending.less_than(&1, &2));
        assert!(!Ascending.less_than(&2, &2));
        assert!(Descending.less_than(&2, &1));
        assert!(!Descending.less_than(&1, &1));
        assert!(Ascending.less_than("abc", "abd"));
    }

    #[test]
    fn test_reversed_flips_arguments() {
        let order = Reversed(Ascending);
        assert!(order.less_than(&5, &3));
        assert!(!order.less_than(&3, &5));
        assert!(order.equivalent(&4, &4));
    }

    #[test]
    fn test_by_key() {
        let order = ByKey::new(|s: &&str| s.len());
        assert!(order.less_than(&"a", &"bb"));
        assert!(order.equivalent(&"aa", &"bb"));
    }

    #[test]
    fn test_composite_first_differentiating_criterion_decides() {
        let order = Composite::new([by_c(), by_a(), by_b()]);

        // C decides
        assert!(order.less_than(&rec(9, 9.0, "Hello"), &rec(1, 1.0, "ZZZZZ")));
        assert!(!order.less_than(&rec(1, 1.0, "ZZZZZ"), &rec(9, 9.0, "Hello")));

        // C ties, A decides
        assert!(order.less_than(&rec(1, 9.0, "ZZZZZ"), &rec(5, 2.0, "ZZZZZ")));

        // C and A tie, B decides
        assert!(order.less_than(&rec(1, 2.0, "Hello"), &rec(1, 3.0, "Hello")));
    }

    #[test]
    fn test_composite_full_tie_is_equivalent() {
        let order = Composite::new([by_a(), by_b(), by_c()]);
        let x = rec(1, 2.0, "x");
        let y = rec(1, 2.0, "x");
        assert!(!order.less_than(&x, &y));
        assert!(!order.less_than(&y, &x));
        assert!(order.equivalent(&x, &y));
    }

    #[test]
    fn test_empty_composite_ties_everything() {
        let order: Composite<i32> = Composite::new([]);
        assert!(order.is_empty());
        assert!(order.equivalent(&1, &100));
    }

    #[test]
    fn test_composite_builder_and_shared_criteria() {
        let a = by_a();
        let first = Composite::new([a.clone()]).then(by_b());
        let second: Composite<Record> = [by_b(), a].into_iter().collect();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);

        let x = rec(1, 5.0, "");
        let y = rec(2, 1.0, "");
        assert!(first.less_than(&x, &y));
        assert!(second.less_than(&y, &x));
    }
}
