//! Priority queue with a pluggable, runtime-swappable sort order
//!
//! This crate provides a binary heap stored as an array-mapped complete binary
//! tree, where "highest priority" is whatever an injected [`SortOrder`] says
//! it is rather than a hard-coded `Ord`.
//!
//! # Layers
//!
//! - [`index`]: 1-based complete-tree index arithmetic
//! - [`complete_tree`]: array-backed complete tree with weak, checked cursors
//! - [`sort_order`]: ascending, descending, keyed, reversed and composite orders
//! - [`heap`]: bubble-up / sift-down maintenance and bulk transfer between heaps
//! - [`pqueue`]: the queue front, including re-ranking under a new order
//!
//! # Example
//!
//! ```rust
//! use rust_pqueue::pqueue::PriorityQueue;
//! use rust_pqueue::sort_order::{shared, Composite};
//! use rust_pqueue::SortOrderRef;
//!
//! #[derive(Debug)]
//! struct Job {
//!     urgency: u8,
//!     name: &'static str,
//! }
//!
//! let by_urgency: SortOrderRef<Job> = shared(|a: &Job, b: &Job| a.urgency < b.urgency);
//! let by_name: SortOrderRef<Job> = shared(|a: &Job, b: &Job| a.name > b.name);
//!
//! let mut queue = PriorityQueue::new(shared(Composite::new([by_urgency.clone(), by_name.clone()])));
//! queue.push(Job { urgency: 1, name: "backup" });
//! queue.push(Job { urgency: 3, name: "deploy" });
//! queue.push(Job { urgency: 3, name: "alert" });
//! assert_eq!(queue.peek_front().unwrap().name, "alert");
//!
//! // Name first, urgency as the tie-break
//! queue.change_ordering(shared(Composite::new([by_name, by_urgency]))).unwrap();
//! assert_eq!(queue.peek_front().unwrap().name, "alert");
//! queue.pop_front().unwrap();
//! assert_eq!(queue.peek_front().unwrap().name, "backup");
//! ```

pub mod complete_tree;
pub mod heap;
pub mod index;
pub mod pqueue;
pub mod sort_order;
pub mod traits;

// Re-export the main types for convenience
pub use heap::{reheapify, Heap};
pub use pqueue::PriorityQueue;
pub use traits::{HeapError, SortOrder, SortOrderRef, TreeError};
