//! General-purpose containers over a shared raw-storage core.
//!
//! This crate provides the classic sequential containers built on one
//! allocation kernel. The key insight: separate slot management from
//! container semantics.
//!
//! # Design Philosophy
//!
//! Every contiguous container here is the same three-field shape:
//!
//! ```text
//! RawBuf<T>  - owns capacity: allocates, reallocates, frees raw slots
//! metadata   - len, or (front, rear, count): which slots are live
//! semantics  - push/pop, enqueue/dequeue, sift: how slots change state
//! ```
//!
//! `RawBuf` never constructs or destroys a `T`; it only moves capacity.
//! Each container tracks which of its slots hold live values and is solely
//! responsible for dropping them. One growth policy serves them all:
//! capacity grows by half, from a floor of eight slots, and jumps straight
//! to the requested amount when that is larger.
//!
//! # Containers
//!
//! | Container | Discipline | Backing |
//! |-----------|------------|---------|
//! | [`Array`] | random access, insert/erase | contiguous slots |
//! | [`Queue`] | FIFO | circular buffer |
//! | [`Stack`] | LIFO | contiguous slots |
//! | [`PriorityQueue`] | highest rank first | implicit binary heap |
//! | [`LinkedList`] | splice anywhere, detach nodes | sentinel ring |
//!
//! # Quick Start
//!
//! ```
//! use stowage::{Queue, Stack};
//!
//! let mut jobs: Queue<&str> = Queue::new();
//! jobs.enqueue("parse");
//! jobs.enqueue("check");
//! assert_eq!(jobs.dequeue(), Ok("parse"));
//!
//! let mut undo: Stack<&str> = Stack::new();
//! undo.push("edit");
//! undo.push("save");
//! assert_eq!(undo.pop(), Ok("save"));
//! ```
//!
//! # Error Discipline
//!
//! Two failure families, kept deliberately distinct:
//!
//! - **State errors** are recoverable values. Reading or removing from an
//!   empty container returns `Result` with [`EmptyError`]; checked
//!   indexing returns [`IndexError`] carrying the index and length.
//!   Nothing panics for being empty.
//! - **Resource errors** are not silently absorbed. The infallible
//!   mutators panic on capacity overflow and abort through the global
//!   allocation handler when memory is refused; the `try_reserve` family
//!   surfaces the same conditions as [`TryReserveError`] and leaves the
//!   container untouched.
//!
//! Unchecked accessors (`[index]`, the `*_unchecked` methods) skip the
//! checks entirely and verify their preconditions only in debug builds.
//!
//! # Ownership
//!
//! Containers exclusively own their elements: dropping a container drops
//! each live element exactly once, moving one transfers the allocation and
//! leaves the source empty and reusable, and cloning is deep. The one
//! deliberate exception is [`LinkedList::detach`], which hands a node's
//! ownership to the caller as a [`DetachedNode`] that can be spliced back
//! in without reallocating.

#![warn(missing_docs)]

pub mod array;
pub mod error;
pub mod linked_list;
pub mod priority_queue;
pub mod queue;
pub mod stack;

mod raw;

pub use array::Array;
pub use error::{EmptyError, IndexError, TryReserveError};
pub use linked_list::{DetachedNode, LinkedList, NodeRef};
pub use priority_queue::{Comparator, Max, Min, PriorityQueue};
pub use queue::Queue;
pub use stack::Stack;
