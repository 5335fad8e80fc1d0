//! Binary max-heap with a pluggable ordering.
//!
//! [`PriorityQueue`] keeps its elements in an [`Array`] arranged as an
//! implicit binary heap: the children of slot `i` live at `2i + 1` and
//! `2i + 2`, and no element outranks its parent. Which element "outranks"
//! another is decided by a [`Comparator`]: `below(a, b)` answers whether
//! `a` must sit below `b`, so the default [`Max`] surfaces the largest
//! value first and [`Min`] the smallest. Any `Fn(&T, &T) -> bool` strict
//! ordering can serve as the comparator directly.
//!
//! Push and pop are O(log n). Building from an iterator uses bottom-up
//! heapify, which is O(n) rather than the O(n log n) of repeated pushes.

use core::fmt;
use core::slice;

use crate::array::{self, Array};
use crate::error::{EmptyError, TryReserveError};

// ============================================================================
// Comparator
// ============================================================================

/// Heap-ordering predicate.
///
/// `below(a, b)` returns `true` when `a` must sit below `b` in the heap,
/// i.e. `b` outranks `a` and surfaces first.
pub trait Comparator<T> {
    /// Returns `true` when `a` is outranked by `b`.
    fn below(&self, a: &T, b: &T) -> bool;
}

impl<T, F: Fn(&T, &T) -> bool> Comparator<T> for F {
    #[inline]
    fn below(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Orders [`Ord`] values so the largest sits at the root. The default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Max;

impl<T: Ord> Comparator<T> for Max {
    #[inline]
    fn below(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Orders [`Ord`] values so the smallest sits at the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Min;

impl<T: Ord> Comparator<T> for Min {
    #[inline]
    fn below(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

// ============================================================================
// PriorityQueue
// ============================================================================

/// A growable priority queue over an implicit binary heap.
///
/// # Example
///
/// ```
/// use stowage::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.push(5);
/// queue.push(1);
/// queue.push(3);
///
/// assert_eq!(queue.peek(), Ok(&5));
/// assert_eq!(queue.pop(), Ok(5));
/// assert_eq!(queue.peek(), Ok(&3));
/// ```
pub struct PriorityQueue<T, C = Max> {
    data: Array<T>,
    cmp: C,
}

impl<T: Ord> PriorityQueue<T, Max> {
    /// Creates an empty max-first queue. Does not allocate.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: Array::new(),
            cmp: Max,
        }
    }

    /// Creates an empty max-first queue with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Array::with_capacity(capacity),
            cmp: Max,
        }
    }
}

impl<T, C: Comparator<T>> PriorityQueue<T, C> {
    /// Creates an empty queue ordered by `cmp`.
    ///
    /// # Example
    ///
    /// ```
    /// use stowage::PriorityQueue;
    ///
    /// // Longest word outranks the rest.
    /// let mut queue = PriorityQueue::with_comparator(|a: &&str, b: &&str| a.len() < b.len());
    /// queue.push("short");
    /// queue.push("lengthier");
    /// assert_eq!(queue.peek(), Ok(&"lengthier"));
    /// ```
    #[inline]
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            data: Array::new(),
            cmp,
        }
    }

    /// Creates an empty queue ordered by `cmp` with room for `capacity`
    /// elements.
    #[inline]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            data: Array::with_capacity(capacity),
            cmp,
        }
    }

    /// Heap-orders the elements of `array` under `cmp` in O(n).
    pub fn from_array_with(array: Array<T>, cmp: C) -> Self {
        let mut queue = Self { data: array, cmp };
        queue.heapify();
        queue
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the queue holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of elements the queue can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Adds a value, sifting it up to its rank. O(log n).
    pub fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    /// Removes and returns the top-ranked element.
    ///
    /// The root swaps with the last slot, the array shrinks by one, and the
    /// displaced element sifts down to restore heap order. O(log n).
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the queue is empty.
    pub fn pop(&mut self) -> Result<T, EmptyError> {
        if self.data.is_empty() {
            return Err(EmptyError);
        }
        let last = self.data.len() - 1;
        self.data.as_mut_slice().swap(0, last);
        // Safety: the array is non-empty
        let value = unsafe { self.data.pop_unchecked() };
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Ok(value)
    }

    /// Returns a reference to the top-ranked element.
    ///
    /// Only shared access is offered: editing the root in place could
    /// silently break heap order.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the queue is empty.
    #[inline]
    pub fn peek(&self) -> Result<&T, EmptyError> {
        self.data.front().ok_or(EmptyError)
    }

    /// Returns `true` if any element equals `value`. O(n) scan.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.data.contains(value)
    }

    /// The underlying storage in heap order. Only the first element's rank
    /// is meaningful.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Iterates over the elements in heap order, not rank order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Drops every element. Capacity is retained.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Ensures room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts if the allocator refuses.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Fallible [`PriorityQueue::reserve`]. The queue is unchanged on
    /// error.
    #[inline]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.data.try_reserve(additional)
    }

    /// Shrinks capacity to match the live count.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    /// Unwraps the backing array, still in heap order.
    #[inline]
    pub fn into_array(self) -> Array<T> {
        self.data
    }

    /// Consumes the queue into an array sorted in rank order, lowest rank
    /// first. In-place heapsort, O(n log n).
    pub fn into_sorted_array(mut self) -> Array<T> {
        let mut end = self.data.len();
        while end > 1 {
            end -= 1;
            self.data.as_mut_slice().swap(0, end);
            self.sift_down_bounded(0, end);
        }
        self.data
    }

    /// Restores heap order over the whole array, bottom-up from the last
    /// parent. Leaves are already heaps, so the work sums to O(n).
    fn heapify(&mut self) {
        let len = self.data.len();
        let mut index = len / 2;
        while index > 0 {
            index -= 1;
            self.sift_down(index);
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        let slice = self.data.as_mut_slice();
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.cmp.below(&slice[parent], &slice[index]) {
                break;
            }
            slice.swap(parent, index);
            index = parent;
        }
    }

    #[inline]
    fn sift_down(&mut self, index: usize) {
        self.sift_down_bounded(index, self.data.len());
    }

    /// Sinks `index` within the first `len` slots, swapping with its
    /// higher-ranked child until neither child outranks it.
    fn sift_down_bounded(&mut self, mut index: usize, len: usize) {
        let slice = self.data.as_mut_slice();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && self.cmp.below(&slice[left], &slice[right]) {
                child = right;
            }
            if !self.cmp.below(&slice[index], &slice[child]) {
                break;
            }
            slice.swap(index, child);
            index = child;
        }
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<T, C: Comparator<T> + Default> Default for PriorityQueue<T, C> {
    #[inline]
    fn default() -> Self {
        Self {
            data: Array::new(),
            cmp: C::default(),
        }
    }
}

impl<T: Clone, C: Clone> Clone for PriorityQueue<T, C> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T, C: Comparator<T>> Extend<T> for PriorityQueue<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        self.data.reserve(low);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for PriorityQueue<T, C> {
    /// Collects the elements and heap-orders them in one O(n) pass.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_array_with(iter.into_iter().collect(), C::default())
    }
}

impl<'a, T, C> IntoIterator for &'a PriorityQueue<T, C> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T, C> IntoIterator for PriorityQueue<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the queue, yielding elements in heap order, not rank
    /// order.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.data.into_iter(),
        }
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Owning iterator over a [`PriorityQueue`] in heap order.
pub struct IntoIter<T> {
    inner: array::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let queue: PriorityQueue<i32> = PriorityQueue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), Err(EmptyError));
    }

    #[test]
    fn peek_tracks_the_maximum() {
        let mut queue = PriorityQueue::new();
        queue.push(5);
        queue.push(1);
        queue.push(3);
        assert_eq!(queue.peek(), Ok(&5));
        assert_eq!(queue.pop(), Ok(5));
        assert_eq!(queue.peek(), Ok(&3));
    }

    #[test]
    fn pop_on_empty_errors() {
        let mut queue: PriorityQueue<u8> = PriorityQueue::new();
        assert_eq!(queue.pop(), Err(EmptyError));
        queue.push(1);
        assert_eq!(queue.pop(), Ok(1));
        assert_eq!(queue.pop(), Err(EmptyError));
    }

    #[test]
    fn drain_is_sorted_by_rank() {
        let mut queue = PriorityQueue::new();
        for i in 0..200 {
            queue.push((i * 7 + 13) % 1000);
        }
        let mut previous = queue.pop().unwrap();
        while let Ok(value) = queue.pop() {
            assert!(value <= previous);
            previous = value;
        }
    }

    #[test]
    fn min_comparator_surfaces_smallest() {
        let mut queue = PriorityQueue::with_comparator(Min);
        for value in [4, 2, 9, 1, 7] {
            queue.push(value);
        }
        assert_eq!(queue.pop(), Ok(1));
        assert_eq!(queue.pop(), Ok(2));
        assert_eq!(queue.peek(), Ok(&4));
    }

    #[test]
    fn closure_comparator_orders_by_weight() {
        let mut queue = PriorityQueue::with_comparator(|a: &(u32, &str), b: &(u32, &str)| {
            a.0 < b.0
        });
        queue.push((2, "mid"));
        queue.push((9, "high"));
        queue.push((1, "low"));
        assert_eq!(queue.pop(), Ok((9, "high")));
        assert_eq!(queue.pop(), Ok((2, "mid")));
        assert_eq!(queue.pop(), Ok((1, "low")));
    }

    #[test]
    fn collect_heapifies_in_one_pass() {
        let queue: PriorityQueue<i32> = [3, 14, 1, 59, 26, 5, 35].into_iter().collect();
        assert_eq!(queue.len(), 7);
        assert_eq!(queue.peek(), Ok(&59));

        let sorted: Vec<i32> = queue.into_sorted_array().into_iter().collect();
        assert_eq!(sorted, vec![1, 3, 5, 14, 26, 35, 59]);
    }

    #[test]
    fn from_array_with_orders_existing_elements() {
        let array: Array<i32> = [10, 40, 30, 20].into_iter().collect();
        let mut queue = PriorityQueue::from_array_with(array, Max);
        assert_eq!(queue.pop(), Ok(40));
        assert_eq!(queue.pop(), Ok(30));
    }

    #[test]
    fn contains_scans_the_whole_heap() {
        let queue: PriorityQueue<i32> = (0..50).collect();
        assert!(queue.contains(&0));
        assert!(queue.contains(&49));
        assert!(!queue.contains(&50));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut queue: PriorityQueue<i32> = (0..20).collect();
        let cap = queue.capacity();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), cap);
    }

    #[test]
    fn reserve_and_shrink_delegate_to_storage() {
        let mut queue: PriorityQueue<i32> = PriorityQueue::new();
        queue.reserve(20);
        assert!(queue.capacity() >= 20);
        queue.push(1);
        queue.shrink_to_fit();
        assert_eq!(queue.capacity(), 1);
        assert!(queue.try_reserve(usize::MAX).is_err());
    }

    #[test]
    fn clone_is_independent() {
        let original: PriorityQueue<i32> = [5, 2, 8].into_iter().collect();
        let mut copy = original.clone();
        assert_eq!(copy.pop(), Ok(8));
        assert_eq!(original.peek(), Ok(&8));
        assert_eq!(original.len(), 3);
    }

    #[test]
    fn into_array_preserves_heap_shape() {
        let queue: PriorityQueue<i32> = [1, 9, 5].into_iter().collect();
        let array = queue.into_array();
        assert_eq!(array.len(), 3);
        // root outranks both children
        assert!(array[0] >= array[1]);
        assert!(array[0] >= array[2]);
    }

    #[test]
    fn stress_against_std_heap() {
        use std::collections::BinaryHeap;

        let mut queue = PriorityQueue::new();
        let mut model = BinaryHeap::new();
        for i in 0..2000usize {
            let value = (i * 7 + 13) % 100;
            if i % 3 != 2 {
                queue.push(value);
                model.push(value);
            } else {
                assert_eq!(queue.pop().ok(), model.pop());
            }
            assert_eq!(queue.len(), model.len());
        }
        while let Some(expected) = model.pop() {
            assert_eq!(queue.pop(), Ok(expected));
        }
        assert!(queue.is_empty());
    }
}
