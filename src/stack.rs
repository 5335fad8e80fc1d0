//! Growable LIFO buffer.
//!
//! [`Stack`] mutates at one end only: `push` appends at the top, `pop`
//! removes the top, and nothing ever shifts interior elements. It shares the
//! contiguous storage kernel and growth policy with the other buffer-backed
//! containers, so pushes are amortized O(1) with the strong all-or-nothing
//! guarantee on reallocation.
//!
//! Draining an empty stack is a checked, reported condition here (`pop` and
//! `peek` return [`EmptyError`]), unlike the array's precondition-based
//! accessors.

use core::fmt;
use core::iter::FusedIterator;
use core::mem::ManuallyDrop;
use core::ptr;
use core::slice;

use crate::error::{EmptyError, TryReserveError};
use crate::raw::RawBuf;

// ============================================================================
// Stack
// ============================================================================

/// A growable last-in, first-out buffer.
///
/// # Example
///
/// ```
/// use stowage::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(1);
/// stack.push(2);
/// stack.push(3);
///
/// assert_eq!(stack.pop(), Ok(3));
/// assert_eq!(stack.peek(), Ok(&2));
/// assert_eq!(stack.len(), 2);
/// ```
pub struct Stack<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> Stack<T> {
    /// Creates an empty stack. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Creates an empty stack with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::with_capacity(capacity),
            len: 0,
        }
    }

    /// Number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the stack holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the stack can hold without reallocating.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Pushes a value on top of the stack.
    ///
    /// Amortized O(1); grows by the shared policy when full.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.buf.reserve(self.len, 1);
        // Safety: reserve guaranteed a free slot at index len
        unsafe { self.buf.slot_ptr(self.len).write(value) };
        self.len += 1;
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Result<T, EmptyError> {
        if self.len == 0 {
            return Err(EmptyError);
        }
        self.len -= 1;
        // Safety: the slot held the top element and is now marked dead
        Ok(unsafe { self.buf.slot_ptr(self.len).read() })
    }

    /// Returns a reference to the top element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the stack is empty.
    #[inline]
    pub fn peek(&self) -> Result<&T, EmptyError> {
        if self.len == 0 {
            return Err(EmptyError);
        }
        // Safety: len - 1 is a live slot
        Ok(unsafe { &*self.buf.slot_ptr(self.len - 1) })
    }

    /// Returns a mutable reference to the top element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the stack is empty.
    #[inline]
    pub fn peek_mut(&mut self) -> Result<&mut T, EmptyError> {
        if self.len == 0 {
            return Err(EmptyError);
        }
        // Safety: len - 1 is a live slot, borrowed through &mut self
        Ok(unsafe { &mut *self.buf.slot_ptr(self.len - 1) })
    }

    /// Returns `true` if any live element equals `value`. O(n) scan.
    #[inline]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(value)
    }

    /// The live elements as a slice, bottom to top.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: the prefix [0, len) is live
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// Iterates over the elements, bottom to top.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Drops every element. Capacity is retained.
    pub fn clear(&mut self) {
        let live = self.len;
        self.len = 0;
        // Safety: the first `live` slots were live and are now marked dead,
        // so a panicking element drop cannot cause a second drop
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), live)) };
    }

    /// Ensures room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts if the allocator refuses.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.buf.reserve(self.len, additional);
    }

    /// Fallible [`Stack::reserve`]. The stack is unchanged on error.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.buf.try_reserve(self.len, additional)
    }

    /// Shrinks capacity to match the live count, releasing the rest.
    pub fn shrink_to_fit(&mut self) {
        self.buf.shrink_to(self.len);
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for Stack<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Stack<T> {
    /// Deep copy. The clone's capacity matches its length, not the
    /// original's capacity.
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.len);
        for value in self.as_slice() {
            out.push(value.clone());
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for Stack<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Stack<T> {}

impl<T: PartialOrd> PartialOrd for Stack<T> {
    /// Lexicographic over bottom-to-top order.
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for Stack<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        self.reserve(low);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Stack<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the stack, yielding elements bottom to top.
    fn into_iter(self) -> IntoIter<T> {
        let me = ManuallyDrop::new(self);
        // Safety: the buffer is moved out exactly once; `me` never drops
        let buf = unsafe { ptr::read(&me.buf) };
        IntoIter {
            buf,
            start: 0,
            end: me.len,
        }
    }
}

// ============================================================================
// IntoIter
// ============================================================================

/// Owning iterator over a [`Stack`], bottom to top.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    start: usize,
    end: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // Safety: start is a live slot, consumed exactly once
        let value = unsafe { self.buf.slot_ptr(self.start).read() };
        self.start += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // Safety: end is a live slot, consumed exactly once
        Some(unsafe { self.buf.slot_ptr(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let start = self.start;
        let live = self.end - start;
        self.start = self.end;
        // Safety: the remaining range holds elements not yet yielded
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr().add(start),
                live,
            ));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn new_is_empty() {
        let stack: Stack<i32> = Stack::new();
        assert_eq!(stack.len(), 0);
        assert!(stack.is_empty());
        assert_eq!(stack.capacity(), 0);
    }

    #[test]
    fn pop_removes_newest() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.peek(), Ok(&2));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn pop_and_peek_on_empty_error() {
        let mut stack: Stack<u8> = Stack::new();
        assert_eq!(stack.pop(), Err(EmptyError));
        assert_eq!(stack.peek(), Err(EmptyError));
        assert_eq!(stack.peek_mut(), Err(EmptyError));
    }

    #[test]
    fn peek_mut_edits_top() {
        let mut stack = Stack::new();
        stack.push(10);
        *stack.peek_mut().unwrap() = 42;
        assert_eq!(stack.pop(), Ok(42));
    }

    #[test]
    fn lifo_order_across_growth() {
        let mut stack = Stack::new();
        for i in 0..100 {
            stack.push(i);
        }
        assert!(stack.capacity() >= 100);
        for i in (0..100).rev() {
            assert_eq!(stack.pop(), Ok(i));
        }
        assert!(stack.is_empty());
    }

    #[test]
    fn push_without_growth_keeps_capacity() {
        let mut stack = Stack::with_capacity(4);
        stack.push(1);
        stack.push(2);
        assert_eq!(stack.capacity(), 4);
    }

    #[test]
    fn contains_scans_all_live() {
        let stack: Stack<i32> = (0..10).collect();
        assert!(stack.contains(&0));
        assert!(stack.contains(&9));
        assert!(!stack.contains(&10));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut stack: Stack<i32> = (0..20).collect();
        let cap = stack.capacity();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.capacity(), cap);
    }

    #[test]
    fn shrink_to_fit_tightens() {
        let mut stack: Stack<i32> = (0..20).collect();
        stack.pop().unwrap();
        stack.pop().unwrap();
        stack.shrink_to_fit();
        assert_eq!(stack.capacity(), 18);
        assert_eq!(stack.pop(), Ok(17));
    }

    #[test]
    fn clone_is_deep_and_exact() {
        let mut original: Stack<i32> = (0..10).collect();
        let mut copy = original.clone();
        assert_eq!(copy.capacity(), 10);
        assert_eq!(original, copy);

        copy.push(99);
        assert_ne!(original, copy);
        original.pop().unwrap();
        assert_eq!(copy.len(), 11);
    }

    #[test]
    fn move_leaves_source_reusable() {
        let mut source: Stack<i32> = (0..5).collect();
        let moved = core::mem::take(&mut source);
        assert_eq!(moved.len(), 5);
        assert!(source.is_empty());
        assert_eq!(source.capacity(), 0);
        source.push(1);
        assert_eq!(source.peek(), Ok(&1));
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a: Stack<i32> = [1, 2, 3].into_iter().collect();
        let b: Stack<i32> = [1, 2, 4].into_iter().collect();
        let c: Stack<i32> = [1, 2].into_iter().collect();
        assert!(a < b);
        assert!(c < a);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn into_iter_yields_bottom_to_top() {
        let stack: Stack<i32> = (0..5).collect();
        let collected: Vec<i32> = stack.into_iter().collect();
        assert_eq!(collected, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn into_iter_back_and_forth() {
        let stack: Stack<i32> = (0..4).collect();
        let mut iter = stack.into_iter();
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(2));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn drop_destroys_each_element_once() {
        static DROPS: AtomicUsize = AtomicUsize::new(0);
        struct Counted;
        impl Drop for Counted {
            fn drop(&mut self) {
                DROPS.fetch_add(1, Ordering::SeqCst);
            }
        }

        let mut stack = Stack::new();
        for _ in 0..10 {
            stack.push(Counted);
        }
        drop(stack.pop());
        assert_eq!(DROPS.load(Ordering::SeqCst), 1);
        drop(stack);
        assert_eq!(DROPS.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn into_iter_drops_unconsumed() {
        static DROPS: AtomicUsize = AtomicUsize::new(0);
        struct Counted;
        impl Drop for Counted {
            fn drop(&mut self) {
                DROPS.fetch_add(1, Ordering::SeqCst);
            }
        }

        let mut stack = Stack::new();
        for _ in 0..8 {
            stack.push(Counted);
        }
        let mut iter = stack.into_iter();
        drop(iter.next());
        drop(iter.next());
        drop(iter);
        assert_eq!(DROPS.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn zst_elements_track_count_only() {
        let mut stack = Stack::new();
        for _ in 0..100 {
            stack.push(());
        }
        assert_eq!(stack.len(), 100);
        assert_eq!(stack.capacity(), usize::MAX);
        assert_eq!(stack.pop(), Ok(()));
        assert_eq!(stack.len(), 99);
    }

    #[test]
    fn stress_interleaved_push_pop() {
        let mut stack = Stack::new();
        let mut model = Vec::new();
        for i in 0..1000usize {
            let value = (i * 7 + 13) % 1000;
            stack.push(value);
            model.push(value);
            if i % 3 == 0 {
                assert_eq!(stack.pop().ok(), model.pop());
            }
        }
        while let Ok(value) = stack.pop() {
            assert_eq!(Some(value), model.pop());
        }
        assert!(model.is_empty());
    }
}
