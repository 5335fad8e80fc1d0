//! Growable circular-buffer FIFO.
//!
//! [`Queue`] stores its elements in one allocation indexed modulo capacity:
//! the `count` live elements occupy physical slots `(front + i) % capacity`
//! in logical order. `front == rear` cannot distinguish empty from full, so
//! `count` is tracked explicitly rather than derived.
//!
//! Reallocation straightens the ring: elements move in logical order (the
//! run from `front` to the end of the buffer, then the wrapped run from
//! slot 0 to `rear`), so the new buffer always starts at `front = 0` with
//! `rear = count % capacity`.
//!
//! Comparison is size-first, then element-wise in logical order; two queues
//! with identical logical contents compare equal regardless of where their
//! elements physically sit.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::ptr;
use core::slice;

use crate::error::{EmptyError, TryReserveError};
use crate::raw::{amortized_capacity, RawBuf};

// ============================================================================
// Queue
// ============================================================================

/// A growable first-in, first-out queue over a circular buffer.
///
/// # Example
///
/// ```
/// use stowage::Queue;
///
/// let mut queue = Queue::new();
/// queue.enqueue("a");
/// queue.enqueue("b");
///
/// assert_eq!(queue.dequeue(), Ok("a"));
/// assert_eq!(queue.peek(), Ok(&"b"));
/// ```
pub struct Queue<T> {
    buf: RawBuf<T>,
    front: usize,
    rear: usize,
    count: usize,
}

impl<T> Queue<T> {
    /// Creates an empty queue. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            front: 0,
            rear: 0,
            count: 0,
        }
    }

    /// Creates an empty queue with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::with_capacity(capacity),
            front: 0,
            rear: 0,
            count: 0,
        }
    }

    /// Number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the queue holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of elements the queue can hold without reallocating.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Appends a value at the rear.
    ///
    /// Amortized O(1); grows by the shared policy when full.
    #[inline]
    pub fn enqueue(&mut self, value: T) {
        if self.count == self.buf.capacity() {
            let required = self.count.checked_add(1).expect("capacity overflow");
            self.reallocate(amortized_capacity(self.buf.capacity(), required));
        }
        // Safety: rear is a free slot (count < capacity after the check)
        unsafe { self.buf.slot_ptr(self.rear).write(value) };
        self.rear = (self.rear + 1) % self.buf.capacity();
        self.count += 1;
    }

    /// Removes and returns the front element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the queue is empty.
    #[inline]
    pub fn dequeue(&mut self) -> Result<T, EmptyError> {
        if self.count == 0 {
            return Err(EmptyError);
        }
        // Safety: front is a live slot, now marked dead
        let value = unsafe { self.buf.slot_ptr(self.front).read() };
        self.front = (self.front + 1) % self.buf.capacity();
        self.count -= 1;
        Ok(value)
    }

    /// Returns a reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the queue is empty.
    #[inline]
    pub fn peek(&self) -> Result<&T, EmptyError> {
        if self.count == 0 {
            return Err(EmptyError);
        }
        // Safety: front is a live slot
        Ok(unsafe { &*self.buf.slot_ptr(self.front) })
    }

    /// Returns a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the queue is empty.
    #[inline]
    pub fn peek_mut(&mut self) -> Result<&mut T, EmptyError> {
        if self.count == 0 {
            return Err(EmptyError);
        }
        // Safety: front is a live slot, borrowed through &mut self
        Ok(unsafe { &mut *self.buf.slot_ptr(self.front) })
    }

    /// Returns `true` if any live element equals `value`. O(n) scan in
    /// logical order.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let (first, second) = self.as_slices();
        first.contains(value) || second.contains(value)
    }

    /// The live elements as two slices in logical order.
    ///
    /// The first slice runs from the front towards the end of the buffer;
    /// the second holds the wrapped remainder (empty when the occupied
    /// region is contiguous).
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let cap = self.buf.capacity();
        if cap == 0 {
            return (&[], &[]);
        }
        let first = self.count.min(cap - self.front);
        let second = self.count - first;
        // Safety: the two runs cover exactly the live slots
        unsafe {
            (
                slice::from_raw_parts(self.buf.ptr().add(self.front), first),
                slice::from_raw_parts(self.buf.ptr(), second),
            )
        }
    }

    /// Iterates over the elements in logical FIFO order.
    pub fn iter(&self) -> Iter<'_, T> {
        let (first, second) = self.as_slices();
        Iter {
            first: first.iter(),
            second: second.iter(),
        }
    }

    /// Drops every element. Capacity is retained.
    pub fn clear(&mut self) {
        let cap = self.buf.capacity();
        let front = self.front;
        let count = self.count;
        self.front = 0;
        self.rear = 0;
        self.count = 0;
        if count == 0 {
            return;
        }
        let first = count.min(cap - front);
        let second = count - first;
        // Safety: the two runs were live and are now marked dead; a panic
        // mid-drop leaks the remainder, never double-drops
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr().add(front),
                first,
            ));
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), second));
        }
    }

    /// Ensures room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts if the allocator refuses.
    pub fn reserve(&mut self, additional: usize) {
        if additional > self.buf.capacity() - self.count {
            let required = self
                .count
                .checked_add(additional)
                .expect("capacity overflow");
            self.reallocate(amortized_capacity(self.buf.capacity(), required));
        }
    }

    /// Fallible [`Queue::reserve`]. The queue is unchanged on error.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        if additional > self.buf.capacity() - self.count {
            let required = self
                .count
                .checked_add(additional)
                .ok_or(TryReserveError::CapacityOverflow)?;
            let new_cap = amortized_capacity(self.buf.capacity(), required);
            let new_buf = RawBuf::try_with_capacity(new_cap)?;
            self.move_into(new_buf);
        }
        Ok(())
    }

    /// Shrinks capacity to match the live count, straightening the ring.
    pub fn shrink_to_fit(&mut self) {
        if mem::size_of::<T>() == 0 || self.count == self.buf.capacity() {
            return;
        }
        self.reallocate(self.count);
    }

    fn reallocate(&mut self, new_cap: usize) {
        self.move_into(RawBuf::with_capacity(new_cap));
    }

    /// Moves the live elements into `new_buf` in logical order: the run
    /// from `front` to the buffer end, then the wrapped run up to `rear`.
    /// Afterwards `front = 0` and `rear = count % new capacity`.
    fn move_into(&mut self, new_buf: RawBuf<T>) {
        let new_cap = new_buf.capacity();
        debug_assert!(new_cap >= self.count);
        let cap = self.buf.capacity();
        let first = if cap == 0 {
            0
        } else {
            self.count.min(cap - self.front)
        };
        let second = self.count - first;
        // Safety: both runs are live; the destination is fresh and disjoint.
        // Bitwise moves cannot fail, so the swap below is all-or-nothing.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.ptr().add(self.front), new_buf.ptr(), first);
            ptr::copy_nonoverlapping(self.buf.ptr(), new_buf.ptr().add(first), second);
        }
        self.buf = new_buf;
        self.front = 0;
        self.rear = if new_cap == 0 { 0 } else { self.count % new_cap };
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for Queue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Queue<T> {
    /// Deep copy in logical order. The clone is compact: `front` starts at
    /// slot 0 and capacity matches the live count.
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.count);
        for value in self.iter() {
            out.enqueue(value.clone());
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Queue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Queue<T> {}

impl<T: PartialOrd> PartialOrd for Queue<T> {
    /// Size-first: a shorter queue orders before a longer one regardless of
    /// contents; equal sizes compare element-wise in logical order.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.count.cmp(&other.count) {
            Ordering::Equal => self.iter().partial_cmp(other.iter()),
            ord => Some(ord),
        }
    }
}

impl<T: Ord> Ord for Queue<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| self.iter().cmp(other.iter()))
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        self.reserve(low);
        for value in iter {
            self.enqueue(value);
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the queue, yielding elements in FIFO order.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { queue: self }
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Borrowing iterator over a [`Queue`] in logical FIFO order.
pub struct Iter<'a, T> {
    first: slice::Iter<'a, T>,
    second: slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.first.next().or_else(|| self.second.next())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.first.len() + self.second.len();
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.second.next_back().or_else(|| self.first.next_back())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator that drains a [`Queue`] in FIFO order.
pub struct IntoIter<T> {
    queue: Queue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.queue.dequeue().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.count, Some(self.queue.count))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

// ============================================================================
// Tests
// ============================================================================
