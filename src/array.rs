//! Growable contiguous array.
//!
//! [`Array`] keeps its live elements in the prefix `[0, len)` of one
//! allocation and grows by the shared amortized policy. It dereferences to a
//! slice, so the whole read surface of `[T]` (indexing, iteration, searching,
//! splitting) comes for free; the inherent methods cover mutation and the
//! checked/unchecked access split.
//!
//! # Access disciplines
//!
//! Three deliberate tiers, preserved per operation rather than unified:
//!
//! | Tier | Operations | Misuse outcome |
//! |---|---|---|
//! | checked, reported | [`Array::at`], [`Array::at_mut`], [`Array::insert`], [`Array::remove`], [`Array::erase`] | `Err(IndexError)` |
//! | checked, quiet | [`Array::front`], [`Array::back`], [`Array::pop`], slice `get` | `None` |
//! | unchecked | [`Array::pop_unchecked`], [`Array::front_unchecked`], [`Array::back_unchecked`], slice `get_unchecked` | debug assert, undefined in release |

use core::fmt;
use core::iter::FusedIterator;
use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use crate::error::{IndexError, TryReserveError};
use crate::raw::RawBuf;

// ============================================================================
// Array
// ============================================================================

/// A growable contiguous sequence.
///
/// # Example
///
/// ```
/// use stowage::Array;
///
/// let mut array = Array::new();
/// array.push(1);
/// array.push(2);
/// array.push(3);
///
/// assert_eq!(array.at(0), Ok(&1));
/// assert_eq!(array[2], 3);
///
/// array.insert(1, 9).unwrap();
/// assert_eq!(array.as_slice(), &[1, 9, 2, 3]);
/// ```
pub struct Array<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> Array<T> {
    /// Creates an empty array. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Creates an empty array with room for `capacity` elements.
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

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the array can hold without reallocating.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    /// Returns a reference to the element at `index`, bounds-checked.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `index >= len`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, IndexError> {
        if index >= self.len {
            return Err(IndexError::new(index, self.len));
        }
        // Safety: index < len
        Ok(unsafe { &*self.buf.slot_ptr(index) })
    }

    /// Returns a mutable reference to the element at `index`, bounds-checked.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `index >= len`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexError> {
        if index >= self.len {
            return Err(IndexError::new(index, self.len));
        }
        // Safety: index < len, borrowed through &mut self
        Ok(unsafe { &mut *self.buf.slot_ptr(index) })
    }

    /// Returns a reference to the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns a mutable reference to the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Returns a reference to the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns a mutable reference to the last element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Returns the first element without checking that it exists.
    ///
    /// # Safety
    ///
    /// The array must be non-empty.
    #[inline]
    pub unsafe fn front_unchecked(&self) -> &T {
        debug_assert!(self.len > 0);
        // Safety: slot 0 is live per the contract
        unsafe { &*self.buf.slot_ptr(0) }
    }

    /// Returns the last element without checking that it exists.
    ///
    /// # Safety
    ///
    /// The array must be non-empty.
    #[inline]
    pub unsafe fn back_unchecked(&self) -> &T {
        debug_assert!(self.len > 0);
        // Safety: slot len - 1 is live per the contract
        unsafe { &*self.buf.slot_ptr(self.len - 1) }
    }

    /// The live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: the prefix [0, len) is live
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: the prefix [0, len) is live, borrowed through &mut self
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Raw pointer to slot 0. Invalidated by any growth.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Raw mutable pointer to slot 0. Invalidated by any growth.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    // ------------------------------------------------------------------
    // Mutation at the end
    // ------------------------------------------------------------------

    /// Appends an element.
    ///
    /// Amortized O(1); grows by the shared policy when full. Without
    /// growth it either succeeds or leaves the array unchanged.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.buf.reserve(self.len, 1);
        // Safety: reserve guaranteed a free slot at index len
        unsafe { self.buf.slot_ptr(self.len).write(value) };
        self.len += 1;
    }

    /// Removes and returns the last element, or `None` if empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // Safety: the slot held the last element, now marked dead
        Some(unsafe { self.buf.slot_ptr(self.len).read() })
    }

    /// Removes and returns the last element without checking that it exists.
    ///
    /// # Safety
    ///
    /// The array must be non-empty.
    #[inline]
    pub unsafe fn pop_unchecked(&mut self) -> T {
        debug_assert!(self.len > 0);
        self.len -= 1;
        // Safety: the slot held the last element per the contract
        unsafe { self.buf.slot_ptr(self.len).read() }
    }

    // ------------------------------------------------------------------
    // Mutation in the middle
    // ------------------------------------------------------------------

    /// Inserts `value` at `index`, shifting the tail right by one slot.
    ///
    /// `index == len` appends. O(n); may grow first. Any growth invalidates
    /// previously obtained pointers.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `index > len`; the array is unchanged.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), IndexError> {
        if index > self.len {
            return Err(IndexError::new(index, self.len));
        }
        self.buf.reserve(self.len, 1);
        // Safety: index <= len < capacity; the shift relocates the tail one
        // slot up before the gap is written
        unsafe {
            let base = self.buf.ptr().add(index);
            ptr::copy(base, base.add(1), self.len - index);
            base.write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    ///
    /// O(n).
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `index >= len`; the array is unchanged.
    pub fn remove(&mut self, index: usize) -> Result<T, IndexError> {
        if index >= self.len {
            return Err(IndexError::new(index, self.len));
        }
        // Safety: index < len; the tail slides down over the vacated slot
        unsafe {
            let base = self.buf.ptr().add(index);
            let value = base.read();
            ptr::copy(base.add(1), base, self.len - index - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Removes `count` elements starting at `index`, shifting the tail left.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the range `[index, index + count)` extends
    /// past the live prefix; the array is unchanged.
    pub fn erase(&mut self, index: usize, count: usize) -> Result<(), IndexError> {
        if index > self.len {
            return Err(IndexError::new(index, self.len));
        }
        if count > self.len - index {
            return Err(IndexError::new(index.saturating_add(count), self.len));
        }
        if count == 0 {
            return Ok(());
        }
        let old_len = self.len;
        let tail = old_len - index - count;
        // The erased range is marked dead before its drops run; a panic
        // mid-drop leaves the tail leaked, never double-dropped.
        self.len = index;
        unsafe {
            let base = self.buf.ptr().add(index);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base, count));
            ptr::copy(base.add(count), base, tail);
        }
        self.len = old_len - count;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Size management
    // ------------------------------------------------------------------

    /// Ensures room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts if the allocator refuses.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.buf.reserve(self.len, additional);
    }

    /// Fallible [`Array::reserve`]. The array is unchanged on error.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.buf.try_reserve(self.len, additional)
    }

    /// Shrinks capacity to match the live count, releasing the rest.
    pub fn shrink_to_fit(&mut self) {
        self.buf.shrink_to(self.len);
    }

    /// Drops elements at `new_len` and beyond. No-op if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let dropped = self.len - new_len;
        self.len = new_len;
        // Safety: slots [new_len, new_len + dropped) were live, now dead
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr().add(new_len),
                dropped,
            ));
        }
    }

    /// Drops every element. Capacity is retained.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes to `new_len`, cloning `value` into each appended slot.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        let additional = new_len - self.len;
        self.reserve(additional);
        for _ in 0..additional {
            self.push(value.clone());
        }
    }

    /// Resizes to `new_len`, filling appended slots from `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        let additional = new_len - self.len;
        self.reserve(additional);
        for _ in 0..additional {
            self.push(f());
        }
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for Array<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Array<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone> Clone for Array<T> {
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

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: PartialEq> PartialEq for Array<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Array<T> {}

impl<T> Extend<T> for Array<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        self.reserve(low);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    fn from(values: [T; N]) -> Self {
        let mut array = Self::with_capacity(N);
        array.extend(values);
        array
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Array<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the array, yielding elements front to back.
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

/// Owning iterator over an [`Array`], front to back.
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
