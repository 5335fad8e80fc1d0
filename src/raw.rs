//! Raw storage kernel shared by the contiguous containers.
//!
//! [`RawBuf`] owns one allocation of uninitialized element slots and nothing
//! else: it allocates, grows, shrinks and frees, but never constructs or
//! destroys elements. Which slots hold live values is the owning container's
//! bookkeeping, so `RawBuf::drop` releases memory only.
//!
//! # Growth policy
//!
//! Every growable container shares one amortized policy, implemented by
//! [`amortized_capacity`]: grow to `max(required, cap + cap / 2)` with a
//! floor of [`GROWTH_FLOOR`] slots for a previously unallocated buffer.
//!
//! # Failure safety
//!
//! Relocation is bitwise (`realloc`, or the owning container's
//! `copy_nonoverlapping` for reordering buffers), so it cannot fail partway:
//! either the allocator refuses before anything is touched, or the move
//! completes unconditionally. The strong all-or-nothing guarantee needs no
//! unwind guard at this layer. Paths that run user code while filling a
//! fresh buffer (element clones) build into an ordinary container instead,
//! and that container's `Drop` cleans up partial state.
//!
//! # Zero-sized types
//!
//! ZST elements never allocate. Capacity reports `usize::MAX` and every
//! grow/shrink request is a no-op; only element counts can overflow, which
//! the reserve paths report as capacity overflow.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use std::alloc::{self, handle_alloc_error};

use crate::error::TryReserveError;

/// Smallest capacity the amortized policy hands out for a previously
/// unallocated buffer.
pub(crate) const GROWTH_FLOOR: usize = 8;

// ============================================================================
// Growth policy
// ============================================================================

/// Maps (current capacity, required minimum) to the next capacity.
///
/// Amortized 1.5x with a floor of [`GROWTH_FLOOR`]; the required minimum
/// wins whenever it is larger than the amortized step.
#[inline]
pub(crate) fn amortized_capacity(current: usize, required: usize) -> usize {
    let grown = if current == 0 {
        GROWTH_FLOOR
    } else {
        // current is bounded by isize::MAX bytes, so this cannot wrap
        current + (current >> 1)
    };
    grown.max(required)
}

fn bail(err: TryReserveError) -> ! {
    match err {
        TryReserveError::CapacityOverflow => panic!("capacity overflow"),
        TryReserveError::AllocFailed { layout } => handle_alloc_error(layout),
    }
}

// ============================================================================
// RawBuf
// ============================================================================

/// One raw allocation of `cap` element slots, all potentially uninitialized.
///
/// The buffer does not track which slots are live; the owning container
/// does. Dropping a `RawBuf` releases the allocation without running any
/// element destructor.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// Safety: RawBuf owns its allocation exclusively and shares no state, so
// crossing threads reduces to moving the (not yet constructed) elements.
unsafe impl<T: Send> Send for RawBuf<T> {}
// Safety: shared access exposes nothing mutable.
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    /// An empty buffer. Does not allocate.
    pub(crate) const fn new() -> Self {
        let cap = if mem::size_of::<T>() == 0 { usize::MAX } else { 0 };
        Self {
            ptr: NonNull::dangling(),
            cap,
            _marker: PhantomData,
        }
    }

    /// A buffer with room for exactly `cap` elements.
    ///
    /// # Panics
    ///
    /// Panics if the total size overflows; aborts via
    /// [`handle_alloc_error`] if the allocator refuses.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        match Self::try_with_capacity(cap) {
            Ok(buf) => buf,
            Err(err) => bail(err),
        }
    }

    /// Fallible [`RawBuf::with_capacity`].
    pub(crate) fn try_with_capacity(cap: usize) -> Result<Self, TryReserveError> {
        let mut buf = Self::new();
        if cap > 0 && mem::size_of::<T>() != 0 {
            buf.grow_to(cap)?;
        }
        Ok(buf)
    }

    /// Number of slots. `usize::MAX` for ZST elements.
    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    /// Base pointer to slot 0. Dangling (but aligned) when unallocated.
    #[inline(always)]
    pub(crate) const fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index` must be less than capacity.
    #[inline(always)]
    pub(crate) unsafe fn slot_ptr(&self, index: usize) -> *mut T {
        debug_assert!(index < self.cap);
        // Safety: index is within the allocation per the contract
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Ensures room for `len + additional` elements, growing amortized.
    ///
    /// The prefix `[0, len)` keeps its contents bitwise intact across the
    /// reallocation.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts via [`handle_alloc_error`] if
    /// the allocator refuses.
    #[inline]
    pub(crate) fn reserve(&mut self, len: usize, additional: usize) {
        if additional > self.cap - len {
            if let Err(err) = self.grow_amortized(len, additional) {
                bail(err);
            }
        }
    }

    /// Fallible [`RawBuf::reserve`]. The buffer is unchanged on error.
    pub(crate) fn try_reserve(
        &mut self,
        len: usize,
        additional: usize,
    ) -> Result<(), TryReserveError> {
        if additional > self.cap - len {
            self.grow_amortized(len, additional)?;
        }
        Ok(())
    }

    fn grow_amortized(&mut self, len: usize, additional: usize) -> Result<(), TryReserveError> {
        let required = len
            .checked_add(additional)
            .ok_or(TryReserveError::CapacityOverflow)?;
        self.grow_to(amortized_capacity(self.cap, required))
    }

    /// Reallocates to exactly `new_cap` slots, `new_cap > cap`.
    fn grow_to(&mut self, new_cap: usize) -> Result<(), TryReserveError> {
        debug_assert!(mem::size_of::<T>() != 0);
        debug_assert!(new_cap > self.cap);
        let new_layout =
            Layout::array::<T>(new_cap).map_err(|_| TryReserveError::CapacityOverflow)?;
        let raw = if self.cap == 0 {
            // Safety: new_layout has non-zero size (new_cap > 0, T is sized)
            unsafe { alloc::alloc(new_layout) }
        } else {
            // Safety: ptr was allocated with current_layout and the new size
            // passed the Layout::array validation above
            unsafe {
                alloc::realloc(
                    self.ptr.as_ptr().cast(),
                    self.current_layout(),
                    new_layout.size(),
                )
            }
        };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            return Err(TryReserveError::AllocFailed { layout: new_layout });
        };
        self.ptr = ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// Shrinks the allocation to exactly `new_cap` slots, releasing it
    /// entirely at zero.
    ///
    /// Callers guarantee every live slot sits below `new_cap`. No-op for
    /// ZSTs; aborts if the allocator refuses to carve the smaller block.
    pub(crate) fn shrink_to(&mut self, new_cap: usize) {
        if mem::size_of::<T>() == 0 || new_cap == self.cap {
            return;
        }
        debug_assert!(new_cap < self.cap);
        if new_cap == 0 {
            // Safety: cap > 0, so a live allocation exists
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), self.current_layout()) };
            self.ptr = NonNull::dangling();
            self.cap = 0;
            return;
        }
        let new_layout = self.layout_for(new_cap);
        // Safety: ptr was allocated with current_layout; the new size is
        // smaller and non-zero
        let raw = unsafe {
            alloc::realloc(
                self.ptr.as_ptr().cast(),
                self.current_layout(),
                new_layout.size(),
            )
        };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            handle_alloc_error(new_layout);
        };
        self.ptr = ptr;
        self.cap = new_cap;
    }

    /// Layout for `cap` slots of `T`.
    ///
    /// Only called with capacities at or below one already validated by
    /// `Layout::array`, so the size arithmetic cannot overflow.
    fn layout_for(&self, cap: usize) -> Layout {
        // Safety: size fits isize::MAX per the callers' contract
        unsafe {
            Layout::from_size_align_unchecked(mem::size_of::<T>() * cap, mem::align_of::<T>())
        }
    }

    fn current_layout(&self) -> Layout {
        self.layout_for(self.cap)
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if mem::size_of::<T>() != 0 && self.cap != 0 {
            // Safety: a live allocation exists with exactly this layout; the
            // owning container has already destroyed any live elements
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), self.current_layout()) };
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_floor_and_factor() {
        assert_eq!(amortized_capacity(0, 1), 8);
        assert_eq!(amortized_capacity(8, 9), 12);
        assert_eq!(amortized_capacity(12, 13), 18);
        assert_eq!(amortized_capacity(18, 19), 27);
    }

    #[test]
    fn required_minimum_wins() {
        assert_eq!(amortized_capacity(8, 100), 100);
        assert_eq!(amortized_capacity(0, 9), 9);
    }

    #[test]
    fn new_does_not_allocate() {
        let buf = RawBuf::<u64>::new();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn with_capacity_is_exact() {
        let buf = RawBuf::<u64>::with_capacity(5);
        assert_eq!(buf.capacity(), 5);
    }

    #[test]
    fn zst_capacity_is_unbounded() {
        assert_eq!(RawBuf::<()>::new().capacity(), usize::MAX);
        assert_eq!(RawBuf::<()>::with_capacity(16).capacity(), usize::MAX);
    }

    #[test]
    fn reserve_grows_by_policy() {
        let mut buf = RawBuf::<u32>::with_capacity(4);
        for i in 0..4 {
            // Safety: i < capacity
            unsafe { buf.slot_ptr(i).write(i as u32 * 10) };
        }
        buf.reserve(4, 1);
        assert_eq!(buf.capacity(), 6);
        for i in 0..4 {
            // Safety: prefix survived the reallocation
            assert_eq!(unsafe { buf.slot_ptr(i).read() }, i as u32 * 10);
        }
    }

    #[test]
    fn reserve_when_room_is_noop() {
        let mut buf = RawBuf::<u32>::with_capacity(4);
        buf.reserve(2, 2);
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn shrink_to_zero_releases() {
        let mut buf = RawBuf::<u32>::with_capacity(8);
        buf.shrink_to(0);
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn shrink_keeps_prefix() {
        let mut buf = RawBuf::<u32>::with_capacity(8);
        for i in 0..3 {
            // Safety: i < capacity
            unsafe { buf.slot_ptr(i).write(i as u32) };
        }
        buf.shrink_to(3);
        assert_eq!(buf.capacity(), 3);
        for i in 0..3 {
            // Safety: prefix survived the reallocation
            assert_eq!(unsafe { buf.slot_ptr(i).read() }, i as u32);
        }
    }

    #[test]
    fn try_reserve_reports_overflow() {
        let mut buf = RawBuf::<u64>::new();
        assert_eq!(
            buf.try_reserve(0, usize::MAX),
            Err(TryReserveError::CapacityOverflow)
        );
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn zst_reserve_reports_count_overflow() {
        let mut buf = RawBuf::<()>::new();
        assert_eq!(
            buf.try_reserve(usize::MAX, 1),
            Err(TryReserveError::CapacityOverflow)
        );
    }
}
