//! Doubly linked list with detachable nodes.
//!
//! [`LinkedList`] is a circular ring of heap-allocated nodes anchored by a
//! sentinel header. The sentinel is allocated once per list and never
//! carries a value: `sentinel.next` is the head, `sentinel.prev` the tail,
//! and an empty list is the sentinel linked to itself. Every link step is
//! the same splice against a neighbor, with no null checks and no special
//! cases for head, tail, or empty.
//!
//! Positions are exposed as [`NodeRef`] handles. Creating or comparing a
//! handle is safe; using one against a list is `unsafe`, because a handle
//! is a bare address: the caller must guarantee it came from that list and
//! is still attached. Passing a foreign or stale handle is undefined
//! behavior and is not checked.
//!
//! [`LinkedList::detach`] unlinks a node without destroying it, returning
//! a [`DetachedNode`] that owns the allocation. The value can be read,
//! edited, taken, or spliced back into any list of the same type without
//! reallocating.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ptr::NonNull;

// ============================================================================
// Node layout
// ============================================================================

/// Link pair shared by value nodes and the sentinel.
struct NodeHeader {
    next: NonNull<NodeHeader>,
    prev: NonNull<NodeHeader>,
}

/// A value node. `links` sits at offset zero so a header pointer for a
/// non-sentinel node casts directly to the node and back.
#[repr(C)]
struct Node<T> {
    links: NodeHeader,
    value: T,
}

// ============================================================================
// Handles
// ============================================================================

/// A position in a [`LinkedList`].
///
/// A `NodeRef` is an inert token: it can be copied, stored, and compared
/// (by node identity) freely. Dereferencing one goes through the list
/// methods that take it, which are `unsafe` because the handle carries no
/// proof of which list it belongs to.
pub struct NodeRef<T> {
    node: NonNull<Node<T>>,
    marker: PhantomData<*const Node<T>>,
}

impl<T> Clone for NodeRef<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<T> {}

impl<T> PartialEq for NodeRef<T> {
    /// Handles are equal when they name the same node, regardless of the
    /// values stored there.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T> Eq for NodeRef<T> {}

impl<T> fmt::Debug for NodeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.node).finish()
    }
}

/// A list node that owns itself.
///
/// Produced by [`LinkedList::detach`] or built directly with
/// [`DetachedNode::new`]. While detached, the node is self-linked and the
/// wrapper has exclusive ownership: dropping it frees the node, and
/// splicing it back into a list transfers ownership without copying the
/// value or touching the allocator.
pub struct DetachedNode<T> {
    node: NonNull<Node<T>>,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T> DetachedNode<T> {
    /// Allocates a fresh detached node holding `value`.
    pub fn new(value: T) -> Self {
        let raw = Box::into_raw(Box::new(Node {
            links: NodeHeader {
                next: NonNull::dangling(),
                prev: NonNull::dangling(),
            },
            value,
        }));
        // Safety: Box::into_raw never returns null
        let node = unsafe { NonNull::new_unchecked(raw) };
        let header = node.cast::<NodeHeader>();
        // Safety: the node is live; self-links mark it detached
        unsafe {
            (*header.as_ptr()).next = header;
            (*header.as_ptr()).prev = header;
        }
        Self {
            node,
            marker: PhantomData,
        }
    }

    /// Reads the stored value.
    #[inline]
    pub fn value(&self) -> &T {
        // Safety: the node is live and exclusively owned
        unsafe { &(*self.node.as_ptr()).value }
    }

    /// Edits the stored value in place.
    #[inline]
    pub fn value_mut(&mut self) -> &mut T {
        // Safety: the node is live and exclusively owned
        unsafe { &mut (*self.node.as_ptr()).value }
    }

    /// Consumes the node, freeing it and returning the value.
    pub fn into_value(self) -> T {
        let me = ManuallyDrop::new(self);
        // Safety: ownership of the allocation moves into the box
        let boxed = unsafe { Box::from_raw(me.node.as_ptr()) };
        boxed.value
    }

    /// Releases ownership of the raw node without freeing it.
    fn into_raw(self) -> NonNull<Node<T>> {
        let me = ManuallyDrop::new(self);
        me.node
    }
}

impl<T> Drop for DetachedNode<T> {
    fn drop(&mut self) {
        // Safety: a detached node exclusively owns its allocation
        drop(unsafe { Box::from_raw(self.node.as_ptr()) });
    }
}

impl<T: fmt::Debug> fmt::Debug for DetachedNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DetachedNode").field(self.value()).finish()
    }
}

// Safety: the wrapper owns the node outright, so it moves between threads
// exactly like Box<T> does.
unsafe impl<T: Send> Send for DetachedNode<T> {}
unsafe impl<T: Sync> Sync for DetachedNode<T> {}

// ============================================================================
// LinkedList
// ============================================================================

/// A sentinel-anchored doubly linked list.
///
/// # Example
///
/// ```
/// use stowage::LinkedList;
///
/// let mut list = LinkedList::new();
/// list.push_back(1);
/// list.push_back(3);
/// list.push_front(0);
///
/// let three = list.find(&3).unwrap();
/// // Safety: the handle came from this list and is still attached.
/// unsafe { list.insert_before(Some(three), 2) };
///
/// let values: Vec<i32> = list.into_iter().collect();
/// assert_eq!(values, vec![0, 1, 2, 3]);
/// ```
pub struct LinkedList<T> {
    sentinel: NonNull<NodeHeader>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

// Safety: the list owns its nodes; the raw links never alias outside it.
unsafe impl<T: Send> Send for LinkedList<T> {}
unsafe impl<T: Sync> Sync for LinkedList<T> {}

impl<T> LinkedList<T> {
    /// Creates an empty list. Allocates the sentinel header.
    pub fn new() -> Self {
        let raw = Box::into_raw(Box::new(NodeHeader {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
        }));
        // Safety: Box::into_raw never returns null
        let sentinel = unsafe { NonNull::new_unchecked(raw) };
        // Safety: the header is live; self-links make the ring empty
        unsafe {
            (*raw).next = sentinel;
            (*raw).prev = sentinel;
        }
        Self {
            sentinel,
            len: 0,
            marker: PhantomData,
        }
    }

    /// Number of live nodes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no nodes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ------------------------------------------------------------------
    // End access
    // ------------------------------------------------------------------

    /// Returns a reference to the first value.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        let head = unsafe { (*self.sentinel.as_ptr()).next };
        if head == self.sentinel {
            return None;
        }
        // Safety: head is a live node for the lifetime of &self
        Some(unsafe { &(*head.cast::<Node<T>>().as_ptr()).value })
    }

    /// Returns a mutable reference to the first value.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = unsafe { (*self.sentinel.as_ptr()).next };
        if head == self.sentinel {
            return None;
        }
        // Safety: head is a live node, borrowed through &mut self
        Some(unsafe { &mut (*head.cast::<Node<T>>().as_ptr()).value })
    }

    /// Returns a reference to the last value.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        let tail = unsafe { (*self.sentinel.as_ptr()).prev };
        if tail == self.sentinel {
            return None;
        }
        // Safety: tail is a live node for the lifetime of &self
        Some(unsafe { &(*tail.cast::<Node<T>>().as_ptr()).value })
    }

    /// Returns a mutable reference to the last value.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = unsafe { (*self.sentinel.as_ptr()).prev };
        if tail == self.sentinel {
            return None;
        }
        // Safety: tail is a live node, borrowed through &mut self
        Some(unsafe { &mut (*tail.cast::<Node<T>>().as_ptr()).value })
    }

    /// Handle to the first node, if any.
    #[inline]
    pub fn front_node(&self) -> Option<NodeRef<T>> {
        let head = unsafe { (*self.sentinel.as_ptr()).next };
        if head == self.sentinel {
            return None;
        }
        Some(NodeRef {
            node: head.cast(),
            marker: PhantomData,
        })
    }

    /// Handle to the last node, if any.
    #[inline]
    pub fn back_node(&self) -> Option<NodeRef<T>> {
        let tail = unsafe { (*self.sentinel.as_ptr()).prev };
        if tail == self.sentinel {
            return None;
        }
        Some(NodeRef {
            node: tail.cast(),
            marker: PhantomData,
        })
    }

    // ------------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------------

    /// Prepends a value. O(1). Returns a handle to the new node.
    pub fn push_front(&mut self, value: T) -> NodeRef<T> {
        self.push_front_node(DetachedNode::new(value))
    }

    /// Appends a value. O(1). Returns a handle to the new node.
    pub fn push_back(&mut self, value: T) -> NodeRef<T> {
        self.push_back_node(DetachedNode::new(value))
    }

    /// Splices a detached node in as the new head. O(1), no allocation.
    pub fn push_front_node(&mut self, node: DetachedNode<T>) -> NodeRef<T> {
        let raw = node.into_raw();
        let head = unsafe { (*self.sentinel.as_ptr()).next };
        // Safety: raw is an owned detached node; head is in this ring
        unsafe { self.link_before(raw.cast(), head) };
        NodeRef {
            node: raw,
            marker: PhantomData,
        }
    }

    /// Splices a detached node in as the new tail. O(1), no allocation.
    pub fn push_back_node(&mut self, node: DetachedNode<T>) -> NodeRef<T> {
        let raw = node.into_raw();
        // Safety: raw is an owned detached node; the sentinel is the ring
        unsafe { self.link_before(raw.cast(), self.sentinel) };
        NodeRef {
            node: raw,
            marker: PhantomData,
        }
    }

    /// Inserts `value` in front of `before`, or at the tail when `before`
    /// is `None`. Returns a handle to the new node.
    ///
    /// # Safety
    ///
    /// Any handle passed must have been produced by this list and still be
    /// attached to it.
    pub unsafe fn insert_before(&mut self, before: Option<NodeRef<T>>, value: T) -> NodeRef<T> {
        // Safety: forwarded to the caller
        unsafe { self.insert_node_before(before, DetachedNode::new(value)) }
    }

    /// Splices a detached node in front of `before`, or at the tail when
    /// `before` is `None`. O(1), no allocation.
    ///
    /// # Safety
    ///
    /// Any handle passed must have been produced by this list and still be
    /// attached to it.
    pub unsafe fn insert_node_before(
        &mut self,
        before: Option<NodeRef<T>>,
        node: DetachedNode<T>,
    ) -> NodeRef<T> {
        let at = match before {
            Some(handle) => handle.node.cast::<NodeHeader>(),
            None => self.sentinel,
        };
        let raw = node.into_raw();
        // Safety: at is in this ring per the caller; raw is owned
        unsafe { self.link_before(raw.cast(), at) };
        NodeRef {
            node: raw,
            marker: PhantomData,
        }
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    /// Removes and returns the first value. O(1).
    pub fn pop_front(&mut self) -> Option<T> {
        let head = unsafe { (*self.sentinel.as_ptr()).next };
        if head == self.sentinel {
            return None;
        }
        // Safety: head is a live node owned by this list
        unsafe {
            self.unlink(head);
            Some(Box::from_raw(head.cast::<Node<T>>().as_ptr()).value)
        }
    }

    /// Removes and returns the last value. O(1).
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = unsafe { (*self.sentinel.as_ptr()).prev };
        if tail == self.sentinel {
            return None;
        }
        // Safety: tail is a live node owned by this list
        unsafe {
            self.unlink(tail);
            Some(Box::from_raw(tail.cast::<Node<T>>().as_ptr()).value)
        }
    }

    /// Removes the first node equal to `value`, destroying it. Returns
    /// whether a node was removed.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.find(value) {
            Some(node) => {
                // Safety: the handle was just produced by this list
                unsafe { self.remove_node(node) };
                true
            }
            None => false,
        }
    }

    /// Unlinks `node`, frees it, and returns its value.
    ///
    /// # Safety
    ///
    /// `node` must have been produced by this list and still be attached.
    pub unsafe fn remove_node(&mut self, node: NodeRef<T>) -> T {
        // Safety: per the caller, node is attached here; after unlinking
        // this list no longer references it, so the box takes ownership
        unsafe {
            self.unlink(node.node.cast());
            Box::from_raw(node.node.as_ptr()).value
        }
    }

    /// Unlinks `node` without destroying it, returning ownership of the
    /// still-allocated node.
    ///
    /// # Safety
    ///
    /// `node` must have been produced by this list and still be attached.
    pub unsafe fn detach(&mut self, node: NodeRef<T>) -> DetachedNode<T> {
        // Safety: per the caller, node is attached here
        unsafe { self.unlink(node.node.cast()) };
        DetachedNode {
            node: node.node,
            marker: PhantomData,
        }
    }

    /// Drops every node. The sentinel survives and the list is reusable.
    pub fn clear(&mut self) {
        let mut cursor = unsafe { (*self.sentinel.as_ptr()).next };
        // Empty the ring first; a panicking drop then leaks the rest
        // instead of leaving the list half-linked.
        unsafe {
            (*self.sentinel.as_ptr()).next = self.sentinel;
            (*self.sentinel.as_ptr()).prev = self.sentinel;
        }
        self.len = 0;
        while cursor != self.sentinel {
            // Safety: every non-sentinel header is a live owned node
            unsafe {
                let node = cursor.cast::<Node<T>>();
                cursor = (*cursor.as_ptr()).next;
                drop(Box::from_raw(node.as_ptr()));
            }
        }
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Handle to the first node equal to `value`, scanning from the head.
    pub fn find(&self, value: &T) -> Option<NodeRef<T>>
    where
        T: PartialEq,
    {
        self.find_by(|candidate| candidate == value)
    }

    /// Handle to the last node equal to `value`, scanning from the tail.
    pub fn find_last(&self, value: &T) -> Option<NodeRef<T>>
    where
        T: PartialEq,
    {
        self.find_last_by(|candidate| candidate == value)
    }

    /// Handle to the first node whose value satisfies `pred`.
    pub fn find_by<P>(&self, mut pred: P) -> Option<NodeRef<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = unsafe { (*self.sentinel.as_ptr()).next };
        while cursor != self.sentinel {
            let node = cursor.cast::<Node<T>>();
            // Safety: non-sentinel headers are live nodes
            if pred(unsafe { &(*node.as_ptr()).value }) {
                return Some(NodeRef {
                    node,
                    marker: PhantomData,
                });
            }
            cursor = unsafe { (*cursor.as_ptr()).next };
        }
        None
    }

    /// Handle to the last node whose value satisfies `pred`.
    pub fn find_last_by<P>(&self, mut pred: P) -> Option<NodeRef<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = unsafe { (*self.sentinel.as_ptr()).prev };
        while cursor != self.sentinel {
            let node = cursor.cast::<Node<T>>();
            // Safety: non-sentinel headers are live nodes
            if pred(unsafe { &(*node.as_ptr()).value }) {
                return Some(NodeRef {
                    node,
                    marker: PhantomData,
                });
            }
            cursor = unsafe { (*cursor.as_ptr()).prev };
        }
        None
    }

    /// Returns `true` if any node's value equals `value`. O(n) scan.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }

    // ------------------------------------------------------------------
    // Handle access
    // ------------------------------------------------------------------

    /// Reads the value stored at `node`.
    ///
    /// # Safety
    ///
    /// `node` must have been produced by this list and still be attached.
    #[inline]
    pub unsafe fn get(&self, node: NodeRef<T>) -> &T {
        // Safety: per the caller, node is live in this list
        unsafe { &(*node.node.as_ptr()).value }
    }

    /// Edits the value stored at `node`.
    ///
    /// # Safety
    ///
    /// `node` must have been produced by this list and still be attached.
    #[inline]
    pub unsafe fn get_mut(&mut self, node: NodeRef<T>) -> &mut T {
        // Safety: per the caller, node is live in this list
        unsafe { &mut (*node.node.as_ptr()).value }
    }

    /// Handle to the node after `node`, or `None` at the tail.
    ///
    /// # Safety
    ///
    /// `node` must have been produced by this list and still be attached.
    pub unsafe fn next_node(&self, node: NodeRef<T>) -> Option<NodeRef<T>> {
        let next = unsafe { (*node.node.cast::<NodeHeader>().as_ptr()).next };
        if next == self.sentinel {
            return None;
        }
        Some(NodeRef {
            node: next.cast(),
            marker: PhantomData,
        })
    }

    /// Handle to the node before `node`, or `None` at the head.
    ///
    /// # Safety
    ///
    /// `node` must have been produced by this list and still be attached.
    pub unsafe fn prev_node(&self, node: NodeRef<T>) -> Option<NodeRef<T>> {
        let prev = unsafe { (*node.node.cast::<NodeHeader>().as_ptr()).prev };
        if prev == self.sentinel {
            return None;
        }
        Some(NodeRef {
            node: prev.cast(),
            marker: PhantomData,
        })
    }

    // ------------------------------------------------------------------
    // Whole-list operations
    // ------------------------------------------------------------------

    /// Moves every node of `other` to the back of `self`. O(1); `other`
    /// is left empty and reusable.
    pub fn append(&mut self, other: &mut Self) {
        if other.len == 0 {
            return;
        }
        // Safety: both rings are intact; this splices one into the other
        unsafe {
            let other_first = (*other.sentinel.as_ptr()).next;
            let other_last = (*other.sentinel.as_ptr()).prev;
            let tail = (*self.sentinel.as_ptr()).prev;

            (*tail.as_ptr()).next = other_first;
            (*other_first.as_ptr()).prev = tail;
            (*other_last.as_ptr()).next = self.sentinel;
            (*self.sentinel.as_ptr()).prev = other_last;

            (*other.sentinel.as_ptr()).next = other.sentinel;
            (*other.sentinel.as_ptr()).prev = other.sentinel;
        }
        self.len += other.len;
        other.len = 0;
    }

    /// Iterates over the values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        // Safety: the ring is intact for the lifetime of &self
        let (head, tail) = unsafe {
            (
                (*self.sentinel.as_ptr()).next,
                (*self.sentinel.as_ptr()).prev,
            )
        };
        Iter {
            head,
            tail,
            remaining: self.len,
            marker: PhantomData,
        }
    }

    /// Iterates over the values from head to tail with mutable access.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // Safety: the ring is intact for the lifetime of &mut self
        let (head, tail) = unsafe {
            (
                (*self.sentinel.as_ptr()).next,
                (*self.sentinel.as_ptr()).prev,
            )
        };
        IterMut {
            head,
            tail,
            remaining: self.len,
            marker: PhantomData,
        }
    }

    // ------------------------------------------------------------------
    // Ring primitives
    // ------------------------------------------------------------------

    /// Splices `node` in front of `at`; `at` may be the sentinel.
    ///
    /// # Safety
    ///
    /// `node` must be an owned, unlinked header; `at` must be in this
    /// list's ring.
    unsafe fn link_before(&mut self, node: NonNull<NodeHeader>, at: NonNull<NodeHeader>) {
        // Safety: per the caller, all four headers are live
        unsafe {
            let prev = (*at.as_ptr()).prev;
            (*node.as_ptr()).prev = prev;
            (*node.as_ptr()).next = at;
            (*prev.as_ptr()).next = node;
            (*at.as_ptr()).prev = node;
        }
        self.len += 1;
    }

    /// Unlinks `node` from the ring, leaving it self-linked.
    ///
    /// # Safety
    ///
    /// `node` must be attached to this list and must not be the sentinel.
    unsafe fn unlink(&mut self, node: NonNull<NodeHeader>) {
        debug_assert!(node != self.sentinel);
        // Safety: per the caller, the node and its neighbors are live
        unsafe {
            let prev = (*node.as_ptr()).prev;
            let next = (*node.as_ptr()).next;
            (*prev.as_ptr()).next = next;
            (*next.as_ptr()).prev = prev;
            (*node.as_ptr()).next = node;
            (*node.as_ptr()).prev = node;
        }
        self.len -= 1;
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
        // Safety: the sentinel came from new() and is now unreachable
        drop(unsafe { Box::from_raw(self.sentinel.as_ptr()) });
    }
}

impl<T> Default for LinkedList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        for value in self.iter() {
            out.push_back(value.clone());
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: PartialOrd> PartialOrd for LinkedList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for LinkedList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the list, yielding values from head to tail.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Borrowing iterator over a [`LinkedList`].
pub struct Iter<'a, T> {
    head: NonNull<NodeHeader>,
    tail: NonNull<NodeHeader>,
    remaining: usize,
    marker: PhantomData<&'a Node<T>>,
}

// Safety: shared-only access to nodes the borrowed list owns.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Safety: remaining > 0 means head is a live node, not the sentinel
        unsafe {
            let node = self.head.cast::<Node<T>>();
            self.head = (*self.head.as_ptr()).next;
            Some(&(*node.as_ptr()).value)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Safety: remaining > 0 means tail is a live node, not the sentinel
        unsafe {
            let node = self.tail.cast::<Node<T>>();
            self.tail = (*self.tail.as_ptr()).prev;
            Some(&(*node.as_ptr()).value)
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            tail: self.tail,
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

/// Mutably borrowing iterator over a [`LinkedList`].
pub struct IterMut<'a, T> {
    head: NonNull<NodeHeader>,
    tail: NonNull<NodeHeader>,
    remaining: usize,
    marker: PhantomData<&'a mut Node<T>>,
}

// Safety: exclusive access to nodes the borrowed list owns.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Safety: remaining > 0 means head is a live node; each node is
        // yielded at most once, so the borrows never alias
        unsafe {
            let node = self.head.cast::<Node<T>>();
            self.head = (*self.head.as_ptr()).next;
            Some(&mut (*node.as_ptr()).value)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Safety: remaining > 0 means tail is a live node; each node is
        // yielded at most once, so the borrows never alias
        unsafe {
            let node = self.tail.cast::<Node<T>>();
            self.tail = (*self.tail.as_ptr()).prev;
            Some(&mut (*node.as_ptr()).value)
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator that drains a [`LinkedList`] from the head.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

// ============================================================================
// Tests
// ============================================================================
