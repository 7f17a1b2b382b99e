//! Shared mutable buffers for barrier-phased workers.
//!
//! Workers write into the same buffer from different threads, but only ever
//! to indices inside their own [`WorkerRange`](crate::partition::WorkerRange),
//! and only read a buffer after a barrier has ended every write to it. That
//! ordering cannot be expressed with `split_at_mut` because the same buffer is
//! written in one phase and read whole in the next, so access goes through
//! this wrapper instead.

use std::marker::PhantomData;

/// A `&mut [T]` that can be shared between scoped worker threads.
///
/// SAFETY: callers must ensure no index is written by two threads in the same
/// phase, and that no read view is alive while any thread may still write.
pub(crate) struct SharedSlice<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

unsafe impl<T: Send> Send for SharedSlice<'_, T> {}
unsafe impl<T: Send + Sync> Sync for SharedSlice<'_, T> {}

impl<'a, T: Copy> SharedSlice<'a, T> {
    pub(crate) fn new(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Write `value` at `index`.
    ///
    /// # Safety
    /// No other thread may read or write `index` until the next barrier.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    #[inline]
    pub(crate) unsafe fn write(&self, index: usize, value: T) {
        assert!(index < self.len, "index {} out of bounds ({})", index, self.len);
        self.ptr.add(index).write(value);
    }

    /// Read-only view of the whole buffer.
    ///
    /// # Safety
    /// No thread may call [`write`](Self::write) while the returned slice is
    /// alive.
    #[inline]
    pub(crate) unsafe fn as_slice(&self) -> &[T] {
        std::slice::from_raw_parts(self.ptr, self.len)
    }
}
