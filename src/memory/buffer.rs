//! Fixed-length buffers backed by a [`MemoryResource`]

use std::alloc::{handle_alloc_error, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::sync::Arc;

use crate::error::{Error, Result};

use super::resource::{MemoryResource, ResourceHandle};

/// A contiguous, fixed-length array living in resource-managed storage
///
/// The buffer is filled by copying from a slice and never changes length
/// afterwards; elements can be mutated in place through `DerefMut`.
/// Storage goes back to the originating resource on drop.
pub struct ResourceBuffer<T> {
    ptr: NonNull<T>,
    len: usize,
    resource: ResourceHandle,
}

// SAFETY: the buffer uniquely owns its block, like a Vec<T>.
unsafe impl<T: Send> Send for ResourceBuffer<T> {}
unsafe impl<T: Sync> Sync for ResourceBuffer<T> {}

impl<T: Copy> ResourceBuffer<T> {
    /// Copy `src` into fresh storage from `resource`
    pub fn try_from_slice_in(src: &[T], resource: &ResourceHandle) -> Result<Self> {
        let layout = Layout::array::<T>(src.len()).map_err(|_| Error::OutOfMemory {
            size: std::mem::size_of::<T>().saturating_mul(src.len()),
        })?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            let raw = resource.allocate(layout)?;
            tracing::trace!(
                bytes = layout.size(),
                align = layout.align(),
                resource = resource.name(),
                "allocated buffer"
            );
            raw.cast::<T>()
        };

        // SAFETY: `ptr` is valid for `src.len()` writes of T (or the length
        // is zero) and a fresh block cannot overlap `src`.
        unsafe { std::ptr::copy_nonoverlapping(src.as_ptr(), ptr.as_ptr(), src.len()) };

        Ok(Self {
            ptr,
            len: src.len(),
            resource: Arc::clone(resource),
        })
    }

    /// Copy `src` into fresh storage from `resource`
    ///
    /// # Panics
    ///
    /// Aborts through [`handle_alloc_error`] when the resource is out of
    /// memory, and panics when the byte size overflows.
    pub fn from_slice_in(src: &[T], resource: &ResourceHandle) -> Self {
        match Self::try_from_slice_in(src, resource) {
            Ok(buffer) => buffer,
            Err(err) => match Layout::array::<T>(src.len()) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => panic!("{err}"),
            },
        }
    }
}

impl<T> ResourceBuffer<T> {
    /// Number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resource the storage came from
    pub fn resource(&self) -> &ResourceHandle {
        &self.resource
    }

    /// Raw pointer to the first element, for handing to foreign kernels
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable raw pointer to the first element
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T> Deref for ResourceBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: `ptr` is valid for `len` initialized elements (or dangling
        // and well aligned when the length or element size is zero).
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for ResourceBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: as in `deref`, and `&mut self` guarantees uniqueness.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> Drop for ResourceBuffer<T> {
    fn drop(&mut self) {
        // Elements are Copy-constructed, so only the block needs releasing.
        let Ok(layout) = Layout::array::<T>(self.len) else {
            return;
        };
        if layout.size() == 0 {
            return;
        }

        tracing::trace!(
            bytes = layout.size(),
            resource = self.resource.name(),
            "released buffer"
        );
        // SAFETY: the block came from this resource with this layout.
        unsafe { self.resource.deallocate(self.ptr.cast::<u8>(), layout) };
    }
}

impl<T: fmt::Debug> fmt::Debug for ResourceBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
