//! The allocator seam every matrix buffer goes through

use std::alloc::Layout;
use std::fmt;
use std::ptr::NonNull;
use std::sync::{Arc, OnceLock};

use crate::error::Result;

use super::managed::ManagedResource;

/// A source of raw storage for matrix buffers
///
/// A resource hands out blocks for a requested [`Layout`] and takes them
/// back. The default resource is expected to produce memory that both the
/// host and an accelerator can dereference without an explicit transfer.
///
/// # Safety
///
/// A successful `allocate` must return a block valid for reads and writes
/// of `layout.size()` bytes, aligned to at least `layout.align()`, that
/// stays valid until it is passed back to `deallocate` with the same
/// layout. The block must not alias any other live block.
pub unsafe trait MemoryResource: Send + Sync + fmt::Debug {
    /// Allocate a block for `layout`
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>>;

    /// Release a block obtained from [`MemoryResource::allocate`]
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this resource with the same
    /// `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Bytes currently handed out, `0` if the resource does not track them
    fn allocated_bytes(&self) -> usize {
        0
    }

    /// Short name used in logs and `Debug` output
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// Shared handle to a memory resource
///
/// Matrices keep the handle for their whole life so the resource outlives
/// every block it handed out.
pub type ResourceHandle = Arc<dyn MemoryResource>;

static DEFAULT_RESOURCE: OnceLock<ResourceHandle> = OnceLock::new();

/// The process-wide default resource, a [`ManagedResource`]
///
/// Created on first use; every call returns a handle to the same instance.
pub fn default_resource() -> ResourceHandle {
    Arc::clone(DEFAULT_RESOURCE.get_or_init(|| Arc::new(ManagedResource::new()) as ResourceHandle))
}

/// Whether two handles refer to the same resource instance
pub fn same_resource(a: &ResourceHandle, b: &ResourceHandle) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
