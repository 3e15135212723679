//! Default "managed" memory resource
//!
//! On the host, managed storage is ordinary heap memory rounded up to
//! cache-line alignment, so views derived from it can be handed to
//! vectorized or accelerator-facing code without re-packing.

use std::alloc::{self, Layout};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};

use super::config::ResourceConfig;
use super::resource::MemoryResource;

/// Aligned heap resource that counts the bytes it has handed out
#[derive(Debug)]
pub struct ManagedResource {
    config: ResourceConfig,
    allocated: AtomicUsize,
}

impl ManagedResource {
    /// Resource with the default configuration
    pub fn new() -> Self {
        Self {
            config: ResourceConfig::default(),
            allocated: AtomicUsize::new(0),
        }
    }

    /// Resource with a custom configuration
    pub fn with_config(config: ResourceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            allocated: AtomicUsize::new(0),
        })
    }

    /// The configuration this resource was built with
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    fn effective_layout(&self, layout: Layout) -> Result<Layout> {
        let align = layout.align().max(self.config.alignment);
        Layout::from_size_align(layout.size(), align).map_err(|_| Error::OutOfMemory {
            size: layout.size(),
        })
    }
}

impl Default for ManagedResource {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: blocks come straight from the global allocator with a layout at
// least as strict as the request, and are released with that same layout.
unsafe impl MemoryResource for ManagedResource {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        let layout = self.effective_layout(layout)?;
        if layout.size() == 0 {
            // No storage behind it; only the alignment matters.
            return NonNull::new(layout.align() as *mut u8).ok_or(Error::OutOfMemory { size: 0 });
        }

        // SAFETY: size is non-zero.
        let ptr = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(ptr).ok_or(Error::OutOfMemory {
            size: layout.size(),
        })?;
        self.allocated.fetch_add(layout.size(), Ordering::Relaxed);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let Ok(layout) = self.effective_layout(layout) else {
            return;
        };
        if layout.size() == 0 {
            return;
        }

        alloc::dealloc(ptr.as_ptr(), layout);
        self.allocated.fetch_sub(layout.size(), Ordering::Relaxed);
    }

    fn allocated_bytes(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }

    fn name(&self) -> &str {
        self.config.label
    }
}
