//! # shared-csr: CSR matrices shared between host and accelerator code
//!
//! A Compressed Sparse Row matrix whose three arrays live in storage from a
//! pluggable memory resource, plus lightweight views into that storage.
//!
//! ## Overview
//!
//! - [`Csr`] owns `values`, `col_indices` and `row_ptrs`, copies them in at
//!   construction, and validates the cheap structural invariants every time.
//!   The full sortedness scan runs only in audit builds (debug builds, or
//!   the `audit` feature).
//! - [`CsrView`] / [`CsrViewMut`] borrow those arrays without allocating.
//!   A `CsrView` is `Copy` and can be passed by value into worker threads
//!   or kernel bodies.
//! - [`MemoryResource`] is the allocator seam. By default storage comes from
//!   the process-wide [`ManagedResource`], memory meant to be visible to
//!   host and accelerator alike. Copies of a matrix always land there.
//!
//! ## Usage
//!
//! ```
//! use shared_csr::Csr;
//!
//! // [10  0 20]
//! // [ 0 30  0]
//! let mut a = Csr::<f64, u32>::from_slices(&[10.0, 20.0, 30.0], &[0, 2, 1], &[0, 2, 3], 3);
//! assert_eq!(a.num_rows(), 2);
//! assert_eq!(a.num_cols(), 3);
//!
//! let mut view = a.view_mut();
//! view.values_mut()[1] = 25.0;
//! assert_eq!(a.values(), &[10.0, 25.0, 30.0]);
//! ```
//!
//! Storage from a caller-supplied resource:
//!
//! ```
//! use std::sync::Arc;
//! use shared_csr::{Csr, ManagedResource, MemoryResource, ResourceConfig, ResourceHandle};
//!
//! let resource: ResourceHandle =
//!     Arc::new(ManagedResource::with_config(ResourceConfig::with_alignment(256)).unwrap());
//! let a = Csr::<f32, u32>::from_slices_in(&[1.0], &[0], &[0, 1], 1, &resource);
//! assert_eq!(a.values().as_ptr() as usize % 256, 0);
//! assert!(resource.allocated_bytes() > 0);
//! ```

pub mod error;
pub mod matrix;
pub mod memory;

// Re-export primary components
pub use error::{Error, Result};
pub use matrix::{Csr, CsrIndex, CsrStorage, CsrStorageMut, CsrView, CsrViewMut, AUDIT_ENABLED};
pub use memory::{
    default_resource, same_resource, ManagedResource, MemoryResource, ResourceBuffer, ResourceConfig,
    ResourceHandle,
};

/// Version information for the shared-csr library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
