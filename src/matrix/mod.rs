// Matrix data structures: the owning CSR container and its views

pub mod csr;
pub mod index;
pub mod validate;
pub mod view;

pub use csr::Csr;
pub use index::CsrIndex;
pub use validate::AUDIT_ENABLED;
pub use view::{CsrStorage, CsrStorageMut, CsrView, CsrViewMut};
