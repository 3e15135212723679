//! Owning Compressed Sparse Row (CSR) matrix in resource-managed storage

use std::fmt;

use num_traits::One;

use crate::error::Result;
use crate::memory::{default_resource, MemoryResource, ResourceBuffer, ResourceHandle};

use super::index::CsrIndex;
use super::validate;
use super::view::{CsrStorage, CsrStorageMut, CsrView, CsrViewMut};

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - values: the non-zero entries (size: nnz)
/// - col_indices: column of each entry, strictly ascending within a row (size: nnz)
/// - row_ptrs: start offset of every row plus the total nnz (size: num_rows + 1)
///
/// All three live in storage obtained from a [`MemoryResource`](crate::memory::MemoryResource),
/// by default the process-wide managed resource, so that views taken on the
/// host can be used from accelerator code without copying. The column count
/// is stored separately since trailing columns may be empty.
///
/// The container validates its input once, at construction. Afterwards it
/// can only be changed element-wise through the mutable accessors, and
/// keeping row offsets and column order intact is up to the caller.
pub struct Csr<T, I = u32> {
    values: ResourceBuffer<T>,
    col_indices: ResourceBuffer<I>,
    row_ptrs: ResourceBuffer<I>,
    num_cols: usize,
}

impl<T: Copy, I: CsrIndex> Csr<T, I> {
    /// Creates an empty matrix: no rows, no columns, `row_ptrs == [0]`
    pub fn new() -> Self {
        Self::from_slices(&[], &[], &[I::zero()], 0)
    }

    /// Copies the given arrays into storage from the default resource
    ///
    /// # Arguments
    ///
    /// * `values` - Non-zero values
    /// * `col_indices` - Column indices, sorted within each row
    /// * `row_ptrs` - Row offsets, starting at 0
    /// * `num_cols` - Number of columns
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - values.len() must equal col_indices.len()
    /// - row_ptrs must not be empty
    /// - row_ptrs[0] must be 0
    ///
    /// With audit enabled it also panics on unsorted columns or malformed
    /// row offsets.
    pub fn from_slices(values: &[T], col_indices: &[I], row_ptrs: &[I], num_cols: usize) -> Self {
        Self::from_slices_in(values, col_indices, row_ptrs, num_cols, &default_resource())
    }

    /// Like [`Csr::from_slices`], with storage from `resource`
    pub fn from_slices_in(
        values: &[T],
        col_indices: &[I],
        row_ptrs: &[I],
        num_cols: usize,
        resource: &ResourceHandle,
    ) -> Self {
        if let Err(err) = validate::check_structure(values.len(), col_indices, row_ptrs) {
            panic!("precondition violated: {err}");
        }
        if let Err(err) = validate::audit(col_indices, row_ptrs) {
            panic!("audit failed: {err}");
        }

        Self::copy_in(
            ResourceBuffer::from_slice_in(values, resource),
            ResourceBuffer::from_slice_in(col_indices, resource),
            ResourceBuffer::from_slice_in(row_ptrs, resource),
            num_cols,
        )
    }

    /// Fallible variant of [`Csr::from_slices_in`]
    ///
    /// Returns the violated precondition, a failed audit, or an allocation
    /// failure as an error instead of panicking.
    pub fn try_from_slices_in(
        values: &[T],
        col_indices: &[I],
        row_ptrs: &[I],
        num_cols: usize,
        resource: &ResourceHandle,
    ) -> Result<Self> {
        validate::check_structure(values.len(), col_indices, row_ptrs)?;
        validate::audit(col_indices, row_ptrs)?;

        Ok(Self::copy_in(
            ResourceBuffer::try_from_slice_in(values, resource)?,
            ResourceBuffer::try_from_slice_in(col_indices, resource)?,
            ResourceBuffer::try_from_slice_in(row_ptrs, resource)?,
            num_cols,
        ))
    }

    fn copy_in(
        values: ResourceBuffer<T>,
        col_indices: ResourceBuffer<I>,
        row_ptrs: ResourceBuffer<I>,
        num_cols: usize,
    ) -> Self {
        tracing::debug!(
            rows = row_ptrs.len() - 1,
            cols = num_cols,
            nnz = values.len(),
            resource = values.resource().name(),
            "constructed CSR matrix"
        );
        Self {
            values,
            col_indices,
            row_ptrs,
            num_cols,
        }
    }

    /// Returns the non-zero values
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the non-zero values for in-place mutation
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Returns the column indices
    pub fn col_indices(&self) -> &[I] {
        &self.col_indices
    }

    /// Returns the column indices for in-place mutation
    ///
    /// Columns must stay strictly ascending within each row; nothing
    /// re-checks this.
    pub fn col_indices_mut(&mut self) -> &mut [I] {
        &mut self.col_indices
    }

    /// Returns the row offsets
    pub fn row_ptrs(&self) -> &[I] {
        &self.row_ptrs
    }

    /// Returns the row offsets for in-place mutation
    ///
    /// Offsets must stay non-decreasing and start at 0; nothing re-checks
    /// this.
    pub fn row_ptrs_mut(&mut self) -> &mut [I] {
        &mut self.row_ptrs
    }

    /// Number of rows, `row_ptrs().len() - 1`
    pub fn num_rows(&self) -> usize {
        self.row_ptrs.len() - 1
    }

    /// Number of columns
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Resource backing the storage
    pub fn resource(&self) -> &ResourceHandle {
        self.values.resource()
    }

    /// Column indices and values of row `i`
    pub fn row(&self, i: usize) -> (&[I], &[T]) {
        self.view().row(i)
    }

    /// Shared view over the storage
    pub fn view(&self) -> CsrView<'_, T, I> {
        CsrView::new(self)
    }

    /// Exclusive view allowing element mutation
    pub fn view_mut(&mut self) -> CsrViewMut<'_, T, I> {
        CsrViewMut::new(self)
    }

    /// Creates a matrix with the given dimensions and no stored entries
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        let row_ptrs = vec![I::zero(); n_rows + 1];
        Self::from_slices(&[], &[], &row_ptrs, n_cols)
    }
}

impl<T: Copy + One, I: CsrIndex> Csr<T, I> {
    /// Creates an identity matrix of the given size
    ///
    /// # Panics
    ///
    /// Panics if `n` does not fit in the index type.
    pub fn identity(n: usize) -> Self {
        let indices: Vec<I> = (0..=n)
            .map(|i| I::from_offset(i).unwrap_or_else(|| panic!("{n} does not fit the index type")))
            .collect();
        let values = vec![T::one(); n];
        Self::from_slices(&values, &indices[..n], &indices, n)
    }
}

impl<T: Copy, I: CsrIndex> Default for Csr<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies always land in the default resource, whatever the source used.
impl<T: Copy, I: CsrIndex> Clone for Csr<T, I> {
    fn clone(&self) -> Self {
        tracing::debug!(
            from = self.resource().name(),
            nnz = self.nnz(),
            "copying CSR matrix into the default resource"
        );
        Self::from_slices(self.values(), self.col_indices(), self.row_ptrs(), self.num_cols())
    }
}

impl<T: Copy, I: CsrIndex> CsrStorage<T, I> for Csr<T, I> {
    fn values(&self) -> &[T] {
        &self.values
    }

    fn col_indices(&self) -> &[I] {
        &self.col_indices
    }

    fn row_ptrs(&self) -> &[I] {
        &self.row_ptrs
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }
}

impl<T: Copy, I: CsrIndex> CsrStorageMut<T, I> for Csr<T, I> {
    fn parts_mut(&mut self) -> (&mut [T], &mut [I], &mut [I]) {
        (&mut self.values[..], &mut self.col_indices[..], &mut self.row_ptrs[..])
    }
}

impl<T: fmt::Debug + Copy, I: CsrIndex> fmt::Debug for Csr<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Csr {{")?;
        writeln!(f, "  dimensions: {} × {}", self.num_rows(), self.num_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;
        writeln!(f, "  resource: {}", self.resource().name())?;

        let max_rows_to_print = 5.min(self.num_rows());

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let (cols, values) = self.row(i);

                if cols.is_empty() {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(cols.len());

                    for j in 0..max_elements {
                        write!(f, "({:?}, {:?}) ", cols[j], values[j])?;
                    }

                    if cols.len() > max_elements {
                        write!(f, "... ({} more)", cols.len() - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.num_rows() > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.num_rows() - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
