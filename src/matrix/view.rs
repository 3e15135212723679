//! Non-owning views over CSR storage
//!
//! A view is three borrowed slices and the column count. Building one never
//! allocates, copies element data, or re-validates; it simply lends out the
//! buffers of whatever owns them. [`CsrView`] is `Copy` and `Send + Sync`
//! for `Sync` element types, so it can be handed by value to worker threads
//! or kernels. [`CsrViewMut`] lends the same buffers exclusively for
//! element-wise mutation.
//!
//! Lengths cannot change through a view. Whether rearranged column indices
//! or offsets still satisfy the CSR invariants is the caller's business.

use rayon::prelude::*;

use super::index::CsrIndex;

/// Read access to CSR arrays, implemented by owners and views alike
pub trait CsrStorage<T, I> {
    /// Non-zero values
    fn values(&self) -> &[T];

    /// Column index of each value
    fn col_indices(&self) -> &[I];

    /// Row offsets, `num_rows + 1` entries
    fn row_ptrs(&self) -> &[I];

    /// Number of columns
    fn num_cols(&self) -> usize;
}

/// Element-wise write access to CSR arrays
pub trait CsrStorageMut<T, I>: CsrStorage<T, I> {
    /// All three arrays at once, as disjoint mutable slices
    fn parts_mut(&mut self) -> (&mut [T], &mut [I], &mut [I]);
}

/// Shared, copyable view of a CSR matrix
pub struct CsrView<'a, T, I = u32> {
    values: &'a [T],
    col_indices: &'a [I],
    row_ptrs: &'a [I],
    num_cols: usize,
}

impl<T, I> Clone for CsrView<'_, T, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, I> Copy for CsrView<'_, T, I> {}

impl<'a, T, I: CsrIndex> CsrView<'a, T, I> {
    /// Borrow the arrays of `owner`
    pub fn new<S: CsrStorage<T, I> + ?Sized>(owner: &'a S) -> Self {
        Self {
            values: owner.values(),
            col_indices: owner.col_indices(),
            row_ptrs: owner.row_ptrs(),
            num_cols: owner.num_cols(),
        }
    }

    /// Non-zero values
    pub fn values(&self) -> &'a [T] {
        self.values
    }

    /// Column indices
    pub fn col_indices(&self) -> &'a [I] {
        self.col_indices
    }

    /// Row offsets
    pub fn row_ptrs(&self) -> &'a [I] {
        self.row_ptrs
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.row_ptrs.len() - 1
    }

    /// Number of columns
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Column indices and values of row `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_rows()`.
    pub fn row(&self, i: usize) -> (&'a [I], &'a [T]) {
        assert!(i < self.num_rows(), "Row index out of bounds");

        let start = self.row_ptrs[i].to_offset();
        let end = self.row_ptrs[i + 1].to_offset();
        (&self.col_indices[start..end], &self.values[start..end])
    }

    /// Iterator over `(col_indices, values)` of every row, in order
    pub fn rows(&self) -> impl ExactSizeIterator<Item = (&'a [I], &'a [T])> + 'a {
        let view = *self;
        (0..view.num_rows()).map(move |i| view.row(i))
    }
}

impl<'a, T: Sync, I: CsrIndex> CsrView<'a, T, I> {
    /// Parallel iterator over the rows; reads only, so any number of
    /// workers may share the view
    pub fn par_rows(&self) -> impl IndexedParallelIterator<Item = (&'a [I], &'a [T])> + 'a {
        let view = *self;
        (0..view.num_rows()).into_par_iter().map(move |i| view.row(i))
    }
}

impl<T, I: CsrIndex> CsrStorage<T, I> for CsrView<'_, T, I> {
    fn values(&self) -> &[T] {
        self.values
    }

    fn col_indices(&self) -> &[I] {
        self.col_indices
    }

    fn row_ptrs(&self) -> &[I] {
        self.row_ptrs
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }
}

/// Exclusive view of a CSR matrix allowing in-place element mutation
pub struct CsrViewMut<'a, T, I = u32> {
    values: &'a mut [T],
    col_indices: &'a mut [I],
    row_ptrs: &'a mut [I],
    num_cols: usize,
}

impl<'a, T, I: CsrIndex> CsrViewMut<'a, T, I> {
    /// Mutably borrow the arrays of `owner`
    pub fn new<S: CsrStorageMut<T, I> + ?Sized>(owner: &'a mut S) -> Self {
        let num_cols = owner.num_cols();
        let (values, col_indices, row_ptrs) = owner.parts_mut();
        Self {
            values,
            col_indices,
            row_ptrs,
            num_cols,
        }
    }

    /// Shorter-lived view over the same arrays, leaving `self` usable after
    pub fn reborrow(&mut self) -> CsrViewMut<'_, T, I> {
        CsrViewMut {
            values: &mut *self.values,
            col_indices: &mut *self.col_indices,
            row_ptrs: &mut *self.row_ptrs,
            num_cols: self.num_cols,
        }
    }

    /// Shared view for the duration of the borrow
    pub fn as_view(&self) -> CsrView<'_, T, I> {
        CsrView::new(self)
    }

    /// Give up mutability for the full lifetime
    pub fn into_view(self) -> CsrView<'a, T, I> {
        CsrView {
            values: self.values,
            col_indices: self.col_indices,
            row_ptrs: self.row_ptrs,
            num_cols: self.num_cols,
        }
    }

    pub fn values(&self) -> &[T] {
        &*self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut *self.values
    }

    pub fn col_indices(&self) -> &[I] {
        &*self.col_indices
    }

    pub fn col_indices_mut(&mut self) -> &mut [I] {
        &mut *self.col_indices
    }

    pub fn row_ptrs(&self) -> &[I] {
        &*self.row_ptrs
    }

    pub fn row_ptrs_mut(&mut self) -> &mut [I] {
        &mut *self.row_ptrs
    }

    pub fn num_rows(&self) -> usize {
        self.row_ptrs.len() - 1
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Column indices and values of row `i`
    pub fn row(&self, i: usize) -> (&[I], &[T]) {
        self.as_view().row(i)
    }

    /// Column indices of row `i` with its values open for writing
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_rows()`.
    pub fn row_mut(&mut self, i: usize) -> (&[I], &mut [T]) {
        assert!(i < self.num_rows(), "Row index out of bounds");

        let start = self.row_ptrs[i].to_offset();
        let end = self.row_ptrs[i + 1].to_offset();
        (&self.col_indices[start..end], &mut self.values[start..end])
    }

    /// Iterator handing out every row once, values writable
    ///
    /// Rows are disjoint, so the yielded slices may be kept and written
    /// concurrently, e.g. after collecting them for a thread pool.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (&[I], &mut [T])> + '_ {
        let cols: &[I] = &*self.col_indices;
        let mut rest: &mut [T] = &mut *self.values;
        let mut consumed = 0;

        self.row_ptrs.windows(2).map(move |pair| {
            let (start, end) = (pair[0].to_offset(), pair[1].to_offset());
            let tail = std::mem::take(&mut rest);
            let (row_values, tail) = tail[start - consumed..].split_at_mut(end - start);
            rest = tail;
            consumed = end;
            (&cols[start..end], row_values)
        })
    }
}

impl<T, I: CsrIndex> CsrStorage<T, I> for CsrViewMut<'_, T, I> {
    fn values(&self) -> &[T] {
        &*self.values
    }

    fn col_indices(&self) -> &[I] {
        &*self.col_indices
    }

    fn row_ptrs(&self) -> &[I] {
        &*self.row_ptrs
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }
}

impl<T, I: CsrIndex> CsrStorageMut<T, I> for CsrViewMut<'_, T, I> {
    fn parts_mut(&mut self) -> (&mut [T], &mut [I], &mut [I]) {
        (&mut *self.values, &mut *self.col_indices, &mut *self.row_ptrs)
    }
}
