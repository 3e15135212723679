//! Structural invariants shared by every CSR construction path
//!
//! The cheap checks run unconditionally. The full scan over every row is
//! only compiled into the construction path when audit is enabled (debug
//! builds, or the `audit` feature); otherwise sortedness is a caller
//! precondition and is never re-verified.

use crate::error::{Error, Result};

use super::index::CsrIndex;

/// Whether constructors run the full row scan
pub const AUDIT_ENABLED: bool = cfg!(any(debug_assertions, feature = "audit"));

/// Always-on checks: equal lengths, non-empty offsets, leading zero
pub fn check_structure<I: CsrIndex>(values_len: usize, col_indices: &[I], row_ptrs: &[I]) -> Result<()> {
    if values_len != col_indices.len() {
        return Err(Error::LengthMismatch {
            values: values_len,
            col_indices: col_indices.len(),
        });
    }
    match row_ptrs.first() {
        None => Err(Error::EmptyRowPtrs),
        Some(first) if !first.is_zero() => Err(Error::NonZeroFirstRowPtr),
        Some(_) => Ok(()),
    }
}

/// Full scan: well-formed row ranges and strictly ascending columns per row
///
/// Expects `check_structure` to have passed.
pub fn check_sorted<I: CsrIndex>(col_indices: &[I], row_ptrs: &[I]) -> Result<()> {
    let nnz = col_indices.len();

    for (row, pair) in row_ptrs.windows(2).enumerate() {
        let (start, end) = (pair[0].to_offset(), pair[1].to_offset());
        if end < start {
            return Err(Error::RowPtrsOutOfOrder { row });
        }
        if end > nnz {
            return Err(Error::RowPtrsOutOfBounds {
                row: row + 1,
                offset: end,
                nnz,
            });
        }
        if col_indices[start..end].windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::UnsortedColumns { row });
        }
    }

    let last = row_ptrs.len() - 1;
    let total = row_ptrs[last].to_offset();
    if total != nnz {
        return Err(Error::RowPtrsOutOfBounds {
            row: last,
            offset: total,
            nnz,
        });
    }
    Ok(())
}

/// Run [`check_sorted`] when audit is enabled, succeed otherwise
#[inline]
pub fn audit<I: CsrIndex>(col_indices: &[I], row_ptrs: &[I]) -> Result<()> {
    #[cfg(any(debug_assertions, feature = "audit"))]
    {
        check_sorted(col_indices, row_ptrs)
    }
    #[cfg(not(any(debug_assertions, feature = "audit")))]
    {
        let _ = (col_indices, row_ptrs);
        Ok(())
    }
}
