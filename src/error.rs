//! Error types for shared-csr

use thiserror::Error;

/// Result type alias using shared-csr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Conditions under which a matrix or a memory resource refuses to exist
///
/// The matrix constructors treat every variant as a fatal precondition
/// violation and panic with its message; `try_` constructors hand it back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `values` and `col_indices` differ in length
    #[error("values.len() ({values}) must equal col_indices.len() ({col_indices})")]
    LengthMismatch {
        /// Length of the values sequence
        values: usize,
        /// Length of the column index sequence
        col_indices: usize,
    },

    /// No row offsets at all, not even the leading zero
    #[error("row_ptrs must not be empty")]
    EmptyRowPtrs,

    /// First row offset is not zero
    #[error("row_ptrs[0] must be 0")]
    NonZeroFirstRowPtr,

    /// `row_ptrs[row + 1] < row_ptrs[row]`
    #[error("row_ptrs must be non-decreasing (row {row})")]
    RowPtrsOutOfOrder {
        /// Row whose end offset precedes its start offset
        row: usize,
    },

    /// A row offset points past the stored entries
    #[error("row_ptrs[{row}] = {offset} is out of bounds for {nnz} entries")]
    RowPtrsOutOfBounds {
        /// Position in row_ptrs
        row: usize,
        /// Offending offset
        offset: usize,
        /// Number of stored entries
        nnz: usize,
    },

    /// Column indices of a row are not strictly ascending
    #[error("col_indices of row {row} must be strictly ascending")]
    UnsortedColumns {
        /// Row with unsorted or duplicate columns
        row: usize,
    },

    /// Requested alignment is not a power of two
    #[error("alignment {alignment} is not a power of two")]
    InvalidAlignment {
        /// The rejected alignment
        alignment: usize,
    },

    /// The memory resource could not satisfy a request
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::LengthMismatch {
            values: 2,
            col_indices: 1,
        };
        assert_eq!(
            err.to_string(),
            "values.len() (2) must equal col_indices.len() (1)"
        );
        assert_eq!(Error::NonZeroFirstRowPtr.to_string(), "row_ptrs[0] must be 0");
        assert_eq!(
            Error::UnsortedColumns { row: 0 }.to_string(),
            "col_indices of row 0 must be strictly ascending"
        );
    }
}
