//! Property tests over randomly generated well-formed matrices

use proptest::prelude::*;
use shared_csr::Csr;

/// Raw CSR arrays with sorted, duplicate-free columns in every row
fn csr_parts() -> impl Strategy<Value = (Vec<i64>, Vec<u32>, Vec<u32>, usize)> {
    (1usize..32, 0usize..12).prop_flat_map(|(n_cols, n_rows)| {
        let columns: Vec<u32> = (0..n_cols as u32).collect();
        let rows = prop::collection::vec(prop::sample::subsequence(columns, 0..=n_cols), n_rows);
        (rows, Just(n_cols)).prop_flat_map(|(rows, n_cols)| {
            let nnz: usize = rows.iter().map(|r| r.len()).sum();
            (prop::collection::vec(any::<i64>(), nnz), Just(rows), Just(n_cols))
        })
    })
    .prop_map(|(values, rows, n_cols)| {
        let mut row_ptrs = vec![0u32];
        let mut col_indices = Vec::new();
        for row in rows {
            col_indices.extend(row);
            row_ptrs.push(col_indices.len() as u32);
        }
        (values, col_indices, row_ptrs, n_cols)
    })
}

proptest! {
    #[test]
    fn round_trip((values, col_indices, row_ptrs, n_cols) in csr_parts()) {
        let matrix = Csr::from_slices(&values, &col_indices, &row_ptrs, n_cols);

        prop_assert_eq!(matrix.values(), &values[..]);
        prop_assert_eq!(matrix.col_indices(), &col_indices[..]);
        prop_assert_eq!(matrix.row_ptrs(), &row_ptrs[..]);
        prop_assert_eq!(matrix.num_cols(), n_cols);
        prop_assert_eq!(matrix.num_rows(), row_ptrs.len() - 1);
    }

    #[test]
    fn view_reports_owner((values, col_indices, row_ptrs, n_cols) in csr_parts()) {
        let matrix = Csr::from_slices(&values, &col_indices, &row_ptrs, n_cols);
        let view = matrix.view();

        prop_assert_eq!(view.values(), matrix.values());
        prop_assert_eq!(view.col_indices(), matrix.col_indices());
        prop_assert_eq!(view.row_ptrs(), matrix.row_ptrs());
        prop_assert_eq!(view.num_rows(), matrix.num_rows());
        prop_assert_eq!(view.num_cols(), matrix.num_cols());

        let visited: usize = view.rows().map(|(cols, _)| cols.len()).sum();
        prop_assert_eq!(visited, matrix.nnz());
    }

    #[test]
    fn copies_are_deep((values, col_indices, row_ptrs, n_cols) in csr_parts()) {
        prop_assume!(!values.is_empty());

        let original = Csr::from_slices(&values, &col_indices, &row_ptrs, n_cols);
        let mut copy = original.clone();
        let bumped = copy.values()[0].wrapping_add(1);
        copy.values_mut()[0] = bumped;

        prop_assert_eq!(original.values(), &values[..]);
        prop_assert_ne!(copy.values()[0], original.values()[0]);
    }
}
