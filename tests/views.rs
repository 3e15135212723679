//! View construction, aliasing and use from parallel contexts

use rayon::prelude::*;
use shared_csr::{Csr, CsrStorage, CsrView, CsrViewMut};

/// Create a 4x4 test matrix:
/// [1 2 0 0]
/// [0 3 4 0]
/// [0 0 5 6]
/// [7 0 0 8]
fn create_test_matrix() -> Csr<f64, u32> {
    Csr::from_slices(
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        &[0, 1, 1, 2, 2, 3, 0, 3],
        &[0, 2, 4, 6, 8],
        4,
    )
}

/// Row-wise dot products, the kind of routine views are handed to
fn row_dots(view: CsrView<'_, f64, u32>, x: &[f64]) -> Vec<f64> {
    view.rows()
        .map(|(cols, values)| cols.iter().zip(values).map(|(&c, v)| v * x[c as usize]).sum::<f64>())
        .collect()
}

#[test]
fn test_view_equivalence() {
    let matrix = create_test_matrix();
    let view: CsrView<'_, f64, u32> = CsrView::new(&matrix);

    assert_eq!(view.values(), matrix.values());
    assert_eq!(view.col_indices(), matrix.col_indices());
    assert_eq!(view.row_ptrs(), matrix.row_ptrs());
    assert_eq!(view.num_rows(), matrix.num_rows());
    assert_eq!(view.num_cols(), matrix.num_cols());
}

#[test]
fn test_view_aliases_storage() {
    let mut matrix = create_test_matrix();

    let mut view: CsrViewMut<'_, f64, u32> = CsrViewMut::new(&mut matrix);
    view.values_mut()[3] = 40.0;
    view.col_indices_mut()[3] = 3;

    assert_eq!(matrix.values()[3], 40.0);
    assert_eq!(matrix.row(1), (&[1u32, 3][..], &[3.0, 40.0][..]));
}

#[test]
fn test_views_are_copied_by_value() {
    let matrix = create_test_matrix();
    let view = matrix.view();

    let first = row_dots(view, &[1.0; 4]);
    let second = row_dots(view, &[1.0, 0.0, 0.0, 0.0]);

    assert_eq!(first, vec![3.0, 7.0, 11.0, 15.0]);
    assert_eq!(second, vec![1.0, 0.0, 0.0, 7.0]);
}

#[test]
fn test_generic_storage_consumers() {
    fn nnz_of<S: CsrStorage<f64, u32>>(storage: &S) -> usize {
        storage.values().len()
    }

    let mut matrix = create_test_matrix();
    assert_eq!(nnz_of(&matrix), 8);
    assert_eq!(nnz_of(&matrix.view()), 8);
    assert_eq!(nnz_of(&matrix.view_mut()), 8);
}

#[test]
fn test_view_shared_across_threads() {
    let matrix = create_test_matrix();
    let view = matrix.view();

    let totals: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..view.num_rows())
            .map(|i| scope.spawn(move || view.row(i).1.iter().sum::<f64>()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(totals, vec![3.0, 7.0, 11.0, 15.0]);
}

#[test]
fn test_par_rows_matches_sequential() {
    let matrix = create_test_matrix();
    let view = matrix.view();
    let x = [1.0, 2.0, 3.0, 4.0];

    let parallel: Vec<f64> = view
        .par_rows()
        .map(|(cols, values)| cols.iter().zip(values).map(|(&c, v)| v * x[c as usize]).sum::<f64>())
        .collect();

    assert_eq!(parallel, row_dots(view, &x));
}

#[test]
fn test_disjoint_rows_written_in_parallel() {
    let mut matrix = create_test_matrix();

    let mut view = matrix.view_mut();
    let mut rows: Vec<_> = view.rows_mut().collect();
    rows.par_iter_mut().for_each(|(_, values)| {
        for v in values.iter_mut() {
            *v *= 2.0;
        }
    });

    assert_eq!(matrix.values(), &[2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0]);
}

#[test]
fn test_empty_rows_in_views() {
    let mut matrix = Csr::<f32, u16>::from_slices(&[5.0], &[2], &[0, 0, 1, 1], 3);
    let view = matrix.view();

    assert_eq!(view.num_rows(), 3);
    assert!(view.row(0).0.is_empty());
    assert_eq!(view.row(1), (&[2u16][..], &[5.0f32][..]));
    assert!(view.row(2).1.is_empty());

    assert_eq!(matrix.view_mut().rows_mut().count(), 3);
}
