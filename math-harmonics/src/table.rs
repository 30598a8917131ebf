//! Packed triangular storage for (order, degree) indexed batches
//!
//! Every associated Legendre function and spherical harmonic is keyed by a
//! pair `(m, l)` with `0 <= m <= l <= L`. The table stores one row of `N`
//! values per pair in a single preallocated `Array2`, laid out by ascending
//! `m` and then ascending `l`:
//!
//! ```text
//! row:  0      1      ...  L      L+1    ...  2L     ...
//! key:  (0,0)  (0,1)  ...  (0,L)  (1,1)  ...  (1,L)  ...  (L,L)
//! ```
//!
//! This is the order in which the recurrences fill the table, so engines
//! write rows front to back.

use ndarray::{Array2, ArrayView1, ArrayViewMut1};
use num_traits::Zero;

/// Number of `(m, l)` pairs with `0 <= m <= l <= max_degree`.
pub fn triangular_len(max_degree: usize) -> usize {
    (max_degree + 1) * (max_degree + 2) / 2
}

/// Table of batches indexed by `(m, l)` with `0 <= m <= l <= L`.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularTable<T> {
    max_degree: usize,
    data: Array2<T>,
}

impl<T: Clone + Zero> TriangularTable<T> {
    /// Allocate a zero-filled table for degrees up to `max_degree` and
    /// batches of `n_points` values.
    pub fn zeros(max_degree: usize, n_points: usize) -> Self {
        Self {
            max_degree,
            data: Array2::zeros((triangular_len(max_degree), n_points)),
        }
    }
}

impl<T> TriangularTable<T> {
    /// Maximum degree L
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Batch length N
    pub fn n_points(&self) -> usize {
        self.data.ncols()
    }

    /// Number of `(m, l)` entries, `(L+1)(L+2)/2`
    pub fn num_entries(&self) -> usize {
        self.data.nrows()
    }

    /// Whether `(m, l)` lies inside the triangle.
    pub fn contains(&self, m: usize, l: usize) -> bool {
        m <= l && l <= self.max_degree
    }

    /// Row of entry `(m, l)` in the packed layout.
    ///
    /// Rows before order `m` hold `sum_{k<m} (L+1-k) = m(2L+3-m)/2` entries.
    pub fn offset(&self, m: usize, l: usize) -> usize {
        debug_assert!(self.contains(m, l), "({m}, {l}) outside table");
        m * (2 * self.max_degree + 3 - m) / 2 + (l - m)
    }

    /// Batch for `(m, l)`.
    ///
    /// # Panics
    /// If `m > l` or `l > L`.
    pub fn get(&self, m: usize, l: usize) -> ArrayView1<'_, T> {
        assert!(
            self.contains(m, l),
            "({m}, {l}) outside triangular table of degree {}",
            self.max_degree
        );
        self.data.row(self.offset(m, l))
    }

    /// Batch for `(m, l)`, or `None` outside the triangle.
    pub fn try_get(&self, m: usize, l: usize) -> Option<ArrayView1<'_, T>> {
        self.contains(m, l).then(|| self.data.row(self.offset(m, l)))
    }

    /// Mutable batch for `(m, l)`.
    ///
    /// # Panics
    /// If `m > l` or `l > L`.
    pub fn get_mut(&mut self, m: usize, l: usize) -> ArrayViewMut1<'_, T> {
        assert!(
            self.contains(m, l),
            "({m}, {l}) outside triangular table of degree {}",
            self.max_degree
        );
        let row = self.offset(m, l);
        self.data.row_mut(row)
    }

    /// Keys in storage order: ascending `m`, then ascending `l`.
    pub fn keys(&self) -> impl Iterator<Item = (usize, usize)> {
        let max_degree = self.max_degree;
        (0..=max_degree).flat_map(move |m| (m..=max_degree).map(move |l| (m, l)))
    }

    /// `((m, l), batch)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), ArrayView1<'_, T>)> {
        self.keys().zip(self.data.rows())
    }

    /// Underlying `(entries, N)` array.
    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    /// Consume the table, returning the `(entries, N)` array.
    pub fn into_array(self) -> Array2<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangular_len() {
        assert_eq!(triangular_len(0), 1);
        assert_eq!(triangular_len(1), 3);
        assert_eq!(triangular_len(6), 28);
    }

    #[test]
    fn test_offsets_follow_storage_order() {
        let table = TriangularTable::<f64>::zeros(5, 3);
        for (row, (m, l)) in table.keys().enumerate() {
            assert_eq!(table.offset(m, l), row, "offset of ({m}, {l})");
        }
        assert_eq!(table.keys().count(), table.num_entries());
    }

    #[test]
    fn test_keys_ascending_order_then_degree() {
        let table = TriangularTable::<f64>::zeros(2, 1);
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_get_mut_writes_single_row() {
        let mut table = TriangularTable::<f64>::zeros(3, 2);
        table.get_mut(1, 2).fill(4.0);

        for ((m, l), row) in table.iter() {
            let expected = if (m, l) == (1, 2) { 4.0 } else { 0.0 };
            assert!(row.iter().all(|&v| v == expected));
        }
    }

    #[test]
    fn test_try_get_outside_triangle() {
        let table = TriangularTable::<f64>::zeros(2, 4);
        assert!(table.try_get(2, 1).is_none());
        assert!(table.try_get(0, 3).is_none());
        assert_eq!(table.try_get(2, 2).map(|r| r.len()), Some(4));
    }

    #[test]
    #[should_panic]
    fn test_get_order_above_degree_panics() {
        let table = TriangularTable::<f64>::zeros(2, 1);
        let _ = table.get(2, 1);
    }

    #[test]
    fn test_empty_batch() {
        let table = TriangularTable::<f64>::zeros(3, 0);
        assert_eq!(table.n_points(), 0);
        assert_eq!(table.num_entries(), 10);
        assert_eq!(table.get(3, 3).len(), 0);
    }

    #[test]
    fn test_into_array_keeps_storage_rows() {
        let mut table = TriangularTable::<f64>::zeros(2, 2);
        table.get_mut(1, 1).fill(7.0);
        let row = table.offset(1, 1);
        let array = table.into_array();
        assert_eq!(array.dim(), (6, 2));
        assert!(array.row(row).iter().all(|&v| v == 7.0));
    }
}
