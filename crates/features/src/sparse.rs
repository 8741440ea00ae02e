//! Sparse vector and matrix primitives.
//!
//! The feature space is wide (every distinct cast member is a column) and
//! each movie touches only a handful of columns, so everything downstream
//! of the encoder works on sparse data: a single-row [`SparseVector`] for
//! queries and a row-major CSR [`CsrMatrix`] for the catalog.

use rayon::prelude::*;

/// Magnitudes below this are treated as zero when computing cosine.
const NORM_EPSILON: f32 = 1e-12;

/// A single sparse row: sorted column indices with their nonzero values.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dims: usize,
    indices: Vec<usize>,
    values: Vec<f32>,
}

impl SparseVector {
    /// An all-zero vector with the given width
    pub fn zeros(dims: usize) -> Self {
        Self {
            dims,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from (column, value) pairs.
    ///
    /// Pairs are sorted by column, duplicate columns are summed, and zero
    /// values are dropped. Columns outside `dims` are a caller bug.
    pub fn from_pairs(dims: usize, mut pairs: Vec<(usize, f32)>) -> Self {
        pairs.sort_by_key(|(col, _)| *col);

        let mut indices = Vec::with_capacity(pairs.len());
        let mut values: Vec<f32> = Vec::with_capacity(pairs.len());
        for (col, value) in pairs {
            debug_assert!(col < dims, "column {} out of range ({})", col, dims);
            if let Some(last) = indices.last() {
                if *last == col {
                    let slot = values.len() - 1;
                    values[slot] += value;
                    continue;
                }
            }
            indices.push(col);
            values.push(value);
        }

        // Drop entries that cancelled out
        let mut vector = Self {
            dims,
            indices,
            values,
        };
        vector.prune_zeros();
        vector
    }

    fn prune_zeros(&mut self) {
        if self.values.iter().any(|v| *v == 0.0) {
            let kept: Vec<(usize, f32)> = self
                .indices
                .iter()
                .zip(&self.values)
                .filter(|(_, v)| **v != 0.0)
                .map(|(i, v)| (*i, *v))
                .collect();
            self.indices = kept.iter().map(|(i, _)| *i).collect();
            self.values = kept.iter().map(|(_, v)| *v).collect();
        }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of stored nonzero entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn l2_norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Scale to unit length; a zero vector stays zero
    pub fn normalize(&mut self) {
        let norm = self.l2_norm();
        if norm > NORM_EPSILON {
            for value in &mut self.values {
                *value /= norm;
            }
        }
    }

    /// Sparse dot product via two-pointer merge over sorted indices
    pub fn dot(&self, other: &Self) -> f32 {
        sparse_dot(&self.indices, &self.values, &other.indices, &other.values)
    }

    /// Column-wise concatenation of single rows, in block order.
    pub fn concat(blocks: &[Self]) -> Self {
        let dims = blocks.iter().map(|b| b.dims).sum();
        let nnz = blocks.iter().map(|b| b.nnz()).sum();

        let mut indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        let mut offset = 0;
        for block in blocks {
            indices.extend(block.indices.iter().map(|i| i + offset));
            values.extend_from_slice(&block.values);
            offset += block.dims;
        }

        Self {
            dims,
            indices,
            values,
        }
    }
}

fn sparse_dot(a_idx: &[usize], a_val: &[f32], b_idx: &[usize], b_val: &[f32]) -> f32 {
    let mut sum = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a_idx.len() && j < b_idx.len() {
        match a_idx[i].cmp(&b_idx[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a_val[i] * b_val[j];
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// Row-major compressed sparse matrix.
///
/// Read-only after construction; row order is the catalog row order.
#[derive(Debug, Clone)]
pub struct CsrMatrix {
    cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f32>,
}

impl CsrMatrix {
    /// Stack single rows into a matrix. Every row must have `cols` columns.
    pub fn from_rows(cols: usize, rows: &[SparseVector]) -> Self {
        let nnz = rows.iter().map(|r| r.nnz()).sum();
        let mut indptr = Vec::with_capacity(rows.len() + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        indptr.push(0);
        for row in rows {
            assert_eq!(row.dims(), cols, "row width does not match matrix width");
            indices.extend_from_slice(&row.indices);
            values.extend_from_slice(&row.values);
            indptr.push(indices.len());
        }

        Self {
            cols,
            indptr,
            indices,
            values,
        }
    }

    pub fn rows(&self) -> usize {
        self.indptr.len() - 1
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Borrow one row as (indices, values) slices
    pub fn row(&self, row: usize) -> (&[usize], &[f32]) {
        let start = self.indptr[row];
        let end = self.indptr[row + 1];
        (&self.indices[start..end], &self.values[start..end])
    }

    /// Clone one row out as a standalone vector
    pub fn row_vector(&self, row: usize) -> SparseVector {
        let (indices, values) = self.row(row);
        SparseVector {
            dims: self.cols,
            indices: indices.to_vec(),
            values: values.to_vec(),
        }
    }

    fn row_norm(&self, row: usize) -> f32 {
        let (_, values) = self.row(row);
        values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }
}

/// Cosine similarity of one query vector against every matrix row.
///
/// Rows are scored in parallel; the output is indexed by catalog row.
/// Degenerate rows (zero magnitude on either side) score 0.0, and results
/// are clamped against floating-point drift.
pub fn cosine_against_rows(query: &SparseVector, matrix: &CsrMatrix) -> Vec<f32> {
    debug_assert_eq!(query.dims(), matrix.cols());
    let query_norm = query.l2_norm();

    (0..matrix.rows())
        .into_par_iter()
        .map(|row| {
            let (indices, values) = matrix.row(row);
            let row_norm = matrix.row_norm(row);
            if query_norm < NORM_EPSILON || row_norm < NORM_EPSILON {
                return 0.0;
            }
            let dot = sparse_dot(&query.indices, &query.values, indices, values);
            (dot / (query_norm * row_norm)).clamp(-1.0, 1.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_sorts_and_merges() {
        let v = SparseVector::from_pairs(5, vec![(3, 1.0), (1, 2.0), (3, 0.5)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(1, 2.0), (3, 1.5)]);
    }

    #[test]
    fn dot_product_matches_dense() {
        let a = SparseVector::from_pairs(4, vec![(0, 1.0), (2, 2.0)]);
        let b = SparseVector::from_pairs(4, vec![(2, 3.0), (3, 1.0)]);
        assert_eq!(a.dot(&b), 6.0);
    }

    #[test]
    fn concat_offsets_block_columns() {
        let a = SparseVector::from_pairs(2, vec![(1, 1.0)]);
        let b = SparseVector::zeros(3);
        let c = SparseVector::from_pairs(2, vec![(0, 4.0)]);

        let joined = SparseVector::concat(&[a, b, c]);
        assert_eq!(joined.dims(), 7);
        assert_eq!(joined.iter().collect::<Vec<_>>(), vec![(1, 1.0), (5, 4.0)]);
    }

    #[test]
    fn normalize_produces_unit_length() {
        let mut v = SparseVector::from_pairs(3, vec![(0, 3.0), (1, 4.0)]);
        v.normalize();
        assert!((v.l2_norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_survives_normalize() {
        let mut v = SparseVector::zeros(3);
        v.normalize();
        assert!(v.is_zero());
    }

    #[test]
    fn cosine_of_row_against_itself_is_one() {
        let rows = vec![
            SparseVector::from_pairs(4, vec![(0, 1.0), (2, 2.0)]),
            SparseVector::from_pairs(4, vec![(1, 1.0)]),
        ];
        let matrix = CsrMatrix::from_rows(4, &rows);

        let scores = cosine_against_rows(&matrix.row_vector(0), &matrix);
        assert!((scores[0] - 1.0).abs() < 1e-6);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn cosine_with_zero_query_is_zero_everywhere() {
        let rows = vec![SparseVector::from_pairs(2, vec![(0, 1.0)])];
        let matrix = CsrMatrix::from_rows(2, &rows);

        let scores = cosine_against_rows(&SparseVector::zeros(2), &matrix);
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn matrix_round_trips_rows() {
        let rows = vec![
            SparseVector::from_pairs(3, vec![(0, 1.0), (2, 2.0)]),
            SparseVector::zeros(3),
            SparseVector::from_pairs(3, vec![(1, 5.0)]),
        ];
        let matrix = CsrMatrix::from_rows(3, &rows);

        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 3);
        assert_eq!(matrix.row_vector(1), SparseVector::zeros(3));
        assert_eq!(matrix.row_vector(2), rows[2]);
    }
}
