//! Dense row-major matrix with a runtime column count.

use crate::util::{Error, Result};

/// Row-major matrix. Decoders use it to hand back however many attributes
/// per row their format carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self { rows: 0, cols: 0, data: Vec::new() }
    }
}

impl<T: Copy> Matrix<T> {
    /// Wrap a flat buffer. `data.len()` must equal `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::other(format!("matrix {}x{} overflows", rows, cols)))?;
        if data.len() != expected {
            return Err(Error::other(format!(
                "matrix {}x{} needs {} values, got {}",
                rows,
                cols,
                expected,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Zero rows, `cols` columns.
    pub fn empty(cols: usize) -> Self {
        Self { rows: 0, cols, data: Vec::new() }
    }

    /// Build from equally sized rows.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };
        let cols = first.as_ref().len();
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::other(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Row slice. Panics if `r` is out of range.
    #[inline]
    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn get(&self, r: usize, c: usize) -> Option<T> {
        if r < self.rows && c < self.cols {
            Some(self.data[r * self.cols + c])
        } else {
            None
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |r| self.row(r))
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Copy of the leftmost `n` columns (all columns if there are fewer).
    pub fn left_cols(&self, n: usize) -> Self {
        let mut out = self.clone();
        out.truncate_cols(n);
        out
    }

    /// Drop every column past the first `n`. An empty matrix takes `n`
    /// columns so its shape stays `0 x n`.
    pub fn truncate_cols(&mut self, n: usize) {
        if self.rows == 0 {
            self.cols = n;
            self.data.clear();
            return;
        }
        if self.cols <= n {
            return;
        }
        let cols = self.cols;
        let mut write = 0;
        for r in 0..self.rows {
            for c in 0..n {
                self.data[write] = self.data[r * cols + c];
                write += 1;
            }
        }
        self.data.truncate(write);
        self.cols = n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_len() {
        assert!(Matrix::new(2, 2, vec![1, 2, 3]).is_err());
        let m = Matrix::new(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.get(1, 0), Some(3));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_from_rows_uneven() {
        let rows: Vec<Vec<i32>> = vec![vec![0, 1, 2], vec![0, 1]];
        assert!(Matrix::<i32>::from_rows(rows.as_slice()).is_err());
    }

    #[test]
    fn test_truncate_cols() {
        let mut m = Matrix::<i32>::from_rows(&[[1, 2, 3, 4, 5], [6, 7, 8, 9, 10]]).unwrap();
        m.truncate_cols(3);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.row(0), &[1, 2, 3]);
        assert_eq!(m.row(1), &[6, 7, 8]);
    }

    #[test]
    fn test_truncate_narrow_is_noop() {
        let m = Matrix::<f32>::from_rows(&[[1.0f32, 2.0]]).unwrap();
        assert_eq!(m.left_cols(3), m);
    }

    #[test]
    fn test_truncate_empty_sets_width() {
        let mut m: Matrix<f32> = Matrix::default();
        m.truncate_cols(3);
        assert_eq!((m.rows(), m.cols()), (0, 3));
    }
}
