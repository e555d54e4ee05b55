//! # Matrix of the chemical equation
//!
//! Rows are chemical elements (in the order of [`ElementCatalog`]), columns are compounds,
//! reactants first. Entry `[r, c]` is the number of atoms of element `r` in one molecule of compound
//! `c`, taken with minus sign for products. For `H2 + O2 > H2O`:
//!
//! ```text
//!      H2  O2  H2O
//!  H [  2   0   -2 ]
//!  O [  0   2   -1 ]
//! ```
//!
//! The matrix keeps integer entries during elimination: before rows are combined the target column
//! is brought to a common multiple, after every combination a row is divided by the gcd of its
//! entries. All row and column arguments are checked, arithmetic overflow is reported, not wrapped.
use crate::Stoichiometry::element_catalog::ElementCatalog;
use crate::Stoichiometry::equation::Compound;
use crate::Stoichiometry::errors::BalanceError;
use crate::Stoichiometry::integer_math::{gcd_of, lcm_of};
use log::{debug, warn};
use nalgebra::DMatrix;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct StoichMatrix {
    data: DMatrix<i64>,
    /// set by the reducer when elimination has finished
    reduced: bool,
}

impl StoichMatrix {
    /// zero matrix rows x columns
    pub fn new(rows: usize, columns: usize) -> Result<Self, BalanceError> {
        if rows == 0 || columns == 0 {
            return Err(BalanceError::EmptyMatrix);
        }
        Ok(Self {
            data: DMatrix::zeros(rows, columns),
            reduced: false,
        })
    }

    /// matrix from a vector of rows of equal length
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, BalanceError> {
        let columns = rows.first().map(|row| row.len()).unwrap_or(0);
        let mut matrix = Self::new(rows.len(), columns)?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(BalanceError::IndexOutOfRange {
                    index: row.len(),
                    limit: columns,
                });
            }
            for (c, &value) in row.iter().enumerate() {
                matrix.data[(r, c)] = value;
            }
        }
        Ok(matrix)
    }

    /// matrix of the equation: element counts of reactants with plus sign, of products with minus sign
    pub fn from_compounds(
        catalog: &ElementCatalog,
        reactants: &[Compound],
        products: &[Compound],
    ) -> Result<Self, BalanceError> {
        let mut matrix = Self::new(catalog.element_count(), reactants.len() + products.len())?;
        let columns = reactants
            .iter()
            .map(|c| (c, 1i64))
            .chain(products.iter().map(|c| (c, -1i64)));
        for (c, (compound, sign)) in columns.enumerate() {
            for (r, symbol) in catalog.ordered_symbols().iter().enumerate() {
                let atoms = catalog.count_of_element_across_compound(symbol, compound);
                let atoms = i64::try_from(atoms).map_err(|_| BalanceError::CannotResolve)?;
                matrix.data[(r, c)] = sign * atoms;
            }
        }
        debug!("matrix of the equation:\n{}", matrix);
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn columns(&self) -> usize {
        self.data.ncols()
    }

    /// true after the reducer has finished elimination
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    pub(crate) fn mark_reduced(&mut self) {
        self.reduced = true;
    }

    /// underlying nalgebra matrix
    pub fn as_dmatrix(&self) -> &DMatrix<i64> {
        &self.data
    }

    fn check_row(&self, row: usize) -> Result<(), BalanceError> {
        if row >= self.rows() {
            return Err(BalanceError::IndexOutOfRange {
                index: row,
                limit: self.rows(),
            });
        }
        Ok(())
    }

    fn check_column(&self, column: usize) -> Result<(), BalanceError> {
        if column >= self.columns() {
            return Err(BalanceError::IndexOutOfRange {
                index: column,
                limit: self.columns(),
            });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, column: usize) -> Result<i64, BalanceError> {
        self.check_row(row)?;
        self.check_column(column)?;
        Ok(self.data[(row, column)])
    }

    pub fn set(&mut self, row: usize, column: usize, value: i64) -> Result<(), BalanceError> {
        self.check_row(row)?;
        self.check_column(column)?;
        self.data[(row, column)] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<Vec<i64>, BalanceError> {
        self.check_row(row)?;
        Ok(self.data.row(row).iter().copied().collect())
    }

    pub fn column(&self, column: usize) -> Result<Vec<i64>, BalanceError> {
        self.check_column(column)?;
        Ok(self.data.column(column).iter().copied().collect())
    }

    /// entries of the main diagonal
    pub fn diagonal(&self) -> Vec<i64> {
        let length = self.rows().min(self.columns());
        (0..length).map(|i| self.data[(i, i)]).collect()
    }

    pub fn swap_rows(&mut self, first: usize, second: usize) -> Result<(), BalanceError> {
        self.check_row(first)?;
        self.check_row(second)?;
        if first != second {
            self.data.swap_rows(first, second);
        }
        Ok(())
    }

    /// multiplies every entry of the row by `factor`
    pub fn scale_row(&mut self, row: usize, factor: i64) -> Result<(), BalanceError> {
        self.check_row(row)?;
        for c in 0..self.columns() {
            self.data[(row, c)] = self.data[(row, c)]
                .checked_mul(factor)
                .ok_or_else(overflow)?;
        }
        Ok(())
    }

    /// divides the row by the gcd of its nonzero entries, the first nonzero entry becomes positive.
    /// Zero row stays as it is
    pub fn reduce_row_to_lowest_terms(&mut self, row: usize) -> Result<(), BalanceError> {
        let values = self.row(row)?;
        let divisor = gcd_of(&values)?;
        for c in 0..self.columns() {
            self.data[(row, c)] /= divisor;
        }
        Ok(())
    }

    /// scales rows so that all nonzero entries of the column get the same magnitude (the lcm of the
    /// column). Does nothing when the diagonal entry `[column, column]` is zero
    pub fn equalize_column(&mut self, column: usize) -> Result<(), BalanceError> {
        self.check_column(column)?;
        self.check_row(column)?;
        if self.data[(column, column)] == 0 {
            return Ok(());
        }
        let multiple = lcm_of(&self.column(column)?)?;
        for r in 0..self.rows() {
            let entry = self.data[(r, column)];
            if entry == 0 {
                continue;
            }
            self.scale_row(r, multiple / entry)?;
        }
        Ok(())
    }

    /// makes column `pivot_row` zero in every row except the pivot row itself. The column is
    /// equalized first, so adding or subtracting the pivot row cancels the entry exactly
    pub fn eliminate_column_using_row(&mut self, pivot_row: usize) -> Result<(), BalanceError> {
        self.check_row(pivot_row)?;
        self.check_column(pivot_row)?;
        self.equalize_column(pivot_row)?;
        for r in 0..self.rows() {
            let entry = self.data[(r, pivot_row)];
            if r == pivot_row || entry == 0 {
                continue;
            }
            for c in 0..self.columns() {
                let pivot_value = self.data[(pivot_row, c)];
                let value = self.data[(r, c)];
                self.data[(r, c)] = if entry < 0 {
                    value.checked_add(pivot_value)
                } else {
                    value.checked_sub(pivot_value)
                }
                .ok_or_else(overflow)?;
            }
            self.reduce_row_to_lowest_terms(r)?;
        }
        self.reduce_row_to_lowest_terms(pivot_row)
    }

    /// index + 1 of the last row with a nonzero entry, 0 for zero matrix.
    /// After elimination it is the rank of the matrix
    pub fn count_non_zero_rows(&self) -> usize {
        (0..self.rows())
            .rev()
            .find(|&r| self.data.row(r).iter().any(|&v| v != 0))
            .map(|r| r + 1)
            .unwrap_or(0)
    }
}

fn overflow() -> BalanceError {
    warn!("integer overflow during elimination");
    BalanceError::CannotResolve
}

impl fmt::Display for StoichMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            let row: Vec<String> = self
                .data
                .row(r)
                .iter()
                .map(|v| format!("{:>4}", v))
                .collect();
            writeln!(f, "[{} ]", row.join(""))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matrix() {
        assert_eq!(StoichMatrix::new(0, 3), Err(BalanceError::EmptyMatrix));
        assert_eq!(StoichMatrix::new(2, 0), Err(BalanceError::EmptyMatrix));
        assert_eq!(StoichMatrix::from_rows(&[]), Err(BalanceError::EmptyMatrix));
        assert!(StoichMatrix::from_rows(&[vec![1, 2], vec![3]]).is_err());
    }

    #[test]
    fn test_matrix_from_compounds() {
        let reactants = vec![
            Compound::parse("H2").unwrap(),
            Compound::parse("O2").unwrap(),
        ];
        let products = vec![Compound::parse("H2O").unwrap()];
        let catalog = ElementCatalog::from_compounds(reactants.iter().chain(products.iter()));
        let matrix = StoichMatrix::from_compounds(&catalog, &reactants, &products).unwrap();
        println!("{}", matrix);
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.columns(), 3);
        assert_eq!(matrix.row(0).unwrap(), vec![2, 0, -2]);
        assert_eq!(matrix.row(1).unwrap(), vec![0, 2, -1]);
        assert!(!matrix.is_reduced());
    }

    #[test]
    fn test_bounds_are_checked() {
        let mut matrix = StoichMatrix::new(2, 3).unwrap();
        assert_eq!(
            matrix.get(2, 0),
            Err(BalanceError::IndexOutOfRange { index: 2, limit: 2 })
        );
        assert_eq!(
            matrix.set(0, 3, 1),
            Err(BalanceError::IndexOutOfRange { index: 3, limit: 3 })
        );
        assert!(matrix.swap_rows(0, 5).is_err());
        assert!(matrix.scale_row(7, 2).is_err());
        assert!(matrix.reduce_row_to_lowest_terms(2).is_err());
        assert!(matrix.equalize_column(3).is_err());
        // column 2 exists but there is no diagonal entry [2, 2]
        assert!(matrix.equalize_column(2).is_err());
        assert!(matrix.eliminate_column_using_row(2).is_err());
        assert!(matrix.column(3).is_err());
    }

    #[test]
    fn test_swap_and_scale() {
        let mut matrix = StoichMatrix::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        matrix.swap_rows(0, 1).unwrap();
        assert_eq!(matrix.row(0).unwrap(), vec![3, 4]);
        matrix.scale_row(1, -3).unwrap();
        assert_eq!(matrix.row(1).unwrap(), vec![-3, -6]);
        matrix.swap_rows(1, 1).unwrap();
        assert_eq!(matrix.row(1).unwrap(), vec![-3, -6]);
    }

    #[test]
    fn test_scale_overflow() {
        let mut matrix = StoichMatrix::from_rows(&[vec![i64::MAX / 2, 1]]).unwrap();
        assert_eq!(matrix.scale_row(0, 3), Err(BalanceError::CannotResolve));
    }

    #[test]
    fn test_reduce_row_to_lowest_terms() {
        let mut matrix =
            StoichMatrix::from_rows(&[vec![0, -4, 6, 8], vec![0, 0, 0, 0], vec![6, 0, -3, 0]])
                .unwrap();
        matrix.reduce_row_to_lowest_terms(0).unwrap();
        assert_eq!(matrix.row(0).unwrap(), vec![0, 2, -3, -4]);
        matrix.reduce_row_to_lowest_terms(1).unwrap();
        assert_eq!(matrix.row(1).unwrap(), vec![0, 0, 0, 0]);
        matrix.reduce_row_to_lowest_terms(2).unwrap();
        assert_eq!(matrix.row(2).unwrap(), vec![2, 0, -1, 0]);
    }

    #[test]
    fn test_equalize_column() {
        let mut matrix =
            StoichMatrix::from_rows(&[vec![2, 0, -1, 0], vec![3, 0, -1, -1], vec![0, 1, 0, -1]])
                .unwrap();
        matrix.equalize_column(0).unwrap();
        assert_eq!(matrix.row(0).unwrap(), vec![6, 0, -3, 0]);
        assert_eq!(matrix.row(1).unwrap(), vec![6, 0, -2, -2]);
        assert_eq!(matrix.row(2).unwrap(), vec![0, 1, 0, -1]);

        // negative entries get a negative factor
        let mut matrix = StoichMatrix::from_rows(&[vec![-2, 0], vec![1, 3], vec![4, 1]]).unwrap();
        matrix.equalize_column(0).unwrap();
        assert_eq!(matrix.column(0).unwrap(), vec![4, 4, 4]);
        assert_eq!(matrix.row(1).unwrap(), vec![4, 12]);

        // zero diagonal entry: nothing happens
        let mut matrix = StoichMatrix::from_rows(&[vec![0, 1], vec![2, 3]]).unwrap();
        let before = matrix.clone();
        matrix.equalize_column(0).unwrap();
        assert_eq!(matrix, before);
    }

    #[test]
    fn test_eliminate_column_using_row() {
        let mut matrix =
            StoichMatrix::from_rows(&[vec![2, 0, -1, 0], vec![3, 0, -1, -1], vec![0, 1, 0, -1]])
                .unwrap();
        matrix.eliminate_column_using_row(0).unwrap();
        assert_eq!(matrix.row(0).unwrap(), vec![2, 0, -1, 0]);
        assert_eq!(matrix.row(1).unwrap(), vec![0, 0, 1, -2]);
        assert_eq!(matrix.row(2).unwrap(), vec![0, 1, 0, -1]);
    }

    #[test]
    fn test_count_non_zero_rows() {
        let matrix =
            StoichMatrix::from_rows(&[vec![1, 0], vec![0, 0], vec![0, 2], vec![0, 0]]).unwrap();
        assert_eq!(matrix.count_non_zero_rows(), 3);
        let matrix = StoichMatrix::new(3, 3).unwrap();
        assert_eq!(matrix.count_non_zero_rows(), 0);
        assert_eq!(matrix.diagonal(), vec![0, 0, 0]);
    }
}
