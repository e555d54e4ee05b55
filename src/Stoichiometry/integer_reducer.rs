/// Fraction-free elimination of the equation matrix.
///
/// Every column f (while there is a diagonal entry [f, f]) is cleared above and below the pivot,
/// a zero pivot is first replaced by a lower row with nonzero entry in that column, the search
/// goes from the bottom row up. When all columns are processed the pivots are brought to a common
/// multiple L, so every pivot row reads `L*x_f + c_f*x_last = 0`.
use crate::Stoichiometry::errors::BalanceError;
use crate::Stoichiometry::integer_math::lcm_of;
use crate::Stoichiometry::stoich_matrix::StoichMatrix;
use log::{debug, warn};

pub struct IntegerReducer;

impl IntegerReducer {
    pub fn reduce(matrix: &mut StoichMatrix) -> Result<(), BalanceError> {
        let rows = matrix.rows();
        let columns = matrix.columns();
        let mut f = 0;
        while f < rows && f < columns {
            if matrix.get(f, f)? == 0 {
                Self::find_pivot(matrix, f)?;
            }
            matrix.eliminate_column_using_row(f)?;
            debug!("column {} eliminated:\n{}", f, matrix);
            f += 1;
        }
        Self::equalize_pivots(matrix)?;
        matrix.mark_reduced();
        debug!("reduced matrix:\n{}", matrix);
        Ok(())
    }

    /// swaps into position f the lowest row below f with nonzero entry in column f.
    /// Zero pivot is kept when there is no such row
    fn find_pivot(matrix: &mut StoichMatrix, f: usize) -> Result<(), BalanceError> {
        for r in (f + 1..matrix.rows()).rev() {
            if matrix.get(r, f)? != 0 {
                matrix.swap_rows(f, r)?;
                return Ok(());
            }
        }
        Ok(())
    }

    /// scales every nonzero row so that its pivot becomes the lcm of all pivots
    fn equalize_pivots(matrix: &mut StoichMatrix) -> Result<(), BalanceError> {
        let non_zero_rows = matrix.count_non_zero_rows();
        let pivots: Vec<i64> = matrix
            .diagonal()
            .into_iter()
            .take(non_zero_rows)
            .collect();
        let multiple = lcm_of(&pivots)?;
        for (f, &pivot) in pivots.iter().enumerate() {
            if pivot == 0 {
                warn!("zero pivot in row {}, the system has no unique solution", f);
                return Err(BalanceError::CannotResolve);
            }
            matrix.scale_row(f, multiple / pivot)?;
        }
        Ok(())
    }
}
