//! # Balancing of chemical equations
//!
//! The equation is turned into a matrix (elements x compounds, products with minus sign), the matrix
//! is reduced by [`IntegerReducer`], and the coefficients are read from the last column of the
//! reduced matrix. After the final pass every pivot row f reads `L*x_f + c_f*x_last = 0`, so with
//! `x_last = L` every other coefficient is `|c_f|`. If the last compound has no pivot row of its own
//! (the matrix has fewer nonzero rows than compounds) it gets `L = |entry[0, 0]|`.
//!
//! Only systems with one degree of freedom are solved. A zero coefficient means that some compound
//! cannot take part in the reaction, such equations are rejected. The found coefficients are
//! checked against element conservation before they are written into the equation; on any error
//! the equation is left untouched.
//!
//! ```
//! use KiBalance::Stoichiometry::equation_balancer::balance_str;
//! assert_eq!(
//!     balance_str("Cu + HNO3 > Cu(NO3)2 + NO + H2O").unwrap(),
//!     "3Cu + 8HNO3 > 3Cu(NO3)2 + 2NO + 4H2O"
//! );
//! ```
use crate::Stoichiometry::element_catalog::ElementCatalog;
use crate::Stoichiometry::equation::{Equation, parse_equation};
use crate::Stoichiometry::errors::BalanceError;
use crate::Stoichiometry::integer_reducer::IntegerReducer;
use crate::Stoichiometry::stoich_matrix::StoichMatrix;
use log::{debug, info, warn};

/// element catalog and matrix of the equation before reduction
pub fn build_matrix(equation: &Equation) -> Result<(ElementCatalog, StoichMatrix), BalanceError> {
    let catalog = ElementCatalog::from_equation(equation);
    let matrix =
        StoichMatrix::from_compounds(&catalog, equation.reactants(), equation.products())?;
    Ok((catalog, matrix))
}

/// reads coefficients (reactants first) from the reduced matrix.
/// `reactant_count` is the number of reactant columns
pub fn coefficients_from_matrix(
    matrix: &StoichMatrix,
    reactant_count: usize,
) -> Result<Vec<u64>, BalanceError> {
    if !matrix.is_reduced() {
        return Err(BalanceError::UnfilledMatrix);
    }
    let last = matrix.columns() - 1;
    let non_zero_rows = matrix.count_non_zero_rows();
    let mut coefficients = Vec::with_capacity(matrix.columns());
    for column in 0..matrix.columns() {
        let value = if column < reactant_count || column < non_zero_rows {
            matrix.get(column, last)?
        } else {
            // free compound: its coefficient is the common pivot
            matrix.get(0, 0)?
        };
        coefficients.push(value.unsigned_abs());
    }
    Ok(coefficients)
}

/// balances the equation and returns the reduced matrix
pub fn solve(equation: &mut Equation) -> Result<StoichMatrix, BalanceError> {
    let (catalog, mut matrix) = build_matrix(equation)?;
    IntegerReducer::reduce(&mut matrix)?;
    let non_zero_rows = matrix.count_non_zero_rows();
    if matrix.columns() > non_zero_rows + 1 {
        warn!(
            "{} compounds and only {} independent elements, the equation has more than one solution",
            matrix.columns(),
            non_zero_rows
        );
        return Err(BalanceError::CannotResolve);
    }
    let coefficients = coefficients_from_matrix(&matrix, equation.reactants().len())?;
    if let Some((compound, _)) = equation
        .compounds()
        .zip(coefficients.iter())
        .find(|(_, k)| **k == 0)
    {
        return Err(BalanceError::ZeroCoefficient(compound.formula()));
    }
    if !equation.is_conserved_with(&coefficients) {
        warn!(
            "coefficients {:?} do not conserve elements {:?}",
            coefficients,
            catalog.ordered_symbols()
        );
        return Err(BalanceError::CannotResolve);
    }
    debug!("coefficients: {:?}", coefficients);
    equation.assign_coefficients(&coefficients);
    Ok(matrix)
}

/// balances the equation in place
pub fn balance(equation: &mut Equation) -> Result<(), BalanceError> {
    solve(equation)?;
    info!("balanced: {}", equation);
    Ok(())
}

/// parses, balances and formats the equation text
pub fn balance_str(text: &str) -> Result<String, BalanceError> {
    let mut equation = parse_equation(text)?;
    balance(&mut equation)?;
    Ok(equation.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water() {
        let mut equation = parse_equation("H2+O2>H2O").unwrap();
        let matrix = solve(&mut equation).unwrap();
        assert_eq!(matrix.row(0).unwrap(), vec![2, 0, -2]);
        assert_eq!(matrix.row(1).unwrap(), vec![0, 2, -1]);
        assert_eq!(equation.coefficients(), Some((vec![2, 1], vec![2])));
        assert_eq!(equation.to_string(), "2H2 + O2 > 2H2O");
    }

    #[test]
    fn test_free_compound_takes_the_common_pivot() {
        // three nonzero rows, four compounds: CO has no pivot row
        let mut equation = parse_equation("Fe2O3+C>FeO+CO").unwrap();
        let matrix = solve(&mut equation).unwrap();
        assert_eq!(matrix.count_non_zero_rows(), 3);
        assert_eq!(matrix.get(0, 0).unwrap(), 1);
        assert_eq!(equation.coefficients(), Some((vec![1, 1], vec![2, 1])));
        assert_eq!(equation.to_string(), "Fe2O3 + C > 2FeO + CO");
    }

    #[test]
    fn test_free_compound_with_pivot_above_one() {
        let mut equation = parse_equation("Al+O2>Al2O3").unwrap();
        let matrix = solve(&mut equation).unwrap();
        assert_eq!(matrix.get(0, 0).unwrap(), 2);
        assert_eq!(equation.to_string(), "4Al + 3O2 > 2Al2O3");
    }

    #[test]
    fn test_coefficients_need_reduced_matrix() {
        let equation = parse_equation("H2+O2>H2O").unwrap();
        let (_, matrix) = build_matrix(&equation).unwrap();
        assert_eq!(
            coefficients_from_matrix(&matrix, 2),
            Err(BalanceError::UnfilledMatrix)
        );
    }

    #[test]
    fn test_zero_coefficient() {
        let mut equation = parse_equation("H>O").unwrap();
        assert_eq!(
            balance(&mut equation),
            Err(BalanceError::ZeroCoefficient("H".to_string()))
        );
        assert!(equation.compounds().all(|c| c.count().is_none()));
        assert!(matches!(
            balance_str("NO2>N2O3"),
            Err(BalanceError::ZeroCoefficient(_))
        ));
        assert!(matches!(
            balance_str("Na+H2O>NaOH"),
            Err(BalanceError::ZeroCoefficient(_))
        ));
    }

    #[test]
    fn test_more_than_one_degree_of_freedom() {
        let mut equation = parse_equation("N2O+N2O5>NO+NO2").unwrap();
        assert_eq!(balance(&mut equation), Err(BalanceError::CannotResolve));
        assert!(equation.coefficients().is_none());
        assert_eq!(
            balance_str("H2+O2>H2O+H2O2"),
            Err(BalanceError::CannotResolve)
        );
        assert_eq!(balance_str("O2+O3>H2"), Err(BalanceError::CannotResolve));
    }

    #[test]
    fn test_errors_of_parsing_pass_through() {
        assert!(matches!(
            balance_str("Hs>Lf>Hs"),
            Err(BalanceError::WrongSideCount(_))
        ));
        assert_eq!(balance_str("Hs>"), Err(BalanceError::EmptyCompound));
        assert_eq!(balance_str("Hss>Hss"), Err(BalanceError::InvalidCharacter('s')));
    }
}
