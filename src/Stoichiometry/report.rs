/// Summary of one balancing attempt: pretty tables for the terminal and JSON for files and pipes.
use crate::Stoichiometry::equation::parse_equation;
use crate::Stoichiometry::equation_balancer::{build_matrix, solve};
use crate::Stoichiometry::errors::BalanceError;
use crate::Stoichiometry::stoich_matrix::StoichMatrix;
use log::error;
use prettytable::{Cell, Row, Table, row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BalanceReport {
    /// equation text as it was given
    pub input: String,
    /// balanced equation, None on error
    pub balanced: Option<String>,
    pub error_kind: Option<String>,
    pub error_message: Option<String>,
    /// elements in the row order of the matrix
    pub elements: Vec<String>,
    /// formulas of compounds, reactants first
    pub compounds: Vec<String>,
    pub reactant_count: usize,
    /// coefficients in the order of `compounds`, empty on error
    pub coefficients: Vec<u64>,
    /// matrix of the equation, reduced one on success
    pub matrix: Vec<Vec<i64>>,
}

impl BalanceReport {
    /// parses and balances the text, every outcome ends up in the report
    pub fn from_text(text: &str) -> Self {
        let mut report = BalanceReport {
            input: text.trim().to_string(),
            ..Default::default()
        };
        let mut equation = match parse_equation(text) {
            Ok(equation) => equation,
            Err(e) => {
                report.set_error(&e);
                return report;
            }
        };
        report.compounds = equation.compounds().map(|c| c.formula()).collect();
        report.reactant_count = equation.reactants().len();
        if let Ok((catalog, matrix)) = build_matrix(&equation) {
            report.elements = catalog.ordered_symbols().to_vec();
            report.matrix = matrix_rows(&matrix);
        }
        match solve(&mut equation) {
            Ok(matrix) => {
                report.matrix = matrix_rows(&matrix);
                report.coefficients = equation.compounds().map(|c| c.effective_count()).collect();
                report.balanced = Some(equation.to_string());
            }
            Err(e) => report.set_error(&e),
        }
        report
    }

    fn set_error(&mut self, e: &BalanceError) {
        error!("{}: {}", self.input, e);
        self.error_kind = Some(e.kind().to_string());
        self.error_message = Some(e.to_string());
    }

    pub fn is_success(&self) -> bool {
        self.balanced.is_some()
    }

    /// one line answer: balanced equation or error message
    pub fn outcome(&self) -> String {
        match (&self.balanced, &self.error_message) {
            (Some(balanced), _) => balanced.clone(),
            (None, Some(message)) => format!("error: {}", message),
            (None, None) => String::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// compound | side | coefficient
    pub fn coefficient_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Compound", "Side", "Coefficient"]);
        for (i, formula) in self.compounds.iter().enumerate() {
            let side = if i < self.reactant_count {
                "reactant"
            } else {
                "product"
            };
            let coefficient = self
                .coefficients
                .get(i)
                .map(|k| k.to_string())
                .unwrap_or_else(|| "-".to_string());
            table.add_row(row![formula, side, coefficient]);
        }
        table
    }

    /// matrix with element names in the first column and compounds in the header
    pub fn matrix_table(&self) -> Table {
        let mut table = Table::new();
        let mut header = vec![Cell::new("")];
        header.extend(self.compounds.iter().map(|c| Cell::new(c)));
        table.add_row(Row::new(header));
        for (r, values) in self.matrix.iter().enumerate() {
            let name = self.elements.get(r).map(|s| s.as_str()).unwrap_or("");
            let mut cells = vec![Cell::new(name)];
            cells.extend(values.iter().map(|v| Cell::new(&v.to_string())));
            table.add_row(Row::new(cells));
        }
        table
    }

    pub fn print(&self, with_matrix: bool) {
        println!("{}", self.input);
        println!("{}", self.outcome());
        if self.is_success() {
            self.coefficient_table().printstd();
        }
        if with_matrix && !self.matrix.is_empty() {
            self.matrix_table().printstd();
        }
    }
}

fn matrix_rows(matrix: &StoichMatrix) -> Vec<Vec<i64>> {
    (0..matrix.rows())
        .filter_map(|r| matrix.row(r).ok())
        .collect()
}

/// input | result table for a list of reports
pub fn summary_table(reports: &[BalanceReport]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["#", "Equation", "Result"]);
    for (i, report) in reports.iter().enumerate() {
        table.add_row(row![(i + 1), report.input, report.outcome()]);
    }
    table
}

pub fn reports_to_json(reports: &[BalanceReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_of_balanced_equation() {
        let report = BalanceReport::from_text(" C3H8+O2>CO2+H2O ");
        assert!(report.is_success());
        assert_eq!(report.input, "C3H8+O2>CO2+H2O");
        assert_eq!(report.outcome(), "C3H8 + 5O2 > 3CO2 + 4H2O");
        assert_eq!(report.elements, vec!["C", "H", "O"]);
        assert_eq!(report.compounds, vec!["C3H8", "O2", "CO2", "H2O"]);
        assert_eq!(report.reactant_count, 2);
        assert_eq!(report.coefficients, vec![1, 5, 3, 4]);
        assert_eq!(report.matrix.len(), 3);
        assert!(report.error_kind.is_none());

        let table = report.coefficient_table();
        assert_eq!(table.len(), 5);
        let cell = table.get_row(2).and_then(|r| r.get_cell(2)).unwrap();
        assert_eq!(cell.get_content(), "5");
        assert_eq!(report.matrix_table().len(), 4);
    }

    #[test]
    fn test_report_of_failed_equation() {
        let report = BalanceReport::from_text("N2O+N2O5>NO+NO2");
        assert!(!report.is_success());
        assert_eq!(report.error_kind.as_deref(), Some("CannotResolve"));
        assert!(report.coefficients.is_empty());
        // matrix before reduction is still shown
        assert_eq!(report.elements, vec!["N", "O"]);
        assert_eq!(report.matrix[0], vec![2, 2, -1, -1]);
        assert_eq!(report.outcome(), "error: The equation cannot be balanced");

        let report = BalanceReport::from_text("Hs>Lf>Hs");
        assert_eq!(report.error_kind.as_deref(), Some("WrongSideCount"));
        assert!(report.compounds.is_empty());
        assert!(report.matrix.is_empty());
    }

    #[test]
    fn test_json_of_reports() {
        let reports = vec![
            BalanceReport::from_text("H2+O2>H2O"),
            BalanceReport::from_text("H>O"),
        ];
        let json = reports_to_json(&reports).unwrap();
        let parsed: Vec<BalanceReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reports);
        let value: serde_json::Value = serde_json::from_str(&reports[0].to_json().unwrap()).unwrap();
        assert_eq!(value["balanced"], "2H2 + O2 > 2H2O");
        assert_eq!(value["coefficients"][0], 2);
        assert_eq!(parsed[1].error_kind.as_deref(), Some("ZeroCoefficient"));
        assert_eq!(summary_table(&reports).len(), 3);
    }
}
