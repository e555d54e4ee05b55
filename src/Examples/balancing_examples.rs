use crate::Stoichiometry::report::{BalanceReport, summary_table};

/// demonstration list: equations that balance and equations that must be rejected
pub const DEMO_EQUATIONS: [&str; 23] = [
    "H2+O2>H2O",
    "Hs>Lf>Hs",
    "Hs>",
    ">LO",
    "Po++Gh>LO",
    "Hss>Hss",
    "H>O",
    "O2>O3",
    "NO2>N2O3",
    "N2O+N2O3>NO",
    "N2O+N2O5>NO+NO2",
    "H2+O2>H2O",
    "H2+O2>H2O2",
    "O2+O3>H2",
    "Na+H2O>NaOH",
    "Fe2O3+C>FeO+CO",
    "Fe3O4+CO>FeO+CO2",
    "H2SO4 + Na > H2 + Na2SO4",
    "HCl+K2Cr2O7>Cl2+CrCl3+KCl+H2O",
    "Na+KNO3>Na2O+K2O+N2",
    "N2O4+H2O>HNO2+HNO3",
    "C2H4+O2>C6H12O6",
    "CH4+O2>C6H12O6+H2O",
];

/// balances every equation of the demonstration list
pub fn run_demo_list() -> Vec<BalanceReport> {
    DEMO_EQUATIONS
        .iter()
        .map(|text| BalanceReport::from_text(text))
        .collect()
}

pub fn balancing_examples(task: usize) {
    match task {
        0 => {
            // DEMONSTRATION LIST
            let reports = run_demo_list();
            summary_table(&reports).printstd();
            let balanced = reports.iter().filter(|r| r.is_success()).count();
            println!("balanced {} of {}", balanced, reports.len());
        }
        1 => {
            // formula parsing and atom counting
            use crate::Stoichiometry::equation::Compound;
            use crate::Stoichiometry::formula_parser::parse_formula;
            let formula = "Al2(SO4)3";
            let items = parse_formula(formula).unwrap();
            println!("items of {}: {:?}", formula, items);
            let compound = Compound::parse(formula).unwrap();
            for symbol in compound.symbols() {
                println!("{}: {}", symbol, compound.atoms_of(&symbol));
            }
        }
        2 => {
            // matrix of the equation before and after elimination
            use crate::Stoichiometry::equation::parse_equation;
            use crate::Stoichiometry::equation_balancer::{build_matrix, solve};
            let mut equation = parse_equation("KMnO4+HCl>KCl+MnCl2+H2O+Cl2").unwrap();
            let (catalog, matrix) = build_matrix(&equation).unwrap();
            println!("elements: {:?}", catalog.ordered_symbols());
            println!("{}", matrix);
            let reduced = solve(&mut equation).unwrap();
            println!("{}", reduced);
            println!("{}", equation);
        }
        3 => {
            // report with tables and JSON
            let report = BalanceReport::from_text("Cu + HNO3 > Cu(NO3)2 + NO + H2O");
            report.print(true);
            println!("{}", report.to_json().unwrap());
        }
        _ => {
            println!("no such example: {}", task);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_list_outcomes() {
        let reports = run_demo_list();
        assert_eq!(reports.len(), DEMO_EQUATIONS.len());
        let kinds: Vec<Option<&str>> = reports.iter().map(|r| r.error_kind.as_deref()).collect();
        assert_eq!(
            kinds,
            vec![
                None,
                Some("WrongSideCount"),
                Some("EmptyCompound"),
                Some("EmptyCompound"),
                Some("EmptyCompound"),
                Some("InvalidCharacter"),
                Some("ZeroCoefficient"),
                None,
                Some("ZeroCoefficient"),
                None,
                Some("CannotResolve"),
                None,
                None,
                Some("CannotResolve"),
                Some("ZeroCoefficient"),
                None,
                None,
                None,
                None,
                None,
                None,
                None,
                None,
            ]
        );
        assert_eq!(
            reports[18].outcome(),
            "14HCl + K2Cr2O7 > 3Cl2 + 2CrCl3 + 2KCl + 7H2O"
        );
        assert_eq!(reports[7].outcome(), "3O2 > 2O3");
    }

    #[test]
    fn test_examples_run() {
        for task in 0..5 {
            balancing_examples(task);
        }
    }
}
