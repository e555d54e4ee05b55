//! # Equation and compound
//!
//! An equation is written as `reactants > products`, compounds on each side are joined by `+`
//! and surrounding whitespace is ignored. A compound may start with a stated coefficient
//! (`2H2O`), that is how balanced equations are printed, so printed output can be parsed again.
//! Stated coefficients are informational, balancing always computes its own ones.
//!
//! ```
//! use KiBalance::Stoichiometry::equation::parse_equation;
//! let mut equation = parse_equation("H2 + O2 > H2O").unwrap();
//! equation.balance().unwrap();
//! assert_eq!(equation.to_string(), "2H2 + O2 > 2H2O");
//! assert!(equation.is_balanced());
//! ```
use crate::Stoichiometry::element_catalog::ElementCatalog;
use crate::Stoichiometry::equation_balancer;
use crate::Stoichiometry::errors::BalanceError;
use crate::Stoichiometry::formula_parser::{FormulaItem, Item, items_to_formula, parse_formula};
use std::fmt;
use std::str::FromStr;

/// sign separating reactants from products
pub const SIDE_MARKER: char = '>';
/// sign separating compounds on one side
pub const COMPOUND_SEPARATOR: char = '+';

/// one compound of the equation
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    items: Vec<Item>,
    /// coefficient written in the input text, if any
    stated_count: Option<u64>,
    /// coefficient computed by balancing, set once
    count: Option<u64>,
}

impl Compound {
    /// parses a compound from text like `H2SO4` or `2H2O`
    pub fn parse(text: &str) -> Result<Self, BalanceError> {
        let text = text.trim();
        let digits_end = text
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let (coefficient, formula) = text.split_at(digits_end);
        if formula.is_empty() {
            return Err(BalanceError::EmptyCompound);
        }
        let stated_count = if coefficient.is_empty() {
            None
        } else {
            let value = coefficient.parse::<u64>().map_err(|_| {
                BalanceError::InvalidCharacter(coefficient.chars().next().unwrap_or('0'))
            })?;
            if value == 0 {
                return Err(BalanceError::ZeroCount);
            }
            Some(value)
        };
        let items = parse_formula(formula)?;
        Ok(Self {
            items,
            stated_count,
            count: None,
        })
    }

    /// compound made of already parsed items
    pub fn from_items(items: Vec<Item>) -> Result<Self, BalanceError> {
        if items.is_empty() {
            return Err(BalanceError::EmptyCompound);
        }
        Ok(Self {
            items,
            stated_count: None,
            count: None,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// coefficient found by balancing
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// coefficient written in the input text
    pub fn stated_count(&self) -> Option<u64> {
        self.stated_count
    }

    /// coefficient used for printing and checks: computed one first, then the stated one, then 1
    pub fn effective_count(&self) -> u64 {
        self.count.or(self.stated_count).unwrap_or(1)
    }

    /// formula without coefficient
    pub fn formula(&self) -> String {
        items_to_formula(&self.items)
    }

    /// number of atoms of `symbol` in one molecule
    pub fn atoms_of(&self, symbol: &str) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.atoms_of(symbol)))
    }

    /// distinct element symbols of the compound in first-seen order
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols = Vec::new();
        for item in &self.items {
            item.collect_symbols(&mut symbols);
        }
        symbols
    }

    /// structural comparison of items, coefficients are ignored
    pub fn same_structure(&self, other: &Compound) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(other.items.iter())
                .all(|(a, b)| a.same_structure(b))
    }

    pub(crate) fn set_count(&mut self, count: u64) {
        self.count = Some(count);
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coefficient = self.effective_count();
        if coefficient > 1 {
            write!(f, "{}", coefficient)?;
        }
        write!(f, "{}", self.formula())
    }
}

impl FromStr for Compound {
    type Err = BalanceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Compound::parse(s)
    }
}

/// chemical equation: reactants and products
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    reactants: Vec<Compound>,
    products: Vec<Compound>,
}

impl Equation {
    /// parses equation text like `Fe2O3 + C > FeO + CO`
    pub fn parse(text: &str) -> Result<Self, BalanceError> {
        let sides: Vec<&str> = text.split(SIDE_MARKER).collect();
        if sides.len() != 2 {
            return Err(BalanceError::WrongSideCount(sides.len() - 1));
        }
        let reactants = parse_side(sides[0])?;
        let products = parse_side(sides[1])?;
        Ok(Self {
            reactants,
            products,
        })
    }

    pub fn new(reactants: Vec<Compound>, products: Vec<Compound>) -> Result<Self, BalanceError> {
        if reactants.is_empty() || products.is_empty() {
            return Err(BalanceError::EmptyCompound);
        }
        Ok(Self {
            reactants,
            products,
        })
    }

    pub fn reactants(&self) -> &[Compound] {
        &self.reactants
    }

    pub fn products(&self) -> &[Compound] {
        &self.products
    }

    /// all compounds, reactants first
    pub fn compounds(&self) -> impl Iterator<Item = &Compound> {
        self.reactants.iter().chain(self.products.iter())
    }

    pub fn compound_count(&self) -> usize {
        self.reactants.len() + self.products.len()
    }

    /// balances the equation in place, see [`equation_balancer::balance`]
    pub fn balance(&mut self) -> Result<(), BalanceError> {
        equation_balancer::balance(self)
    }

    /// computed coefficients of reactants and products, `None` until balanced
    pub fn coefficients(&self) -> Option<(Vec<u64>, Vec<u64>)> {
        let reactants = self
            .reactants
            .iter()
            .map(|c| c.count())
            .collect::<Option<Vec<u64>>>()?;
        let products = self
            .products
            .iter()
            .map(|c| c.count())
            .collect::<Option<Vec<u64>>>()?;
        Some((reactants, products))
    }

    /// checks element conservation with the current coefficients (computed, stated or 1)
    pub fn is_balanced(&self) -> bool {
        let coefficients: Vec<u64> = self.compounds().map(|c| c.effective_count()).collect();
        self.is_conserved_with(&coefficients)
    }

    /// checks element conservation for the given coefficients, one per compound, reactants first
    pub fn is_conserved_with(&self, coefficients: &[u64]) -> bool {
        if coefficients.len() != self.compound_count() {
            return false;
        }
        let (reactant_coeffs, product_coeffs) = coefficients.split_at(self.reactants.len());
        let catalog = ElementCatalog::from_equation(self);
        catalog.ordered_symbols().iter().all(|symbol| {
            let side_total = |compounds: &[Compound], coeffs: &[u64]| -> u128 {
                compounds
                    .iter()
                    .zip(coeffs.iter())
                    .map(|(compound, &k)| k as u128 * compound.atoms_of(symbol) as u128)
                    .sum()
            };
            side_total(self.reactants.as_slice(), reactant_coeffs)
                == side_total(self.products.as_slice(), product_coeffs)
        })
    }

    /// writes computed coefficients, one per compound, reactants first
    pub(crate) fn assign_coefficients(&mut self, coefficients: &[u64]) {
        let n = self.reactants.len();
        for (compound, &k) in self.reactants.iter_mut().zip(coefficients[..n].iter()) {
            compound.set_count(k);
        }
        for (compound, &k) in self.products.iter_mut().zip(coefficients[n..].iter()) {
            compound.set_count(k);
        }
    }
}

fn parse_side(side: &str) -> Result<Vec<Compound>, BalanceError> {
    side.split(COMPOUND_SEPARATOR)
        .map(|text| {
            if text.trim().is_empty() {
                Err(BalanceError::EmptyCompound)
            } else {
                Compound::parse(text)
            }
        })
        .collect()
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |compounds: &[Compound]| {
            compounds
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" + ")
        };
        write!(
            f,
            "{} {} {}",
            join(&self.reactants),
            SIDE_MARKER,
            join(&self.products)
        )
    }
}

impl FromStr for Equation {
    type Err = BalanceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Equation::parse(s)
    }
}

/// parses equation text
pub fn parse_equation(text: &str) -> Result<Equation, BalanceError> {
    Equation::parse(text)
}

/// textual form of the equation, balanced coefficients are printed when known
pub fn format_equation(equation: &Equation) -> String {
    equation.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_equation_sides() {
        let equation = parse_equation("H2SO4 + Na > H2 + Na2SO4").unwrap();
        assert_eq!(equation.reactants().len(), 2);
        assert_eq!(equation.products().len(), 2);
        assert_eq!(equation.reactants()[0].formula(), "H2SO4");
        assert_eq!(equation.products()[1].formula(), "Na2SO4");
        assert!(equation.compounds().all(|c| c.count().is_none()));
        assert_eq!(equation.to_string(), "H2SO4 + Na > H2 + Na2SO4");
    }

    #[test]
    fn test_side_marker_count() {
        assert_eq!(
            parse_equation("Hs>Lf>Hs"),
            Err(BalanceError::WrongSideCount(2))
        );
        assert_eq!(parse_equation("H2O"), Err(BalanceError::WrongSideCount(0)));
        assert_eq!(
            "H2+O2=H2O".parse::<Equation>(),
            Err(BalanceError::WrongSideCount(0))
        );
    }

    #[test]
    fn test_empty_compounds() {
        assert_eq!(parse_equation(">LO"), Err(BalanceError::EmptyCompound));
        assert_eq!(parse_equation("Hs>"), Err(BalanceError::EmptyCompound));
        assert_eq!(parse_equation("Po++Gh>LO"), Err(BalanceError::EmptyCompound));
        assert_eq!(parse_equation("+H2>H2"), Err(BalanceError::EmptyCompound));
        assert_eq!(parse_equation("H2>H2+ "), Err(BalanceError::EmptyCompound));
    }

    #[test]
    fn test_invalid_compound_propagates() {
        assert_eq!(
            parse_equation("Hss>Hss"),
            Err(BalanceError::InvalidCharacter('s'))
        );
        assert_eq!(
            parse_equation("H 2>H2"),
            Err(BalanceError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_stated_coefficients() {
        let equation = parse_equation("2H2 + O2 > 2H2O").unwrap();
        assert_eq!(equation.reactants()[0].stated_count(), Some(2));
        assert_eq!(equation.reactants()[0].count(), None);
        assert_eq!(equation.reactants()[1].stated_count(), None);
        assert!(equation.is_balanced());
        assert_eq!(equation.to_string(), "2H2 + O2 > 2H2O");

        assert_eq!(Compound::parse("0H2O"), Err(BalanceError::ZeroCount));
        assert_eq!(Compound::parse("12"), Err(BalanceError::EmptyCompound));
        assert!(!parse_equation("H2 + O2 > H2O").unwrap().is_balanced());
    }

    #[test]
    fn test_conservation_check() {
        let equation = parse_equation("Fe2O3 + C > FeO + CO").unwrap();
        assert!(equation.is_conserved_with(&[1, 1, 2, 1]));
        assert!(!equation.is_conserved_with(&[1, 3, 2, 3]));
        assert!(!equation.is_conserved_with(&[1, 1, 2]));
    }

    #[test]
    fn test_compound_from_items() {
        let items = parse_formula("CH4").unwrap();
        let compound = Compound::from_items(items).unwrap();
        assert_eq!(compound.atoms_of("H"), 4);
        assert_eq!(compound.symbols(), vec!["C", "H"]);
        assert_eq!(
            Compound::from_items(Vec::new()),
            Err(BalanceError::EmptyCompound)
        );
        assert!(Equation::new(vec![compound], Vec::new()).is_err());
    }
}
