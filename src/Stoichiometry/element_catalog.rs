/// Catalog of distinct chemical elements of one compound or of a list of compounds.
/// Symbols are kept in first-seen order (compounds left to right, items depth first), that order
/// is the row order of the equation matrix and does not change between runs.
use crate::Stoichiometry::equation::{Compound, Equation};
use log::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementCatalog {
    symbols: Vec<String>,
}

impl ElementCatalog {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    /// elements of one compound, e.g. NH4NO3 -> {N, H, O}
    pub fn from_compound(compound: &Compound) -> Self {
        let mut catalog = Self::new();
        catalog.add_compound(compound);
        catalog
    }

    /// elements of all compounds, e.g. Fe2O3, CO2, Fe3C -> {Fe, O, C}
    pub fn from_compounds<'a, I>(compounds: I) -> Self
    where
        I: IntoIterator<Item = &'a Compound>,
    {
        let mut catalog = Self::new();
        for compound in compounds {
            catalog.add_compound(compound);
        }
        debug!("element catalog: {:?}", catalog.symbols);
        catalog
    }

    /// elements of the whole equation, reactants first
    pub fn from_equation(equation: &Equation) -> Self {
        Self::from_compounds(equation.compounds())
    }

    /// adds the distinct symbols of the compound which are not in the catalog yet
    pub fn add_compound(&mut self, compound: &Compound) {
        for symbol in compound.symbols() {
            if !self.contains(&symbol) {
                self.symbols.push(symbol);
            }
        }
    }

    pub fn element_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn ordered_symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// row index of the element in the equation matrix
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// number of atoms of the element in one molecule of the compound, bracket groups multiply
    /// their content by their count
    pub fn count_of_element_across_compound(&self, symbol: &str, compound: &Compound) -> u64 {
        compound.atoms_of(symbol)
    }
}
