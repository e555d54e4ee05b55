//! # Formula parser
//!
//! Turns the text of one chemical formula into an ordered tree of items. An item is either an
//! element with its number of atoms (`Fe2`) or a bracket group with its own items and a repeat
//! count (`(SO4)3`).
//!
//! Grammar (single pass, left to right, no backtracking):
//! - an uppercase letter starts an element symbol, one lowercase letter may follow it;
//! - a digit run after a symbol or after a closing bracket is the count, no digits means 1;
//! - `(` takes everything up to the next `)` and parses it again with the same grammar.
//!   The scanner does not track depth, so `(A(B)2)3` is cut at the first `)` and the
//!   unclosed inner bracket is rejected instead of being miscounted.
//!
//! ```
//! use KiBalance::Stoichiometry::formula_parser::{parse_formula, FormulaItem};
//! let items = parse_formula("Ca3(PO4)2").unwrap();
//! assert_eq!(items.len(), 2);
//! let phosphorus: u64 = items.iter().map(|item| item.atoms_of("P")).sum();
//! assert_eq!(phosphorus, 2);
//! ```
use crate::Stoichiometry::errors::BalanceError;
use enum_dispatch::enum_dispatch;
use std::fmt;
use std::hash::{Hash, Hasher};

/// common behaviour of everything that may appear in a formula
#[enum_dispatch]
pub trait FormulaItem {
    /// number of atoms of the element `symbol` represented by this item
    fn atoms_of(&self, symbol: &str) -> u64;
    /// appends element symbols of this item to `symbols` keeping the first-seen order, no duplicates
    fn collect_symbols(&self, symbols: &mut Vec<String>);
    /// writes the textual form of this item
    fn write_formula(&self, out: &mut String);
}

/// one item of a formula: element or bracket group
#[enum_dispatch(FormulaItem)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Element(Element),
    Group(Group),
}

impl Item {
    /// structural comparison: unlike `==` it also compares atom and repeat counts
    pub fn same_structure(&self, other: &Item) -> bool {
        match (self, other) {
            (Item::Element(a), Item::Element(b)) => a.symbol == b.symbol && a.count == b.count,
            (Item::Group(a), Item::Group(b)) => {
                a.count == b.count
                    && a.items.len() == b.items.len()
                    && a.items
                        .iter()
                        .zip(b.items.iter())
                        .all(|(x, y)| x.same_structure(y))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_formula(&mut out);
        write!(f, "{}", out)
    }
}

/// chemical element with the number of its atoms at one place of the formula.
/// Two elements are equal when their symbols are equal, the count is not part of identity
#[derive(Debug, Clone, Eq)]
pub struct Element {
    symbol: String,
    count: u32,
}

impl Element {
    pub fn new(symbol: &str, count: u32) -> Result<Self, BalanceError> {
        if count == 0 {
            return Err(BalanceError::ZeroCount);
        }
        let mut chars = symbol.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => {}
            Some(first) => return Err(BalanceError::InvalidCharacter(first)),
            None => return Err(BalanceError::EmptyCompound),
        }
        if let Some(second) = chars.next() {
            if !second.is_ascii_lowercase() {
                return Err(BalanceError::InvalidCharacter(second));
            }
        }
        if let Some(extra) = chars.next() {
            return Err(BalanceError::InvalidCharacter(extra));
        }
        Ok(Self {
            symbol: symbol.to_string(),
            count,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl FormulaItem for Element {
    fn atoms_of(&self, symbol: &str) -> u64 {
        if self.symbol == symbol {
            self.count as u64
        } else {
            0
        }
    }

    fn collect_symbols(&self, symbols: &mut Vec<String>) {
        if !symbols.iter().any(|s| s == &self.symbol) {
            symbols.push(self.symbol.clone());
        }
    }

    fn write_formula(&self, out: &mut String) {
        out.push_str(&self.symbol);
        if self.count > 1 {
            out.push_str(&self.count.to_string());
        }
    }
}

/// group of items written in round brackets, with the number of its repetitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    items: Vec<Item>,
    count: u32,
}

impl Group {
    pub fn new(items: Vec<Item>, count: u32) -> Result<Self, BalanceError> {
        if count == 0 {
            return Err(BalanceError::ZeroCount);
        }
        if items.is_empty() {
            return Err(BalanceError::EmptyGroup);
        }
        Ok(Self { items, count })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl FormulaItem for Group {
    // repeat count multiplies the content at every nesting level
    fn atoms_of(&self, symbol: &str) -> u64 {
        let inside = self
            .items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.atoms_of(symbol)));
        inside.saturating_mul(self.count as u64)
    }

    fn collect_symbols(&self, symbols: &mut Vec<String>) {
        for item in &self.items {
            item.collect_symbols(symbols);
        }
    }

    fn write_formula(&self, out: &mut String) {
        out.push('(');
        for item in &self.items {
            item.write_formula(out);
        }
        out.push(')');
        if self.count > 1 {
            out.push_str(&self.count.to_string());
        }
    }
}

/// parses the formula of one compound into a sequence of items
pub fn parse_formula(formula: &str) -> Result<Vec<Item>, BalanceError> {
    let chars: Vec<char> = formula.chars().collect();
    parse_items(&chars)
}

fn parse_items(chars: &[char]) -> Result<Vec<Item>, BalanceError> {
    let mut items = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_uppercase() {
            let start = i;
            i += 1;
            // two-letter symbol, a second lowercase letter is left for the next loop and rejected there
            if i < chars.len() && chars[i].is_ascii_lowercase() {
                i += 1;
            }
            let symbol: String = chars[start..i].iter().collect();
            let (count, next) = read_count(chars, i)?;
            i = next;
            items.push(Item::from(Element::new(&symbol, count)?));
        } else if c == '(' {
            let end_bracket = chars[i + 1..]
                .iter()
                .position(|&ch| ch == ')')
                .map(|offset| i + 1 + offset)
                .ok_or(BalanceError::InvalidCharacter('('))?;
            let inner = parse_items(&chars[i + 1..end_bracket])?;
            let (count, next) = read_count(chars, end_bracket + 1)?;
            i = next;
            items.push(Item::from(Group::new(inner, count)?));
        } else {
            return Err(BalanceError::InvalidCharacter(c));
        }
    }
    Ok(items)
}

/// reads a run of digits starting at `start`, returns the count (1 when there are no digits)
/// and the position after the run
fn read_count(chars: &[char], start: usize) -> Result<(u32, usize), BalanceError> {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    if end == start {
        return Ok((1, start));
    }
    let digits: String = chars[start..end].iter().collect();
    let count = digits
        .parse::<u32>()
        .map_err(|_| BalanceError::InvalidCharacter(chars[start]))?;
    Ok((count, end))
}

/// textual form of a sequence of items
pub fn items_to_formula(items: &[Item]) -> String {
    let mut out = String::new();
    for item in items {
        item.write_formula(&mut out);
    }
    out
}
