/// eng
/// Balancing of chemical reaction equations with integer coefficients.
/// The equation is given as text `reactants > products`, compounds are joined by `+`, formulas may contain
/// round brackets: `Ca(OH)2 + H3PO4 > Ca3(PO4)2 + H2O`. The result is the same equation with the smallest
/// positive integer coefficients: `3Ca(OH)2 + 2H3PO4 > Ca3(PO4)2 + 6H2O`.
/// The pipeline is: formula parser -> element catalog -> matrix of the equation -> fraction-free integer
/// elimination -> coefficients. Equations with more than one independent solution are rejected.
/// ----------------------------------------------------------------
/// ru
/// Уравнивание уравнений химических реакций целыми коэффициентами.
/// Уравнение задается текстом `реагенты > продукты`, вещества разделяются знаком `+`, в формулах допустимы
/// круглые скобки. Результат - то же уравнение с наименьшими положительными целыми коэффициентами.
/// ----------------------------------------------------------------
/// # Examples
/// ```
/// use KiBalance::Stoichiometry::{balance, format_equation, parse_equation};
/// let mut equation = parse_equation("KMnO4 + HCl > KCl + MnCl2 + H2O + Cl2").unwrap();
/// balance(&mut equation).unwrap();
/// assert_eq!(
///     format_equation(&equation),
///     "2KMnO4 + 16HCl > 2KCl + 2MnCl2 + 8H2O + 5Cl2"
/// );
/// let (reactants, products) = equation.coefficients().unwrap();
/// assert_eq!(reactants, vec![2, 16]);
/// assert_eq!(products, vec![2, 2, 8, 5]);
/// ```
pub mod equation;
/// orchestrates parsing, matrix construction, reduction and assignment of coefficients
pub mod equation_balancer;
pub mod errors;
/// turns a chemical formula into a tree of elements and bracket groups
pub mod formula_parser;
///
pub mod element_catalog;
/// gcd and lcm helpers
pub mod integer_math;
pub mod integer_reducer;
/// pretty tables and JSON summary of a balancing attempt
pub mod report;
/// integer matrix of the equation and its row operations
pub mod stoich_matrix;

pub use equation::{format_equation, parse_equation};
pub use equation_balancer::{balance, balance_str};
pub use errors::BalanceError;
