use thiserror::Error;

/// error kinds of the balancing kernel. Every operation of the kernel fails fast with one of them,
/// nothing is partially written on failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("Matrix cannot be created with zero rows or zero columns")]
    EmptyMatrix,
    #[error("Index {index} is out of range, the matrix has only {limit} of them")]
    IndexOutOfRange { index: usize, limit: usize },
    #[error("Arguments of this function must be positive, got {0} and {1}")]
    NonPositiveArgument(i64, i64),
    #[error("The equation cannot be balanced")]
    CannotResolve,
    #[error("The equation must contain exactly one '>' sign, found {0}")]
    WrongSideCount(usize),
    #[error("Invalid character '{0}' in formula")]
    InvalidCharacter(char),
    #[error("Empty compound in the equation")]
    EmptyCompound,
    #[error("Coefficients requested before the equation matrix was reduced")]
    UnfilledMatrix,
    #[error("Compound '{0}' would get a zero coefficient, this equation cannot be balanced")]
    ZeroCoefficient(String),
    #[error("Number of atoms, groups or molecules cannot be 0")]
    ZeroCount,
    #[error("Empty brackets cannot be used in a formula")]
    EmptyGroup,
}

impl BalanceError {
    /// short name of the error kind, used in reports and logs
    pub fn kind(&self) -> &'static str {
        match self {
            BalanceError::EmptyMatrix => "EmptyMatrix",
            BalanceError::IndexOutOfRange { .. } => "IndexOutOfRange",
            BalanceError::NonPositiveArgument(..) => "NonPositiveArgument",
            BalanceError::CannotResolve => "CannotResolve",
            BalanceError::WrongSideCount(_) => "WrongSideCount",
            BalanceError::InvalidCharacter(_) => "InvalidCharacter",
            BalanceError::EmptyCompound => "EmptyCompound",
            BalanceError::UnfilledMatrix => "UnfilledMatrix",
            BalanceError::ZeroCoefficient(_) => "ZeroCoefficient",
            BalanceError::ZeroCount => "ZeroCount",
            BalanceError::EmptyGroup => "EmptyGroup",
        }
    }
}
