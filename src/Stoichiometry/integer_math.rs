/// Greatest common divisor and least common multiple used by the fraction-free elimination.
/// Pairwise helpers accept positive operands only, the list helpers skip zeros.
use crate::Stoichiometry::errors::BalanceError;

/// greatest common divisor of two positive numbers
pub fn gcd_pair(a: i64, b: i64) -> Result<i64, BalanceError> {
    if a <= 0 || b <= 0 {
        return Err(BalanceError::NonPositiveArgument(a, b));
    }
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let c = a % b;
        a = b;
        b = c;
    }
    Ok(a)
}

/// least common multiple of two positive numbers
pub fn lcm_pair(a: i64, b: i64) -> Result<i64, BalanceError> {
    let d = gcd_pair(a, b)?;
    (a / d).checked_mul(b).ok_or(BalanceError::CannotResolve)
}

/// greatest common divisor of the nonzero values. The result has the sign of the first nonzero
/// value; 1 when all values are zero
pub fn gcd_of(values: &[i64]) -> Result<i64, BalanceError> {
    let mut sign = 1;
    let mut divisor = 0;
    for &value in values.iter().filter(|&&v| v != 0) {
        let magnitude = value.checked_abs().ok_or(BalanceError::CannotResolve)?;
        if divisor == 0 {
            sign = value.signum();
            divisor = magnitude;
        } else {
            divisor = gcd_pair(divisor, magnitude)?;
        }
    }
    if divisor == 0 {
        return Ok(1);
    }
    Ok(divisor * sign)
}

/// least common multiple of magnitudes of the nonzero values; 1 when all values are zero
pub fn lcm_of(values: &[i64]) -> Result<i64, BalanceError> {
    let mut multiple = 1;
    for &value in values.iter().filter(|&&v| v != 0) {
        let magnitude = value.checked_abs().ok_or(BalanceError::CannotResolve)?;
        multiple = lcm_pair(multiple, magnitude)?;
    }
    Ok(multiple)
}
