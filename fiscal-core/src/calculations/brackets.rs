//! Progressive bracket calculator.
//!
//! Used for both the personal income tax schedule and the corporate tax
//! schedule. A schedule is a list of bands given by their inclusive upper
//! bound; each band is taxed at its own rate on the slice of the amount
//! that falls inside it.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fiscal_core::calculations::compute_progressive_tax;
//! use fiscal_core::TaxBracket;
//!
//! let brackets = vec![
//!     TaxBracket::bounded(dec!(10777), dec!(0)),
//!     TaxBracket::bounded(dec!(27478), dec!(0.11)),
//!     TaxBracket::bounded(dec!(78570), dec!(0.30)),
//!     TaxBracket::bounded(dec!(168994), dec!(0.41)),
//!     TaxBracket::unbounded(dec!(0.45)),
//! ];
//!
//! let tax = compute_progressive_tax(dec!(20000), &brackets).unwrap();
//!
//! // (20000 - 10777) × 11%
//! assert_eq!(tax, dec!(1014.53));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::{is_unit_rate, max};
use crate::error::ConfigurationError;
use crate::models::{BracketTable, TaxBracket};

/// Checks the ordering invariant of a bracket schedule.
///
/// Bounds must be positive and strictly increasing, only the last band may
/// be unbounded and it must be, and every rate must lie in `[0, 1]`.
///
/// # Errors
///
/// Returns the first [`ConfigurationError`] found.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), ConfigurationError> {
    let Some(last_index) = brackets.len().checked_sub(1) else {
        return Err(ConfigurationError::EmptyBracketTable);
    };

    let mut previous = Decimal::ZERO;
    for (index, bracket) in brackets.iter().enumerate() {
        if !is_unit_rate(bracket.rate) {
            return Err(ConfigurationError::RateOutOfRange {
                name: format!("bracket {index} rate"),
                value: bracket.rate,
            });
        }

        match bracket.upper_bound {
            Some(bound) if index == 0 && bound <= Decimal::ZERO => {
                return Err(ConfigurationError::NonPositiveBound { index, bound });
            }
            Some(bound) if bound <= previous => {
                return Err(ConfigurationError::UnsortedBrackets {
                    index,
                    previous,
                    bound,
                });
            }
            Some(_) if index == last_index => {
                return Err(ConfigurationError::BoundedTopBracket);
            }
            Some(bound) => previous = bound,
            None if index != last_index => {
                return Err(ConfigurationError::UnboundedBracketNotLast { index });
            }
            None => {}
        }
    }
    Ok(())
}

/// Tax owed on `taxable_amount` under `brackets`.
///
/// The schedule is validated on every call; use [`BracketTable::tax_for`]
/// to validate once and compute many times. The result is not rounded.
///
/// # Errors
///
/// Returns [`ConfigurationError`] if the schedule breaks the ordering
/// invariant (see [`validate_brackets`]).
pub fn compute_progressive_tax(
    taxable_amount: Decimal,
    brackets: &[TaxBracket],
) -> Result<Decimal, ConfigurationError> {
    validate_brackets(brackets)?;
    Ok(accumulate(taxable_amount, brackets))
}

/// Walks the bands in ascending order, taxing `min(remaining, width)` in
/// each one. Expects a validated schedule.
fn accumulate(
    taxable_amount: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    if taxable_amount < Decimal::ZERO {
        warn!(
            taxable_amount = %taxable_amount,
            "negative taxable amount; no tax due"
        );
        return Decimal::ZERO;
    }

    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;
    for bracket in brackets {
        let ceiling = bracket
            .upper_bound
            .map_or(taxable_amount, |upper| taxable_amount.min(upper));
        let slice = max(ceiling - lower, Decimal::ZERO);
        tax += slice * bracket.rate;

        match bracket.upper_bound {
            Some(upper) if taxable_amount > upper => lower = upper,
            _ => break,
        }
    }
    tax
}

impl BracketTable {
    /// Tax owed on `taxable_amount`. Unrounded.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use fiscal_core::{BracketTable, TaxBracket};
    ///
    /// let corporate = BracketTable::new(vec![
    ///     TaxBracket::bounded(dec!(42500), dec!(0.15)),
    ///     TaxBracket::unbounded(dec!(0.25)),
    /// ]).unwrap();
    ///
    /// // 42500 × 15% + 7500 × 25%
    /// assert_eq!(corporate.tax_for(dec!(50000)), dec!(8250));
    /// ```
    pub fn tax_for(
        &self,
        taxable_amount: Decimal,
    ) -> Decimal {
        accumulate(taxable_amount, self.brackets())
    }

    /// Income tax of a household under the family quotient: the schedule is
    /// applied to the income of one part, then multiplied back.
    ///
    /// Fewer than one part is treated as one.
    pub fn tax_with_parts(
        &self,
        taxable_amount: Decimal,
        household_parts: Decimal,
    ) -> Decimal {
        let parts = max(household_parts, Decimal::ONE);
        if parts == Decimal::ONE {
            return self.tax_for(taxable_amount);
        }
        self.tax_for(taxable_amount / parts) * parts
    }

    /// Rate of the band containing `taxable_amount` (the marginal rate).
    pub fn marginal_rate(
        &self,
        taxable_amount: Decimal,
    ) -> Decimal {
        self.brackets()
            .iter()
            .find(|b| b.upper_bound.is_none_or(|upper| taxable_amount <= upper))
            .map_or(Decimal::ZERO, |b| b.rate)
    }
}
