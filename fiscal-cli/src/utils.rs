use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// `true` when the commas of `s` group thousands: several commas, or
/// every group after the first made of exactly three digits.
fn commas_group_thousands(s: &str) -> bool {
    let mut groups = s.split(',').skip(1).peekable();
    s.matches(',').count() > 1
        || (groups.peek().is_some()
            && groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit())))
}

/// Drops grouping spaces and underscores. Commas are thousands separators
/// next to a dot or when they group digits by three (`100,000`); otherwise
/// a comma is the French decimal separator (`12,5`).
fn normalize_decimal_input(s: &str) -> String {
    let compact: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '\u{a0}' | '\u{202f}'))
        .collect();
    if compact.contains('.') || commas_group_thousands(&compact) {
        compact.replace(',', "")
    } else {
        compact.replace(',', ".")
    }
}

/// Parses an amount such as `85000`, `85 000,50`, `100,000` or `85,000.50`.
///
/// Empty input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses a rate given either as a fraction (`0.3`) or a percentage (`30%`).
pub fn parse_rate(s: &str) -> Result<Decimal, ParseDecimalError> {
    match s.trim().strip_suffix('%') {
        Some(percent) => Ok(parse_decimal(percent)? / Decimal::ONE_HUNDRED),
        None => parse_decimal(s),
    }
}

/// Formats an optional [`Decimal`] for display, using "-" when `None`.
pub fn opt_decimal_display(d: Option<Decimal>) -> String {
    d.map_or_else(|| "-".to_string(), |v| v.to_string())
}
