//! Core pricing calculation functions.
//!
//! Pure functions for proposal pricing math - no catalog access, no I/O.
//! Every function here is deterministic: the same inputs always produce the
//! same `Decimal`, bit for bit.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use super::models::ProposalTotals;
use super::services::PricingError;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use proposal_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

fn ensure_non_negative(parameter: &'static str, value: Decimal) -> Result<(), PricingError> {
    if value < Decimal::ZERO {
        return Err(PricingError::invalid(parameter, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

/// Unwrap a checked operation, blaming `parameter` when the result does not fit.
fn in_range(parameter: &'static str, value: Option<Decimal>) -> Result<Decimal, PricingError> {
    value.ok_or_else(|| PricingError::invalid(parameter, "result exceeds the decimal range"))
}

/// Absolute difference between a function's additional and base values.
///
/// This is a per-hour monetary adjustment, not a ratio. A negative result
/// means the additional value is lower than the base value.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use proposal_pricing::pricing::calculators::variation_rate;
///
/// assert_eq!(variation_rate(dec!(100), dec!(120)).unwrap(), dec!(20));
/// ```
pub fn variation_rate(
    base_value: Decimal,
    additional_value: Decimal,
) -> Result<Decimal, PricingError> {
    in_range("additional_value", additional_value.checked_sub(base_value))
}

/// Sale value of a labor allocation.
///
/// `((hourly_value * variation_rate) + base_value) * hours`
///
/// Zero hours yield zero. A negative `variation_rate` is allowed and lowers
/// the result; negative `hours` are rejected.
pub fn labor_sale_value(
    hourly_value: Decimal,
    base_value: Decimal,
    variation_rate: Decimal,
    hours: Decimal,
) -> Result<Decimal, PricingError> {
    ensure_non_negative("hours", hours)?;

    let adjustment = in_range("variation_rate", hourly_value.checked_mul(variation_rate))?;
    let per_hour = in_range("base_value", adjustment.checked_add(base_value))?;
    in_range("hours", per_hour.checked_mul(hours))
}

/// Sale value of an equipment allocation, grossed up for margin and tax.
///
/// `(hourly_value * (indirect_expense_rate / (1 - (fixed_margin_rate + tax_rate)))) * hours`
///
/// After deducting the margin and tax fractions from the sale price, the
/// indirect-expense-adjusted cost is recovered. Fails when margin plus tax
/// reach 100%, since the denominator would be zero or negative.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use proposal_pricing::pricing::calculators::equipment_sale_value;
///
/// let value = equipment_sale_value(dec!(100), dec!(0.5), dec!(0.3), dec!(0.2), dec!(2));
/// assert_eq!(value.unwrap(), dec!(200));
///
/// let value = equipment_sale_value(dec!(100), dec!(0.1), dec!(0.6), dec!(0.5), dec!(8));
/// assert!(value.is_err());
/// ```
pub fn equipment_sale_value(
    hourly_value: Decimal,
    indirect_expense_rate: Decimal,
    fixed_margin_rate: Decimal,
    tax_rate: Decimal,
    hours: Decimal,
) -> Result<Decimal, PricingError> {
    ensure_non_negative("hourly_value", hourly_value)?;
    ensure_non_negative("indirect_expense_rate", indirect_expense_rate)?;
    ensure_non_negative("fixed_margin_rate", fixed_margin_rate)?;
    ensure_non_negative("tax_rate", tax_rate)?;
    ensure_non_negative("hours", hours)?;

    let deductions = in_range("tax_rate", fixed_margin_rate.checked_add(tax_rate))?;
    let denominator = Decimal::ONE - deductions;
    if denominator <= Decimal::ZERO {
        return Err(PricingError::invalid(
            "fixed_margin_rate + tax_rate",
            format!(
                "must be < 1, got {} + {} = {}",
                fixed_margin_rate, tax_rate, deductions
            ),
        ));
    }

    let markup = in_range(
        "fixed_margin_rate + tax_rate",
        indirect_expense_rate.checked_div(denominator),
    )?;
    let per_hour = in_range("hourly_value", hourly_value.checked_mul(markup))?;
    in_range("hours", per_hour.checked_mul(hours))
}

/// Variable costs marked up by a profit margin: `cost * (1 + margin_rate)`.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use proposal_pricing::pricing::calculators::variable_costs;
///
/// assert_eq!(variable_costs(dec!(100), dec!(0.25)).unwrap(), dec!(125.00));
/// assert!(variable_costs(dec!(0), dec!(0.25)).is_err());
/// ```
pub fn variable_costs(cost: Decimal, margin_rate: Decimal) -> Result<Decimal, PricingError> {
    if cost <= Decimal::ZERO {
        return Err(PricingError::invalid("cost", format!("must be > 0, got {}", cost)));
    }
    ensure_non_negative("margin_rate", margin_rate)?;

    let margin = in_range("margin_rate", cost.checked_mul(margin_rate))?;
    in_range("margin_rate", cost.checked_add(margin))
}

/// Salary variation as a ratio: `raised_value / base_value`.
///
/// Unlike [`variation_rate`], this is a multiplier, e.g. 1.2 for a 20% raise.
pub fn salary_variation_rate(
    base_value: Decimal,
    raised_value: Decimal,
) -> Result<Decimal, PricingError> {
    if base_value <= Decimal::ZERO {
        return Err(PricingError::invalid(
            "base_value",
            format!("must be > 0, got {}", base_value),
        ));
    }

    in_range("raised_value", raised_value.checked_div(base_value))
}

/// [`salary_variation_rate`] expressed as a percentage.
pub fn salary_variation_percentage(
    base_value: Decimal,
    raised_value: Decimal,
) -> Result<Decimal, PricingError> {
    let rate = salary_variation_rate(base_value, raised_value)?;
    in_range("raised_value", rate.checked_mul(Decimal::ONE_HUNDRED))
}

/// Parse interactive form input, falling back to zero.
///
/// Reads the leading numeric prefix of the text: optional sign, digits with
/// at most one decimal point, then an optional `e`/`E` exponent. Anything
/// that does not start with a number, or does not fit in a `Decimal`, is
/// zero, so a half-typed value never blocks recalculation.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use proposal_pricing::pricing::calculators::parse_or_zero;
///
/// assert_eq!(parse_or_zero("12.5"), dec!(12.5));
/// assert_eq!(parse_or_zero("12abc"), dec!(12));
/// assert_eq!(parse_or_zero("1.5e3"), dec!(1500));
/// assert_eq!(parse_or_zero(""), dec!(0));
/// ```
pub fn parse_or_zero(raw: &str) -> Decimal {
    parse_prefix(raw.trim_start()).unwrap_or(Decimal::ZERO)
}

fn parse_prefix(text: &str) -> Option<Decimal> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let mut integer = String::new();
    let mut fraction = String::new();
    let mut seen_point = false;
    while let Some(&b) = bytes.get(pos) {
        match b {
            b'0'..=b'9' if seen_point => fraction.push(b as char),
            b'0'..=b'9' => integer.push(b as char),
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        pos += 1;
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(integer.len() + fraction.len() + 3);
    if negative {
        normalized.push('-');
    }
    if integer.is_empty() {
        normalized.push('0');
    } else {
        normalized.push_str(&integer);
    }
    if !fraction.is_empty() {
        normalized.push('.');
        normalized.push_str(&fraction);
    }
    let mantissa = normalized.parse::<Decimal>().ok()?;

    match parse_exponent(&bytes[pos..]) {
        Some(exponent) => apply_exponent(mantissa, exponent),
        None => Some(mantissa),
    }
}

/// `[eE][+-]?digits`; without at least one digit there is no exponent
fn parse_exponent(bytes: &[u8]) -> Option<i64> {
    let (marker, rest) = bytes.split_first()?;
    if !matches!(marker, b'e' | b'E') {
        return None;
    }

    let (negative, rest) = match rest.split_first() {
        Some((b'-', tail)) => (true, tail),
        Some((b'+', tail)) => (false, tail),
        _ => (false, rest),
    };

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    // Exponent digits are ASCII, so this slice is valid UTF-8
    let magnitude = std::str::from_utf8(&rest[..digits])
        .ok()?
        .parse::<i64>()
        .unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Scale by `10^exponent`; `None` once the value leaves the decimal range
fn apply_exponent(mantissa: Decimal, exponent: i64) -> Option<Decimal> {
    // Past this many steps any non-zero mantissa has overflowed or reached zero
    const MAX_STEPS: u64 = 64;

    let mut value = mantissa;
    for _ in 0..exponent.unsigned_abs().min(MAX_STEPS) {
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)?
        } else {
            value.checked_div(Decimal::TEN)?
        };
    }
    Some(value)
}

/// Calculate proposal totals from interactive lines.
///
/// Sums `hours * hourly_rate` over active lines in insertion order, then
/// applies the margin percentage. Inactive lines contribute nothing and
/// report no subtotal. Never fails: unparsable input counts as zero, and so
/// does a line subtotal or total that exceeds the decimal range.
pub fn calculate_totals(lines: &[TotalsLineInput], margin_percent: &str) -> TotalsResult {
    let mut base_value = Decimal::ZERO;
    let mut line_subtotals = Vec::with_capacity(lines.len());

    for line in lines {
        if !line.active {
            line_subtotals.push(None);
            continue;
        }

        let subtotal = parse_or_zero(&line.hours)
            .checked_mul(parse_or_zero(&line.hourly_rate))
            .unwrap_or(Decimal::ZERO);
        // A line that would push the base out of range counts as zero
        match base_value.checked_add(subtotal) {
            Some(sum) => {
                base_value = sum;
                line_subtotals.push(Some(subtotal));
            }
            None => line_subtotals.push(Some(Decimal::ZERO)),
        }
    }

    let margin_percent = parse_or_zero(margin_percent);
    let margin_value = margin_percent
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|rate| base_value.checked_mul(rate))
        .unwrap_or(Decimal::ZERO);
    let total_value = base_value.checked_add(margin_value).unwrap_or(Decimal::ZERO);

    TotalsResult {
        line_subtotals,
        totals: ProposalTotals {
            base_value,
            margin_value,
            total_value,
        },
        submitted_total: round_money(total_value, 2),
    }
}

/// Input for an interactive line (used in calculate_totals)
#[derive(Debug, Clone, Default)]
pub struct TotalsLineInput {
    pub active: bool,
    pub hours: String,
    pub hourly_rate: String,
}

/// Result of interactive totals calculation
#[derive(Debug, Clone)]
pub struct TotalsResult {
    /// One entry per input line; `None` for inactive lines
    pub line_subtotals: Vec<Option<Decimal>>,
    pub totals: ProposalTotals,
    /// Total rounded to cents, as submitted with the final save
    pub submitted_total: Decimal,
}
