//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O. Callers validate request
//! payloads before reaching these; every function here is total.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Deposit percent when nothing more specific applies.
pub const DEFAULT_DEPOSIT_PERCENT: Decimal = dec!(10);

/// Minor-unit precision for EUR amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Round to specified decimal places using half-up rounding (ROUND_HALF_UP).
///
/// Values exactly halfway between two possibilities round away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use paris_transfers_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.005), 2), dec!(1.01));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether a pickup time falls in the night window [21:00, 06:00).
///
/// Only the hour is read: the leading digits before the first `:`. A
/// missing or unparsable hour is not night, so no surcharge applies.
pub fn is_night_time(time: &str) -> bool {
    let hour_part = time.trim().split(':').next().unwrap_or_default();
    let digits: String = hour_part.chars().take_while(|c| c.is_ascii_digit()).collect();

    match digits.parse::<u32>() {
        Ok(hour) => hour >= 21 || hour < 6,
        Err(_) => false,
    }
}

/// Kind of service a booking line item is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Transfer,
    Tour,
    Event,
}

impl ServiceCategory {
    /// Parse a category name as sent by the booking forms (English or Spanish).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "transfer" | "traslado" => Some(ServiceCategory::Transfer),
            "tour" => Some(ServiceCategory::Tour),
            "event" | "evento" => Some(ServiceCategory::Event),
            _ => None,
        }
    }

    pub fn default_deposit_percent(&self) -> Decimal {
        match self {
            ServiceCategory::Tour | ServiceCategory::Event => dec!(20),
            ServiceCategory::Transfer => dec!(10),
        }
    }
}

/// Clamp a percent into [0, 100], logging when the input was out of range.
pub fn clamp_percent(percent: Decimal) -> Decimal {
    let clamped = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    if clamped != percent {
        tracing::warn!(%percent, %clamped, "Deposit percent out of range, clamped");
    }
    clamped
}

/// Resolve the deposit percent for one line item.
///
/// First match wins:
/// 1. paying in full now (100%)
/// 2. explicit percent on the line item
/// 3. checkout-wide percent
/// 4. category default
/// 5. `DEFAULT_DEPOSIT_PERCENT`
pub fn resolve_deposit_percent(
    category: Option<ServiceCategory>,
    explicit_percent: Option<Decimal>,
    checkout_percent: Option<Decimal>,
    pay_full_now: bool,
) -> Decimal {
    let pay_in_full = pay_full_now.then_some(Decimal::ONE_HUNDRED);
    let category_default = category.map(|c| c.default_deposit_percent());

    [pay_in_full, explicit_percent, checkout_percent, category_default]
        .into_iter()
        .flatten()
        .next()
        .map(clamp_percent)
        .unwrap_or(DEFAULT_DEPOSIT_PERCENT)
}

/// Split of a total into what is charged now and what is due later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositBreakdown {
    pub total: Decimal,
    pub deposit_percent: Decimal,
    pub deposit_amount: Decimal,
    pub remaining_amount: Decimal,
}

/// `percent` of `amount`, unrounded.
///
/// Amounts near `Decimal::MAX` overflow `amount * percent`; those are scaled
/// down first, and anything still out of range saturates.
fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount
        .checked_mul(percent)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .or_else(|| (amount / Decimal::ONE_HUNDRED).checked_mul(percent))
        .unwrap_or(if amount.is_sign_negative() != percent.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Split `total` at a given percent.
///
/// The deposit is rounded half-up to cents; the remainder is derived by
/// subtraction so the two always add back to `total`.
pub fn split_deposit(total: Decimal, percent: Decimal) -> DepositBreakdown {
    let deposit_amount = round_money(percent_of(total, percent), MONEY_DECIMAL_PLACES);

    DepositBreakdown {
        total,
        deposit_percent: percent,
        deposit_amount,
        remaining_amount: total.saturating_sub(deposit_amount),
    }
}

/// Compute deposit and remainder for a single line item.
///
/// `category` is the raw category name; unrecognised names fall back to
/// `DEFAULT_DEPOSIT_PERCENT`. An explicit percent takes precedence.
pub fn compute_deposit(
    total: Decimal,
    category: &str,
    explicit_percent: Option<Decimal>,
) -> DepositBreakdown {
    let percent =
        resolve_deposit_percent(ServiceCategory::parse(category), explicit_percent, None, false);
    split_deposit(total, percent)
}

/// Input for a checkout line (used in compute_checkout_totals)
#[derive(Debug, Clone)]
pub struct CheckoutLineInput {
    pub category: Option<ServiceCategory>,
    pub total_price: Decimal,
    pub deposit_percent: Option<Decimal>,
    pub pay_full_now: bool,
}

/// Result of checkout totals calculation
#[derive(Debug, Clone)]
pub struct CheckoutTotalsResult {
    pub lines: Vec<DepositBreakdown>,
    pub total_amount: Decimal,
    pub total_deposit: Decimal,
    pub total_remaining: Decimal,
}

/// Calculate checkout totals from lines.
///
/// Each line resolves its own percent and deposit before summation, so a
/// cart mixing tours and transfers is never charged one blended percent.
pub fn compute_checkout_totals(
    lines: &[CheckoutLineInput],
    checkout_percent: Option<Decimal>,
    pay_full_now: bool,
) -> CheckoutTotalsResult {
    let breakdowns: Vec<DepositBreakdown> = lines
        .iter()
        .map(|line| {
            let percent = resolve_deposit_percent(
                line.category,
                line.deposit_percent,
                checkout_percent,
                line.pay_full_now || pay_full_now,
            );
            split_deposit(line.total_price, percent)
        })
        .collect();

    // saturating: the service layer caps line amounts, direct callers may not
    let total_amount = breakdowns
        .iter()
        .fold(Decimal::ZERO, |sum, b| sum.saturating_add(b.total));
    let total_deposit = breakdowns
        .iter()
        .fold(Decimal::ZERO, |sum, b| sum.saturating_add(b.deposit_amount));

    CheckoutTotalsResult {
        lines: breakdowns,
        total_amount,
        total_deposit,
        total_remaining: total_amount.saturating_sub(total_deposit),
    }
}
