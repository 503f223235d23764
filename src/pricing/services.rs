//! Pricing service functions.
//!
//! These combine the tariff table and the pure calculators into the quotes
//! the booking site and checkout API ask for, validating request payloads
//! on the way in.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calculators::{
    compute_checkout_totals, is_night_time, resolve_deposit_percent, split_deposit,
    CheckoutLineInput, CheckoutTotalsResult, DepositBreakdown, ServiceCategory,
};
use super::requests::{CheckoutRequest, DepositRequest, TransferQuoteRequest};
use super::tariff::{RouteKey, TariffTable};

/// Night surcharge applied to transfers when no configuration overrides it
pub const DEFAULT_NIGHT_SURCHARGE: Decimal = dec!(5);

/// Largest line amount accepted from a request
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

/// Knobs that shape quotes but are not part of the tariff
#[derive(Debug, Clone)]
pub struct QuoteSettings {
    pub currency: String,
    pub night_surcharge: Decimal,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            night_surcharge: DEFAULT_NIGHT_SURCHARGE,
        }
    }
}

/// Priced transfer, present only when the route is offered
#[derive(Debug, Clone)]
pub struct PricedTransfer {
    pub base_price: Decimal,
    pub night_surcharge: Decimal,
    pub deposit: DepositBreakdown,
}

/// Result of a transfer quote
#[derive(Debug, Clone)]
pub struct TransferQuoteResult {
    pub route: String,
    pub passengers: i64,
    pub is_night_time: bool,
    pub priced: Option<PricedTransfer>,
}

impl TransferQuoteResult {
    pub fn is_supported(&self) -> bool {
        self.priced.is_some()
    }
}

/// Pricing calculation error types
#[derive(Debug, Clone)]
pub enum PricingError {
    InvalidAmount { field: String, value: Decimal },
    InvalidPercent { field: String, value: Decimal },
}

impl PricingError {
    /// Stable machine-readable name for API error bodies
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidAmount { .. } => "invalid_amount",
            PricingError::InvalidPercent { .. } => "invalid_percent",
        }
    }
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::InvalidAmount { field, value } => {
                write!(
                    f,
                    "Amount {} must be between 0 and {} (got {})",
                    field, MAX_AMOUNT, value
                )
            }
            PricingError::InvalidPercent { field, value } => {
                write!(f, "Percent {} must be between 0 and 100 (got {})", field, value)
            }
        }
    }
}

impl std::error::Error for PricingError {}

fn check_amount(field: &str, value: Decimal) -> Result<(), PricingError> {
    if value < Decimal::ZERO || value > MAX_AMOUNT {
        return Err(PricingError::InvalidAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_percent(field: &str, value: Option<Decimal>) -> Result<(), PricingError> {
    match value {
        Some(v) if v < Decimal::ZERO || v > Decimal::ONE_HUNDRED => {
            Err(PricingError::InvalidPercent {
                field: field.to_string(),
                value: v,
            })
        }
        _ => Ok(()),
    }
}

/// Quote a transfer: base route price, night surcharge and deposit split.
///
/// An unsupported route is a valid outcome (`priced == None`); the booking
/// site answers it with a "contact us for a quote" prompt.
pub fn quote_transfer(
    table: &TariffTable,
    settings: &QuoteSettings,
    request: &TransferQuoteRequest,
) -> Result<TransferQuoteResult, PricingError> {
    check_percent("deposit_percent", request.deposit_percent)?;

    let night = request.time.as_deref().map(is_night_time).unwrap_or(false);
    let passengers = request.passengers.max(1);
    let route = RouteKey::parse(&request.origin, &request.destination)
        .map(|key| key.to_string())
        .unwrap_or_else(|| format!("{}->{}", request.origin, request.destination));

    let Some(base_price) =
        table.resolve_base_price(&request.origin, &request.destination, request.passengers)
    else {
        tracing::info!(route = %route, "Transfer quote requested for unsupported route");
        return Ok(TransferQuoteResult {
            route,
            passengers,
            is_night_time: night,
            priced: None,
        });
    };

    let night_surcharge = if night {
        settings.night_surcharge
    } else {
        Decimal::ZERO
    };
    let percent = resolve_deposit_percent(
        Some(ServiceCategory::Transfer),
        request.deposit_percent,
        None,
        request.pay_full_now,
    );
    let deposit = split_deposit(base_price + night_surcharge, percent);

    tracing::debug!(
        route = %route,
        passengers,
        total = %deposit.total,
        deposit = %deposit.deposit_amount,
        "Transfer quoted"
    );

    Ok(TransferQuoteResult {
        route,
        passengers,
        is_night_time: night,
        priced: Some(PricedTransfer {
            base_price,
            night_surcharge,
            deposit,
        }),
    })
}

/// Deposit split for a single line item.
pub fn quote_deposit(request: &DepositRequest) -> Result<DepositBreakdown, PricingError> {
    check_amount("total_price", request.total_price)?;
    check_percent("deposit_percent", request.deposit_percent)?;

    let percent = resolve_deposit_percent(
        ServiceCategory::parse(&request.category),
        request.deposit_percent,
        None,
        request.pay_full_now,
    );
    Ok(split_deposit(request.total_price, percent))
}

/// Totals for a whole cart, each item split independently.
pub fn quote_checkout(request: &CheckoutRequest) -> Result<CheckoutTotalsResult, PricingError> {
    check_percent("deposit_percent", request.deposit_percent)?;

    let lines = request
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<CheckoutLineInput, PricingError> {
            check_amount(&format!("items[{}].total_price", i), item.total_price)?;
            check_percent(&format!("items[{}].deposit_percent", i), item.deposit_percent)?;
            Ok(CheckoutLineInput {
                category: ServiceCategory::parse(&item.category),
                total_price: item.total_price,
                deposit_percent: item.deposit_percent,
                pay_full_now: item.pay_full_now,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let totals = compute_checkout_totals(&lines, request.deposit_percent, request.pay_full_now);

    tracing::debug!(
        items = totals.lines.len(),
        total = %totals.total_amount,
        deposit = %totals.total_deposit,
        "Checkout quoted"
    );

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::requests::CheckoutItemRequest;

    fn transfer_request(origin: &str, destination: &str, passengers: i64) -> TransferQuoteRequest {
        TransferQuoteRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            passengers,
            date: None,
            time: None,
            deposit_percent: None,
            pay_full_now: false,
        }
    }

    fn item(category: &str, total: Decimal) -> CheckoutItemRequest {
        CheckoutItemRequest {
            title: None,
            category: category.to_string(),
            total_price: total,
            deposit_percent: None,
            pay_full_now: false,
        }
    }

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::InvalidAmount {
            field: "total_price".to_string(),
            value: dec!(-1),
        };
        assert!(err.to_string().contains("total_price"));
        assert_eq!(err.error_type(), "invalid_amount");

        let err = PricingError::InvalidPercent {
            field: "deposit_percent".to_string(),
            value: dec!(120),
        };
        assert!(err.to_string().contains("120"));
        assert_eq!(err.error_type(), "invalid_percent");
    }

    #[test]
    fn test_quote_transfer_day() {
        let mut request = transfer_request("cdg", "paris", 3);
        request.time = Some("14:00".to_string());

        let quote =
            quote_transfer(TariffTable::standard(), &QuoteSettings::default(), &request).unwrap();
        let priced = quote.priced.unwrap();

        assert_eq!(quote.route, "cdg->paris");
        assert!(!quote.is_night_time);
        assert_eq!(priced.base_price, dec!(65));
        assert_eq!(priced.night_surcharge, dec!(0));
        assert_eq!(priced.deposit.total, dec!(65));
        assert_eq!(priced.deposit.deposit_amount, dec!(6.5));
        assert_eq!(priced.deposit.remaining_amount, dec!(58.5));
    }

    #[test]
    fn test_quote_transfer_night_surcharge() {
        let mut request = transfer_request("paris", "beauvais", 9);
        request.time = Some("22:30".to_string());

        let quote =
            quote_transfer(TariffTable::standard(), &QuoteSettings::default(), &request).unwrap();
        let priced = quote.priced.unwrap();

        assert!(quote.is_night_time);
        assert_eq!(priced.base_price, dec!(210));
        assert_eq!(priced.night_surcharge, dec!(5));
        assert_eq!(priced.deposit.total, dec!(215));
        assert_eq!(priced.deposit.deposit_amount, dec!(21.5));
    }

    #[test]
    fn test_quote_transfer_custom_surcharge_and_pay_full() {
        let settings = QuoteSettings {
            currency: "EUR".to_string(),
            night_surcharge: dec!(12.5),
        };
        let mut request = transfer_request("orly", "paris", 4);
        request.time = Some("04:00".to_string());
        request.pay_full_now = true;

        let quote = quote_transfer(TariffTable::standard(), &settings, &request).unwrap();
        let priced = quote.priced.unwrap();

        assert_eq!(priced.deposit.total, dec!(72.5));
        assert_eq!(priced.deposit.deposit_amount, dec!(72.5));
        assert_eq!(priced.deposit.remaining_amount, dec!(0));
    }

    #[test]
    fn test_quote_transfer_unsupported_route() {
        let request = transfer_request("nonexistent", "nowhere", 4);
        let quote =
            quote_transfer(TariffTable::standard(), &QuoteSettings::default(), &request).unwrap();

        assert!(!quote.is_supported());
        assert_eq!(quote.route, "nonexistent->nowhere");
    }

    #[test]
    fn test_quote_transfer_reports_coerced_passengers() {
        let settings = QuoteSettings::default();

        let supported = transfer_request("cdg", "paris", 0);
        let quote = quote_transfer(TariffTable::standard(), &settings, &supported).unwrap();
        assert_eq!(quote.passengers, 1);

        let unsupported = transfer_request("lyon", "paris", -3);
        let quote = quote_transfer(TariffTable::standard(), &settings, &unsupported).unwrap();
        assert!(!quote.is_supported());
        assert_eq!(quote.passengers, 1);
    }

    #[test]
    fn test_quote_transfer_rejects_bad_percent() {
        let mut request = transfer_request("cdg", "paris", 2);
        request.deposit_percent = Some(dec!(101));

        let err = quote_transfer(TariffTable::standard(), &QuoteSettings::default(), &request)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidPercent { .. }));
    }

    #[test]
    fn test_quote_deposit_validation() {
        let request = DepositRequest {
            total_price: dec!(-10),
            category: "tour".to_string(),
            deposit_percent: None,
            pay_full_now: false,
        };
        assert!(matches!(
            quote_deposit(&request),
            Err(PricingError::InvalidAmount { .. })
        ));

        let request = DepositRequest {
            total_price: Decimal::MAX,
            category: "tour".to_string(),
            deposit_percent: None,
            pay_full_now: false,
        };
        assert!(matches!(
            quote_deposit(&request),
            Err(PricingError::InvalidAmount { .. })
        ));

        let request = DepositRequest {
            total_price: MAX_AMOUNT,
            category: "tour".to_string(),
            deposit_percent: None,
            pay_full_now: false,
        };
        assert_eq!(quote_deposit(&request).unwrap().deposit_amount, dec!(200000000));

        let request = DepositRequest {
            total_price: dec!(100),
            category: "tour".to_string(),
            deposit_percent: None,
            pay_full_now: false,
        };
        let breakdown = quote_deposit(&request).unwrap();
        assert_eq!(breakdown.deposit_amount, dec!(20));
        assert_eq!(breakdown.remaining_amount, dec!(80));
    }

    #[test]
    fn test_quote_checkout_mixed_cart() {
        let request = CheckoutRequest {
            items: vec![item("traslado", dec!(113)), item("tour", dec!(180)), item("evento", dec!(90))],
            deposit_percent: None,
            pay_full_now: false,
        };

        let totals = quote_checkout(&request).unwrap();
        assert_eq!(totals.total_amount, dec!(383));
        // 11.30 + 36 + 18
        assert_eq!(totals.total_deposit, dec!(65.3));
        assert_eq!(totals.total_remaining, dec!(317.7));
    }

    #[test]
    fn test_quote_checkout_reports_offending_item() {
        let request = CheckoutRequest {
            items: vec![item("tour", dec!(10)), item("tour", dec!(-5))],
            deposit_percent: None,
            pay_full_now: false,
        };

        match quote_checkout(&request) {
            Err(PricingError::InvalidAmount { field, .. }) => {
                assert_eq!(field, "items[1].total_price")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
