//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::DepositBreakdown;
use super::tariff::{Location, RouteKey, TierSchedule};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// A location with its display label
#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    pub id: &'static str,
    pub label: &'static str,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            id: location.as_str(),
            label: location.label(),
        }
    }
}

/// One tariff entry
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub origin: LocationResponse,
    pub destination: LocationResponse,
    /// Prices for up to 4, 5, 6, 7 and 8 passengers
    pub tiers: Vec<MoneyResponse>,
}

impl RouteResponse {
    pub fn new(key: &RouteKey, tiers: &TierSchedule, currency: &str) -> Self {
        Self {
            origin: key.origin.into(),
            destination: key.destination.into(),
            tiers: tiers.0.iter().map(|p| MoneyResponse::new(*p, currency)).collect(),
        }
    }
}

/// Response for the tariff listing
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteResponse>,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_passenger_price: Decimal,
}

/// Response for destinations reachable from an origin
#[derive(Debug, Serialize)]
pub struct DestinationsResponse {
    pub origin: Option<String>,
    pub destinations: Vec<LocationResponse>,
}

/// Response for "starting from" prices
#[derive(Debug, Serialize)]
pub struct MinimumPriceResponse {
    pub origin: Option<String>,
    pub price: Option<MoneyResponse>,
}

/// Response for the night-time check
#[derive(Debug, Serialize)]
pub struct NightTimeResponse {
    pub time: String,
    pub is_night_time: bool,
}

/// Response for base price resolution
#[derive(Debug, Serialize)]
pub struct BasePriceResponse {
    pub origin: String,
    pub destination: String,
    pub passengers: i64,
    pub supported: bool,
    pub price: Option<MoneyResponse>,
}

/// Response for a deposit split
#[derive(Debug, Serialize)]
pub struct DepositResponse {
    pub total: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposit_percent: Decimal,
    pub deposit_amount: MoneyResponse,
    pub remaining_amount: MoneyResponse,
}

impl DepositResponse {
    pub fn new(breakdown: &DepositBreakdown, currency: &str) -> Self {
        Self {
            total: MoneyResponse::new(breakdown.total, currency),
            deposit_percent: breakdown.deposit_percent,
            deposit_amount: MoneyResponse::new(breakdown.deposit_amount, currency),
            remaining_amount: MoneyResponse::new(breakdown.remaining_amount, currency),
        }
    }
}

/// Response for a transfer quote
#[derive(Debug, Serialize)]
pub struct TransferQuoteResponse {
    pub route: String,
    pub supported: bool,
    pub passengers: i64,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub is_night_time: bool,
    pub base_price: Option<MoneyResponse>,
    pub night_surcharge: Option<MoneyResponse>,
    pub deposit: Option<DepositResponse>,
}

/// Response for checkout totals
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub lines: Vec<DepositResponse>,
    pub total_amount: MoneyResponse,
    pub total_deposit: MoneyResponse,
    pub total_remaining: MoneyResponse,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
}
