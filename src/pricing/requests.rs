//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

fn default_passengers() -> i64 {
    1
}

/// Query string carrying an optional origin
#[derive(Debug, Deserialize)]
pub struct OriginQuery {
    #[serde(default)]
    pub origin: Option<String>,
}

/// Query string for the night-time check
#[derive(Debug, Deserialize)]
pub struct NightTimeQuery {
    #[serde(default)]
    pub time: String,
}

/// Request to resolve a route's base price
#[derive(Debug, Deserialize)]
pub struct BasePriceRequest {
    pub origin: String,
    pub destination: String,
    #[serde(default = "default_passengers")]
    pub passengers: i64,
}

/// Request to quote a transfer
#[derive(Debug, Deserialize)]
pub struct TransferQuoteRequest {
    pub origin: String,
    pub destination: String,
    #[serde(default = "default_passengers")]
    pub passengers: i64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Pickup time, "HH:MM"
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub deposit_percent: Option<Decimal>,
    #[serde(default)]
    pub pay_full_now: bool,
}

/// Request to split a single line item
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    pub category: String,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub deposit_percent: Option<Decimal>,
    #[serde(default)]
    pub pay_full_now: bool,
}

/// Request to compute totals for a cart
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItemRequest>,
    /// Applies to items that carry no percent of their own
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub deposit_percent: Option<Decimal>,
    #[serde(default)]
    pub pay_full_now: bool,
}

/// A cart item in the request
#[derive(Debug, Deserialize)]
pub struct CheckoutItemRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub category: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub deposit_percent: Option<Decimal>,
    #[serde(default)]
    pub pay_full_now: bool,
}
