//! Pricing engine module for the booking site.
//!
//! Provides transfer tariffs, night-time classification and deposit
//! calculations. The booking site and checkout API call it via HTTP/JSON.

pub mod calculators;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod tariff;

// Re-export commonly used items
pub use calculators::{compute_deposit, is_night_time, round_money, DepositBreakdown, ServiceCategory};
pub use routes::router;
pub use services::{PricingError, QuoteSettings, TransferQuoteResult};
pub use tariff::{Location, RouteKey, TariffTable, TierSchedule};
