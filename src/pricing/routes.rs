//! HTTP handlers for the pricing API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::calculators::is_night_time;
use super::requests::{
    BasePriceRequest, CheckoutRequest, DepositRequest, NightTimeQuery, OriginQuery,
    TransferQuoteRequest,
};
use super::responses::{
    BasePriceResponse, CheckoutResponse, DepositResponse, DestinationsResponse,
    MinimumPriceResponse, MoneyResponse, NightTimeResponse, RouteListResponse, RouteResponse,
    TransferQuoteResponse,
};
use super::services;
use super::tariff::EXTRA_PASSENGER_PRICE;

type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;
type QueryParams<T> = std::result::Result<Query<T>, QueryRejection>;

/// Routes mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/routes", get(list_routes))
        .route("/destinations", get(destinations))
        .route("/minimum", get(minimum_price))
        .route("/night", get(night_time))
        .route("/base-price", post(base_price))
        .route("/transfer-quote", post(transfer_quote))
        .route("/deposit", post(deposit))
        .route("/checkout", post(checkout))
}

/// Full tariff listing
async fn list_routes(State(state): State<AppState>) -> Json<RouteListResponse> {
    let currency = &state.quotes.currency;
    let routes = state
        .tariff
        .routes()
        .map(|(key, tiers)| RouteResponse::new(key, tiers, currency))
        .collect();

    Json(RouteListResponse {
        routes,
        extra_passenger_price: EXTRA_PASSENGER_PRICE,
    })
}

/// Destinations reachable from an origin
async fn destinations(
    State(state): State<AppState>,
    query: QueryParams<OriginQuery>,
) -> Result<Json<DestinationsResponse>> {
    let Query(query) = query?;
    let destinations = query
        .origin
        .as_deref()
        .map(|origin| state.tariff.list_destinations_from(origin))
        .unwrap_or_default()
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(DestinationsResponse {
        origin: query.origin,
        destinations,
    }))
}

/// Cheapest starting price, from one origin or across all routes
async fn minimum_price(
    State(state): State<AppState>,
    query: QueryParams<OriginQuery>,
) -> Result<Json<MinimumPriceResponse>> {
    let Query(query) = query?;
    let price = match query.origin.as_deref() {
        Some(origin) => state.tariff.minimum_base_price_from(origin),
        None => state.tariff.global_minimum_base_price(),
    };

    Ok(Json(MinimumPriceResponse {
        origin: query.origin,
        price: price.map(|p| MoneyResponse::new(p, &state.quotes.currency)),
    }))
}

async fn night_time(query: QueryParams<NightTimeQuery>) -> Result<Json<NightTimeResponse>> {
    let Query(query) = query?;
    Ok(Json(NightTimeResponse {
        is_night_time: is_night_time(&query.time),
        time: query.time,
    }))
}

async fn base_price(
    State(state): State<AppState>,
    payload: JsonBody<BasePriceRequest>,
) -> Result<Json<BasePriceResponse>> {
    let Json(request) = payload?;
    let price =
        state
            .tariff
            .resolve_base_price(&request.origin, &request.destination, request.passengers);

    Ok(Json(BasePriceResponse {
        supported: price.is_some(),
        price: price.map(|p| MoneyResponse::new(p, &state.quotes.currency)),
        origin: request.origin,
        destination: request.destination,
        passengers: request.passengers.max(1),
    }))
}

async fn transfer_quote(
    State(state): State<AppState>,
    payload: JsonBody<TransferQuoteRequest>,
) -> Result<Json<TransferQuoteResponse>> {
    let Json(request) = payload?;
    let quote = services::quote_transfer(state.tariff, &state.quotes, &request)?;
    let currency = &state.quotes.currency;

    Ok(Json(TransferQuoteResponse {
        route: quote.route.clone(),
        supported: quote.is_supported(),
        passengers: quote.passengers,
        date: request.date,
        time: request.time,
        is_night_time: quote.is_night_time,
        base_price: quote
            .priced
            .as_ref()
            .map(|p| MoneyResponse::new(p.base_price, currency)),
        night_surcharge: quote
            .priced
            .as_ref()
            .map(|p| MoneyResponse::new(p.night_surcharge, currency)),
        deposit: quote
            .priced
            .as_ref()
            .map(|p| DepositResponse::new(&p.deposit, currency)),
    }))
}

async fn deposit(
    State(state): State<AppState>,
    payload: JsonBody<DepositRequest>,
) -> Result<Json<DepositResponse>> {
    let Json(request) = payload?;
    let breakdown = services::quote_deposit(&request)?;
    Ok(Json(DepositResponse::new(&breakdown, &state.quotes.currency)))
}

async fn checkout(
    State(state): State<AppState>,
    payload: JsonBody<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let Json(request) = payload?;
    let totals = services::quote_checkout(&request)?;
    let currency = &state.quotes.currency;

    Ok(Json(CheckoutResponse {
        lines: totals
            .lines
            .iter()
            .map(|line| DepositResponse::new(line, currency))
            .collect(),
        total_amount: MoneyResponse::new(totals.total_amount, currency),
        total_deposit: MoneyResponse::new(totals.total_deposit, currency),
        total_remaining: MoneyResponse::new(totals.total_remaining, currency),
    }))
}
