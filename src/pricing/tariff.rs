//! Transfer tariff table and route price resolution.
//!
//! The tariff is a build-time constant: every bookable route carries a
//! five-step tier schedule keyed by passenger count. Both directions of a
//! route are separate entries and are priced independently.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Flat surcharge per passenger beyond the 8-passenger tier.
pub const EXTRA_PASSENGER_PRICE: Decimal = dec!(20);

/// Largest group covered by the tier schedule.
pub const MAX_TIER_PASSENGERS: i64 = 8;

/// Pickup / drop-off points the company quotes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Cdg,
    Orly,
    Beauvais,
    Paris,
    Disneyland,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::Cdg,
        Location::Orly,
        Location::Beauvais,
        Location::Paris,
        Location::Disneyland,
    ];

    /// Identifier used by the booking forms
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Cdg => "cdg",
            Location::Orly => "orly",
            Location::Beauvais => "beauvais",
            Location::Paris => "paris",
            Location::Disneyland => "disneyland",
        }
    }

    /// Human-readable label shown in selectors
    pub fn label(&self) -> &'static str {
        match self {
            Location::Cdg => "Aeropuerto CDG",
            Location::Orly => "Aeropuerto Orly",
            Location::Beauvais => "Aeropuerto Beauvais",
            Location::Paris => "París Centro",
            Location::Disneyland => "Disneyland",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocation(pub String);

impl fmt::Display for UnknownLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown location '{}'", self.0)
    }
}

impl std::error::Error for UnknownLocation {}

impl FromStr for Location {
    type Err = UnknownLocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        Location::ALL
            .into_iter()
            .find(|loc| loc.as_str() == id)
            .ok_or_else(|| UnknownLocation(s.to_string()))
    }
}

/// Directional origin -> destination pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteKey {
    pub origin: Location,
    pub destination: Location,
}

impl RouteKey {
    pub fn new(origin: Location, destination: Location) -> Self {
        Self { origin, destination }
    }

    /// Parse both ends; `None` when either identifier is not a known location.
    pub fn parse(origin: &str, destination: &str) -> Option<Self> {
        let origin = origin.parse().ok()?;
        let destination = destination.parse().ok()?;
        Some(Self::new(origin, destination))
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.destination)
    }
}

/// Prices for up to 4, 5, 6, 7 and 8 passengers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSchedule(pub [Decimal; 5]);

impl TierSchedule {
    pub fn from_euros(prices: [u32; 5]) -> Self {
        Self(prices.map(Decimal::from))
    }

    /// Price of the smallest tier, used for "from €X" copy
    pub fn base(&self) -> Decimal {
        self.0[0]
    }

    /// Price for an already-validated passenger count (>= 1).
    pub fn price_for(&self, passengers: i64) -> Decimal {
        match passengers {
            i64::MIN..=4 => self.0[0],
            5 => self.0[1],
            6 => self.0[2],
            7 => self.0[3],
            8 => self.0[4],
            n => self.0[4] + EXTRA_PASSENGER_PRICE * Decimal::from(n - MAX_TIER_PASSENGERS),
        }
    }
}

// Both directions of every route share the same prices today.
const STANDARD_ROUTES: [(Location, Location, [u32; 5]); 7] = [
    (Location::Cdg, Location::Paris, [65, 85, 103, 109, 113]),
    (Location::Orly, Location::Paris, [60, 80, 95, 104, 108]),
    (Location::Beauvais, Location::Paris, [125, 145, 160, 180, 190]),
    (Location::Cdg, Location::Disneyland, [70, 82, 98, 112, 128]),
    (Location::Orly, Location::Disneyland, [73, 90, 106, 118, 134]),
    (Location::Beauvais, Location::Disneyland, [145, 155, 175, 185, 195]),
    (Location::Paris, Location::Disneyland, [70, 90, 106, 118, 134]),
];

/// Immutable route -> tier schedule mapping
#[derive(Debug, Clone, Default)]
pub struct TariffTable {
    routes: BTreeMap<RouteKey, TierSchedule>,
}

impl TariffTable {
    /// Build a table from explicit entries. Later duplicates replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = (RouteKey, TierSchedule)>) -> Self {
        Self {
            routes: entries.into_iter().collect(),
        }
    }

    /// The company's published tariff, built once per process.
    pub fn standard() -> &'static TariffTable {
        static TABLE: OnceLock<TariffTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            TariffTable::from_entries(STANDARD_ROUTES.iter().flat_map(|&(a, b, prices)| {
                let tiers = TierSchedule::from_euros(prices);
                [(RouteKey::new(a, b), tiers), (RouteKey::new(b, a), tiers)]
            }))
        })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, key: &RouteKey) -> Option<&TierSchedule> {
        self.routes.get(key)
    }

    /// All routes ordered by (origin, destination)
    pub fn routes(&self) -> impl Iterator<Item = (&RouteKey, &TierSchedule)> {
        self.routes.iter()
    }

    /// Resolve the base price of a route for a passenger count.
    ///
    /// Returns `None` when the route is not offered, including unknown or
    /// empty location identifiers. Non-positive passenger counts are
    /// treated as a single passenger.
    pub fn resolve_base_price(
        &self,
        origin: &str,
        destination: &str,
        passengers: i64,
    ) -> Option<Decimal> {
        let key = RouteKey::parse(origin, destination)?;
        let tiers = self.get(&key)?;

        let passengers = if passengers < 1 {
            tracing::warn!(
                route = %key,
                passengers,
                "Non-positive passenger count, pricing as 1 passenger"
            );
            1
        } else {
            passengers
        };

        Some(tiers.price_for(passengers))
    }

    /// Destinations reachable from `origin`, in stable order.
    pub fn list_destinations_from(&self, origin: &str) -> Vec<Location> {
        let Ok(origin) = origin.parse::<Location>() else {
            return vec![];
        };
        self.routes
            .keys()
            .filter(|key| key.origin == origin)
            .map(|key| key.destination)
            .collect()
    }

    /// Cheapest 4-passenger price among routes leaving `origin`.
    pub fn minimum_base_price_from(&self, origin: &str) -> Option<Decimal> {
        let origin = origin.parse::<Location>().ok()?;
        self.routes
            .iter()
            .filter(|(key, _)| key.origin == origin)
            .map(|(_, tiers)| tiers.base())
            .min()
    }

    /// Cheapest 4-passenger price across the whole table.
    pub fn global_minimum_base_price(&self) -> Option<Decimal> {
        self.routes.values().map(TierSchedule::base).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static TariffTable {
        TariffTable::standard()
    }

    #[test]
    fn test_standard_table_has_both_directions() {
        assert_eq!(table().len(), 14);
        for (key, tiers) in table().routes() {
            let reverse = RouteKey::new(key.destination, key.origin);
            assert_eq!(table().get(&reverse), Some(tiers), "missing reverse of {}", key);
        }
    }

    #[test]
    fn test_four_passengers_is_first_tier_for_every_route() {
        for (key, tiers) in table().routes() {
            let price = table()
                .resolve_base_price(key.origin.as_str(), key.destination.as_str(), 4)
                .unwrap();
            assert_eq!(price, tiers.0[0]);
        }
    }

    #[test]
    fn test_tier_selection_cdg_paris() {
        let t = table();
        assert_eq!(t.resolve_base_price("cdg", "paris", 1), Some(dec!(65)));
        assert_eq!(t.resolve_base_price("cdg", "paris", 3), Some(dec!(65)));
        assert_eq!(t.resolve_base_price("cdg", "paris", 5), Some(dec!(85)));
        assert_eq!(t.resolve_base_price("cdg", "paris", 6), Some(dec!(103)));
        assert_eq!(t.resolve_base_price("cdg", "paris", 7), Some(dec!(109)));
        assert_eq!(t.resolve_base_price("cdg", "paris", 8), Some(dec!(113)));
    }

    #[test]
    fn test_overflow_adds_twenty_per_extra_passenger() {
        for (key, _) in table().routes() {
            let (o, d) = (key.origin.as_str(), key.destination.as_str());
            let eight = table().resolve_base_price(o, d, 8).unwrap();
            assert_eq!(table().resolve_base_price(o, d, 9), Some(eight + dec!(20)));
            for k in 1..=6 {
                assert_eq!(
                    table().resolve_base_price(o, d, 8 + k),
                    Some(eight + dec!(20) * Decimal::from(k))
                );
            }
        }
    }

    #[test]
    fn test_non_positive_passengers_priced_as_one() {
        let t = table();
        assert_eq!(t.resolve_base_price("orly", "paris", 0), Some(dec!(60)));
        assert_eq!(t.resolve_base_price("orly", "paris", -3), Some(dec!(60)));
    }

    #[test]
    fn test_unknown_route_is_none() {
        let t = table();
        assert_eq!(t.resolve_base_price("nonexistent", "nowhere", 4), None);
        assert_eq!(t.resolve_base_price("", "paris", 4), None);
        assert_eq!(t.resolve_base_price("cdg", "", 4), None);
        // Both ends known but no route between them
        assert_eq!(t.resolve_base_price("cdg", "orly", 4), None);
        assert_eq!(t.resolve_base_price("paris", "paris", 4), None);
    }

    #[test]
    fn test_location_parsing_is_lenient_on_case_and_spaces() {
        assert_eq!(" CDG ".parse::<Location>(), Ok(Location::Cdg));
        assert_eq!("Disneyland".parse::<Location>(), Ok(Location::Disneyland));
        assert!("louvre".parse::<Location>().is_err());
        assert_eq!(table().resolve_base_price("Paris", "ORLY", 2), Some(dec!(60)));
    }

    #[test]
    fn test_route_key_display() {
        let key = RouteKey::new(Location::Beauvais, Location::Disneyland);
        assert_eq!(key.to_string(), "beauvais->disneyland");
    }

    #[test]
    fn test_list_destinations_from() {
        assert_eq!(
            table().list_destinations_from("cdg"),
            vec![Location::Paris, Location::Disneyland]
        );
        assert_eq!(
            table().list_destinations_from("paris"),
            vec![Location::Cdg, Location::Orly, Location::Beauvais, Location::Disneyland]
        );
        assert!(table().list_destinations_from("nowhere").is_empty());
    }

    #[test]
    fn test_minimum_base_price_from_origin() {
        let expected = table()
            .routes()
            .filter(|(key, _)| key.origin == Location::Cdg)
            .map(|(_, tiers)| tiers.0[0])
            .min();
        assert_eq!(table().minimum_base_price_from("cdg"), expected);
        assert_eq!(table().minimum_base_price_from("cdg"), Some(dec!(65)));
        assert_eq!(table().minimum_base_price_from("beauvais"), Some(dec!(125)));
        assert_eq!(table().minimum_base_price_from("nowhere"), None);
    }

    #[test]
    fn test_global_minimum_base_price() {
        assert_eq!(table().global_minimum_base_price(), Some(dec!(60)));
        assert_eq!(TariffTable::default().global_minimum_base_price(), None);
    }

    #[test]
    fn test_custom_table_with_asymmetric_prices() {
        let custom = TariffTable::from_entries([
            (
                RouteKey::new(Location::Cdg, Location::Paris),
                TierSchedule::from_euros([50, 60, 70, 80, 90]),
            ),
            (
                RouteKey::new(Location::Paris, Location::Cdg),
                TierSchedule::from_euros([55, 65, 75, 85, 95]),
            ),
        ]);
        assert_eq!(custom.resolve_base_price("cdg", "paris", 4), Some(dec!(50)));
        assert_eq!(custom.resolve_base_price("paris", "cdg", 4), Some(dec!(55)));
        assert_eq!(custom.resolve_base_price("paris", "cdg", 10), Some(dec!(135)));
        assert_eq!(custom.minimum_base_price_from("orly"), None);
    }
}
