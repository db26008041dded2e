//! Historical revenue and market records
//!
//! One record per (property, calendar date). Records are produced by the
//! ingestion side of the platform and are read-only to this pipeline.

use crate::types::{Date, Factor, Money, Percentage, PropertyId};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Daily revenue snapshot for a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub property_id: PropertyId,
    pub date: Date,
    pub room_revenue: Money,
    pub food_beverage_revenue: Money,
    pub spa_revenue: Money,
    pub retail_revenue: Money,
    pub other_revenue: Money,
    pub total_revenue: Money,
    /// Percentage of available rooms sold, 0-100
    pub occupancy_rate: Percentage,
    /// Average daily rate: mean revenue per occupied room per night
    pub adr: Money,
    /// Revenue per available room: ADR x occupancy rate
    pub revpar: Money,
    /// Revenue share by market segment (e.g. "corporate", "leisure")
    #[serde(default)]
    pub market_segments: HashMap<String, f64>,
    /// Revenue share by booking channel (e.g. "direct", "ota")
    #[serde(default)]
    pub channel_distribution: HashMap<String, f64>,
}

impl RevenueRecord {
    /// Build a record from revenue categories and occupancy metrics,
    /// deriving total revenue and RevPAR
    pub fn from_parts(
        property_id: impl Into<PropertyId>,
        date: Date,
        room: Money,
        food_beverage: Money,
        spa: Money,
        retail: Money,
        other: Money,
        occupancy_rate: Percentage,
        adr: Money,
    ) -> Self {
        Self {
            property_id: property_id.into(),
            date,
            room_revenue: room,
            food_beverage_revenue: food_beverage,
            spa_revenue: spa,
            retail_revenue: retail,
            other_revenue: other,
            total_revenue: room + food_beverage + spa + retail + other,
            occupancy_rate,
            adr,
            revpar: adr * occupancy_rate / 100.0,
            market_segments: HashMap::new(),
            channel_distribution: HashMap::new(),
        }
    }

    /// Sum of the category revenues. Ingested records should satisfy
    /// `total_revenue == category_total()`, but this is not enforced.
    pub fn category_total(&self) -> Money {
        self.room_revenue
            + self.food_beverage_revenue
            + self.spa_revenue
            + self.retail_revenue
            + self.other_revenue
    }
}

/// Expected demand impact of a market event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventImpact {
    High,
    Medium,
    Low,
}

impl EventImpact {
    /// Additive demand lift contributed to the events factor
    pub fn demand_lift(&self) -> Factor {
        match self {
            EventImpact::High => 0.2,
            EventImpact::Medium => 0.1,
            EventImpact::Low => 0.05,
        }
    }
}

/// Event in the property's market (conference, festival, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub name: String,
    /// Free-form category, e.g. "conference" or "sports"
    pub kind: String,
    pub start_date: Date,
    pub end_date: Date,
    pub expected_impact: EventImpact,
}

impl MarketEvent {
    /// Whether the event is running on the given date (inclusive bounds)
    pub fn covers(&self, date: Date) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Expected demand impact of the weather forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherImpact {
    Positive,
    Neutral,
    Negative,
}

/// Weather forecast attached to a market record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub temperature: f64,
    pub condition: String,
    pub expected_impact: WeatherImpact,
}

/// Competitor rate quote for a room type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRate {
    pub name: String,
    pub room_type: String,
    pub rate: Money,
}

/// Daily market conditions snapshot for a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRecord {
    pub property_id: PropertyId,
    pub date: Date,
    #[serde(default)]
    pub competitor_rates: Vec<CompetitorRate>,
    #[serde(default)]
    pub events: Vec<MarketEvent>,
    #[serde(default)]
    pub weather: Option<WeatherForecast>,
    #[serde(default = "default_seasonality")]
    pub seasonality_factor: Factor,
    /// Aggregate demand indicator on a 0-10 scale
    #[serde(default)]
    pub demand_indicator: f64,
}

fn default_seasonality() -> Factor {
    1.0
}

impl MarketRecord {
    /// Empty snapshot for a (property, date) pair
    pub fn new(property_id: impl Into<PropertyId>, date: Date) -> Self {
        Self {
            property_id: property_id.into(),
            date,
            competitor_rates: Vec::new(),
            events: Vec::new(),
            weather: None,
            seasonality_factor: 1.0,
            demand_indicator: 0.0,
        }
    }
}
