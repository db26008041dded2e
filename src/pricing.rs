//! Pricing recommendations
//!
//! Converts a demand forecast into per-room-type recommended price bands,
//! plus a competitor positioning analysis over market rate quotes.

use crate::forecast::DemandPrediction;
use crate::records::CompetitorRate;
use crate::types::{Date, Factor, Money, Percentage};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution};

/// One sellable room category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub name: String,
    pub base_price: Money,
    pub type_factor: Factor,
}

impl RoomType {
    pub fn new(name: impl Into<String>, base_price: Money, type_factor: Factor) -> Self {
        Self {
            name: name.into(),
            base_price,
            type_factor,
        }
    }
}

/// Room-type configuration for a property.
///
/// An explicit input rather than a module constant so properties can
/// override their room mix (e.g. from a TOML file); `Default` is the
/// standard four-category table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeTable {
    pub room_types: Vec<RoomType>,
}

impl Default for RoomTypeTable {
    fn default() -> Self {
        Self {
            room_types: vec![
                RoomType::new("Standard", 100.0, 1.0),
                RoomType::new("Deluxe", 150.0, 1.1),
                RoomType::new("Suite", 250.0, 1.2),
                RoomType::new("Executive Suite", 350.0, 1.3),
            ],
        }
    }
}

/// Recommended price band for one room type on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecommendation {
    pub room_type: String,
    pub recommended_price: Money,
    pub price_range: PriceRange,
    /// Recommended price weighted by the occupancy forecast
    pub expected_revenue: Money,
}

/// Min/max band around a recommended price (+-10%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

/// Recommendations for all room types on a single forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPricing {
    pub date: Date,
    pub occupancy_forecast: Percentage,
    pub room_types: Vec<PricingRecommendation>,
}

/// Price recommender over a configured room-type table
#[derive(Debug, Clone, Default)]
pub struct PricingRecommender {
    table: RoomTypeTable,
}

impl PricingRecommender {
    pub fn new(table: RoomTypeTable) -> Self {
        Self { table }
    }

    pub fn room_types(&self) -> &[RoomType] {
        &self.table.room_types
    }

    /// Produce one `DailyPricing` per forecast day, in forecast order
    pub fn recommend(&self, forecast: &[DemandPrediction]) -> Vec<DailyPricing> {
        forecast
            .iter()
            .map(|prediction| DailyPricing {
                date: prediction.date,
                occupancy_forecast: prediction.predicted_occupancy,
                room_types: self
                    .table
                    .room_types
                    .iter()
                    .map(|room| recommend_for_room(room, prediction))
                    .collect(),
            })
            .collect()
    }
}

fn recommend_for_room(room: &RoomType, prediction: &DemandPrediction) -> PricingRecommendation {
    let demand = demand_factor(prediction.predicted_occupancy);
    let recommended =
        (room.base_price * demand * room.type_factor * prediction.factors.seasonality_factor)
            .round();

    PricingRecommendation {
        room_type: room.name.clone(),
        recommended_price: recommended,
        price_range: PriceRange {
            min: (recommended * 0.9).round(),
            max: (recommended * 1.1).round(),
        },
        expected_revenue: recommended * prediction.predicted_occupancy / 100.0,
    }
}

/// Price uplift as forecast occupancy rises
fn demand_factor(occupancy: Percentage) -> Factor {
    if occupancy > 80.0 {
        1.4
    } else if occupancy > 60.0 {
        1.2
    } else if occupancy > 40.0 {
        1.0
    } else {
        0.9
    }
}

/// Market positioning of a recommended price against competitor rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Positioning {
    /// Priced more than 5% above the competitor mean
    Premium,
    /// Within 5% of the competitor mean
    Parity,
    /// Priced more than 5% below the competitor mean
    Value,
}

/// Competitor comparison for one room type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorGap {
    pub room_type: String,
    pub recommended_price: Money,
    pub competitor_mean: Money,
    /// Signed gap vs. the competitor mean, in percent
    pub gap_percent: f64,
    pub positioning: Positioning,
}

/// Compare a day's recommendations against competitor rate quotes.
///
/// Room types with no competitor quote are skipped; quotes are matched by
/// exact room-type name.
pub fn competitor_gap(pricing: &DailyPricing, rates: &[CompetitorRate]) -> Vec<CompetitorGap> {
    pricing
        .room_types
        .iter()
        .filter_map(|rec| {
            let quotes: Vec<f64> = rates
                .iter()
                .filter(|r| r.room_type == rec.room_type && r.rate > 0.0)
                .map(|r| r.rate)
                .collect();
            if quotes.is_empty() {
                return None;
            }

            let competitor_mean = Data::new(quotes).mean().unwrap_or(0.0);
            let gap_percent =
                (rec.recommended_price - competitor_mean) / competitor_mean * 100.0;
            let positioning = if gap_percent > 5.0 {
                Positioning::Premium
            } else if gap_percent < -5.0 {
                Positioning::Value
            } else {
                Positioning::Parity
            };

            Some(CompetitorGap {
                room_type: rec.room_type.clone(),
                recommended_price: rec.recommended_price,
                competitor_mean,
                gap_percent,
                positioning,
            })
        })
        .collect()
}
