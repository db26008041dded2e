//! Demand forecasting
//!
//! Projects occupancy, ADR and RevPAR for a future date range from
//! historical averages and situational multipliers (day of week, season,
//! market events). Pure computation over already-fetched record slices.

use crate::records::{MarketEvent, MarketRecord, RevenueRecord};
use crate::types::{Date, Factor, Money, Percentage};
use chrono::{Datelike, Duration, Weekday};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution};

/// ADR assumed when a property has no rate history at all
const FALLBACK_ADR: Money = 100.0;

/// Multiplier breakdown behind a prediction, kept for explainability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandFactors {
    pub weekend_factor: Factor,
    pub seasonality_factor: Factor,
    pub events_impact: Factor,
}

/// One forecasted day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPrediction {
    pub date: Date,
    /// Clamped to 0-100
    pub predicted_occupancy: Percentage,
    pub predicted_adr: Money,
    /// Always `predicted_occupancy * predicted_adr / 100`
    pub predicted_revpar: Money,
    pub factors: DemandFactors,
}

/// Occupancy/rate forecaster
///
/// Stateless; every call recomputes from the record slices it is given,
/// so identical inputs always produce identical output lists.
#[derive(Debug, Clone, Default)]
pub struct DemandForecaster;

impl DemandForecaster {
    pub fn new() -> Self {
        Self
    }

    /// Produce one prediction per day in `[start, start + days_ahead)`,
    /// ascending by date.
    ///
    /// Empty history is a defined edge case, not an error: occupancy
    /// averages to 0 and ADR falls back to a default base rate.
    pub fn forecast(
        &self,
        history: &[RevenueRecord],
        market: &[MarketRecord],
        start: Date,
        days_ahead: u32,
    ) -> Vec<DemandPrediction> {
        let avg_occupancy = if history.is_empty() {
            0.0
        } else {
            let rates: Vec<f64> = history.iter().map(|r| r.occupancy_rate).collect();
            Data::new(rates).mean().unwrap_or(0.0)
        };
        let base_adr = if history.is_empty() {
            FALLBACK_ADR
        } else {
            let rates: Vec<f64> = history.iter().map(|r| r.adr).collect();
            Data::new(rates).mean().unwrap_or(FALLBACK_ADR)
        };

        let events = collect_events(market);

        (0..days_ahead)
            .map(|i| {
                let date = start + Duration::days(i as i64);
                self.predict_day(date, avg_occupancy, base_adr, &events)
            })
            .collect()
    }

    fn predict_day(
        &self,
        date: Date,
        avg_occupancy: Percentage,
        base_adr: Money,
        events: &[MarketEvent],
    ) -> DemandPrediction {
        let factors = DemandFactors {
            weekend_factor: weekend_factor(date),
            seasonality_factor: seasonality_factor(date),
            events_impact: events_impact(events, date),
        };

        let predicted_occupancy = (avg_occupancy
            * factors.weekend_factor
            * factors.seasonality_factor
            * factors.events_impact)
            .clamp(0.0, 100.0);

        let predicted_adr =
            base_adr * occupancy_adr_factor(predicted_occupancy) * factors.seasonality_factor;

        DemandPrediction {
            date,
            predicted_occupancy,
            predicted_adr,
            predicted_revpar: predicted_occupancy * predicted_adr / 100.0,
            factors,
        }
    }
}

/// Demand uplift for high-traffic nights. Friday counts as part of the
/// weekend set alongside Saturday and Sunday.
pub fn weekend_factor(date: Date) -> Factor {
    match date.weekday() {
        Weekday::Sun | Weekday::Fri | Weekday::Sat => 1.2,
        _ => 1.0,
    }
}

/// Seasonal demand multiplier by calendar month
pub fn seasonality_factor(date: Date) -> Factor {
    match date.month() {
        6..=9 => 1.3,  // summer
        12 | 1 | 2 => 1.2, // winter holidays
        3..=5 => 1.1,  // spring
        _ => 0.9,      // fall
    }
}

/// Cumulative, unbounded demand lift from events running on `date`
fn events_impact(events: &[MarketEvent], date: Date) -> Factor {
    events
        .iter()
        .filter(|e| e.covers(date))
        .fold(1.0, |impact, e| impact + e.expected_impact.demand_lift())
}

/// Rate uplift as occupancy pressure rises
fn occupancy_adr_factor(occupancy: Percentage) -> Factor {
    if occupancy > 80.0 {
        1.3
    } else if occupancy > 60.0 {
        1.1
    } else if occupancy > 40.0 {
        0.9
    } else {
        0.8
    }
}

/// Gather distinct events from the fetched market snapshots. Daily
/// snapshots repeat ongoing events, so an event appearing in several
/// records must still count once per forecast day.
fn collect_events(market: &[MarketRecord]) -> Vec<MarketEvent> {
    let mut events: Vec<MarketEvent> = Vec::new();
    for record in market {
        for event in &record.events {
            let seen = events.iter().any(|e| {
                e.name == event.name
                    && e.start_date == event.start_date
                    && e.end_date == event.end_date
            });
            if !seen {
                events.push(event.clone());
            }
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::EventImpact;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn history(occupancy: f64, adr: f64, days: u32) -> Vec<RevenueRecord> {
        (0..days)
            .map(|i| {
                RevenueRecord::from_parts(
                    "p1",
                    date(2024, 12, 1) + Duration::days(i as i64),
                    8000.0,
                    2000.0,
                    500.0,
                    200.0,
                    100.0,
                    occupancy,
                    adr,
                )
            })
            .collect()
    }

    fn event(name: &str, start: Date, end: Date, impact: EventImpact) -> MarketEvent {
        MarketEvent {
            name: name.to_string(),
            kind: "festival".to_string(),
            start_date: start,
            end_date: end,
            expected_impact: impact,
        }
    }

    #[test]
    fn test_midweek_march_no_events() {
        // avgOccupancy=70, baseADR=180, Wednesday in March, no events
        let forecaster = DemandForecaster::new();
        let predictions = forecaster.forecast(&history(70.0, 180.0, 90), &[], date(2025, 3, 5), 1);

        assert_eq!(predictions.len(), 1);
        let p = &predictions[0];
        assert_eq!(p.factors.weekend_factor, 1.0);
        assert_eq!(p.factors.seasonality_factor, 1.1);
        assert_eq!(p.factors.events_impact, 1.0);
        assert_relative_eq!(p.predicted_occupancy, 77.0, epsilon = 1e-9);
        assert_relative_eq!(p.predicted_adr, 180.0 * 1.1 * 1.1, epsilon = 1e-9);
        assert_relative_eq!(p.predicted_revpar, 167.706, epsilon = 1e-6);
    }

    #[test]
    fn test_saturday_with_high_event_clamps_occupancy() {
        let saturday = date(2025, 3, 8);
        let mut market = MarketRecord::new("p1", date(2025, 3, 1));
        market
            .events
            .push(event("Jazz Festival", saturday, saturday, EventImpact::High));

        let forecaster = DemandForecaster::new();
        let predictions =
            forecaster.forecast(&history(70.0, 180.0, 90), &[market], saturday, 1);

        let p = &predictions[0];
        assert_eq!(p.factors.weekend_factor, 1.2);
        assert_eq!(p.factors.events_impact, 1.2);
        // 70 * 1.2 * 1.1 * 1.2 = 110.88, clamped
        assert_eq!(p.predicted_occupancy, 100.0);
        assert_relative_eq!(p.predicted_adr, 180.0 * 1.3 * 1.1, epsilon = 1e-9);
        assert_relative_eq!(p.predicted_revpar, 257.4, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_history_defaults() {
        let forecaster = DemandForecaster::new();
        let predictions = forecaster.forecast(&[], &[], date(2025, 10, 6), 3);

        assert_eq!(predictions.len(), 3);
        for p in &predictions {
            assert_eq!(p.predicted_occupancy, 0.0);
            // fallback ADR 100, lowest uplift 0.8, fall seasonality 0.9
            assert_relative_eq!(p.predicted_adr, 100.0 * 0.8 * 0.9, epsilon = 1e-9);
            assert_eq!(p.predicted_revpar, 0.0);
        }
    }

    #[test]
    fn test_event_lifts_are_cumulative() {
        let day = date(2025, 3, 3); // Monday
        let mut market = MarketRecord::new("p1", date(2025, 3, 1));
        market.events.push(event("Expo", day, day, EventImpact::High));
        market
            .events
            .push(event("Derby", day, day, EventImpact::Medium));
        market
            .events
            .push(event("Market", day, day, EventImpact::Low));

        let forecaster = DemandForecaster::new();
        let predictions = forecaster.forecast(&history(50.0, 150.0, 30), &[market], day, 1);

        assert_relative_eq!(
            predictions[0].factors.events_impact,
            1.0 + 0.2 + 0.1 + 0.05,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_repeated_event_counts_once() {
        let day = date(2025, 3, 3);
        let ev = event("Expo", day, day, EventImpact::High);

        // Same event carried by three daily snapshots
        let market: Vec<MarketRecord> = (1..=3)
            .map(|d| {
                let mut record = MarketRecord::new("p1", date(2025, 3, d));
                record.events.push(ev.clone());
                record
            })
            .collect();

        let forecaster = DemandForecaster::new();
        let predictions = forecaster.forecast(&history(50.0, 150.0, 30), &market, day, 1);

        assert_relative_eq!(predictions[0].factors.events_impact, 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_seasonality_table() {
        assert_eq!(seasonality_factor(date(2025, 7, 15)), 1.3);
        assert_eq!(seasonality_factor(date(2025, 12, 25)), 1.2);
        assert_eq!(seasonality_factor(date(2025, 1, 10)), 1.2);
        assert_eq!(seasonality_factor(date(2025, 4, 1)), 1.1);
        assert_eq!(seasonality_factor(date(2025, 10, 31)), 0.9);
        assert_eq!(seasonality_factor(date(2025, 11, 5)), 0.9);
    }

    #[test]
    fn test_weekend_set_includes_friday() {
        assert_eq!(weekend_factor(date(2025, 3, 7)), 1.2); // Friday
        assert_eq!(weekend_factor(date(2025, 3, 8)), 1.2); // Saturday
        assert_eq!(weekend_factor(date(2025, 3, 9)), 1.2); // Sunday
        assert_eq!(weekend_factor(date(2025, 3, 10)), 1.0); // Monday
        assert_eq!(weekend_factor(date(2025, 3, 13)), 1.0); // Thursday
    }

    #[test]
    fn test_revpar_identity_holds_exactly() {
        let forecaster = DemandForecaster::new();
        let predictions =
            forecaster.forecast(&history(63.0, 142.5, 45), &[], date(2025, 6, 1), 30);

        for p in &predictions {
            assert_eq!(p.predicted_revpar, p.predicted_occupancy * p.predicted_adr / 100.0);
        }
    }

    #[test]
    fn test_forecast_dates_ascending() {
        let forecaster = DemandForecaster::new();
        let predictions = forecaster.forecast(&history(70.0, 180.0, 10), &[], date(2025, 2, 27), 5);

        let dates: Vec<Date> = predictions.iter().map(|p| p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(dates[0], date(2025, 2, 27));
        assert_eq!(dates[4], date(2025, 3, 3));
    }
}
