//! Analytics engine facade
//!
//! Wires the record store to the pure pipeline components and exposes the
//! operations the HTTP layer calls: demand forecast, pricing
//! recommendations, what-if simulation and KPI summary.

use crate::error::{Result, RevenuePulseError};
use crate::forecast::{DemandForecaster, DemandPrediction};
use crate::kpi::{self, KpiSummary};
use crate::pricing::{competitor_gap, CompetitorGap, DailyPricing, PricingRecommender, RoomTypeTable};
use crate::simulation::{SimulationResult, WhatIfScenario, WhatIfSimulator};
use crate::store::RecordStore;
use crate::types::{Date, DateRange, LOOKBACK_DAYS};
use std::sync::Arc;

/// Configuration for the analytics engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// History window fetched before a forecast target date
    pub lookback_days: i64,
    /// Room-type table used for pricing recommendations
    pub room_types: RoomTypeTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookback_days: LOOKBACK_DAYS,
            room_types: RoomTypeTable::default(),
        }
    }
}

/// Revenue analytics engine for a record store
pub struct AnalyticsEngine {
    store: Arc<dyn RecordStore>,
    config: EngineConfig,
    forecaster: DemandForecaster,
    recommender: PricingRecommender,
    simulator: WhatIfSimulator,
}

impl AnalyticsEngine {
    /// Create an engine over a record store
    pub fn new(store: Arc<dyn RecordStore>, config: EngineConfig) -> Self {
        let recommender = PricingRecommender::new(config.room_types.clone());
        Self {
            store,
            config,
            forecaster: DemandForecaster::new(),
            recommender,
            simulator: WhatIfSimulator::new(),
        }
    }

    /// Create an engine with the default configuration
    pub fn with_defaults(store: Arc<dyn RecordStore>) -> Self {
        Self::new(store, EngineConfig::default())
    }

    /// Forecast demand for `days_ahead` days starting at `target_date`.
    ///
    /// A property with no history gets the forecaster's default-driven
    /// output; an unknown property is an error.
    pub fn forecast_demand(
        &self,
        property_id: &str,
        target_date: Date,
        days_ahead: u32,
    ) -> Result<Vec<DemandPrediction>> {
        self.require_property(property_id)?;
        if days_ahead == 0 {
            return Err(RevenuePulseError::InvalidInput(
                "days_ahead must be at least 1".to_string(),
            ));
        }

        let lookback = DateRange::lookback(target_date, self.config.lookback_days);
        let history = self.store.find_revenue_records(property_id, lookback)?;
        let market = self.store.find_market_records(property_id, lookback)?;

        log::info!(
            "forecasting {} days for {} from {} ({} revenue / {} market records)",
            days_ahead,
            property_id,
            target_date,
            history.len(),
            market.len()
        );

        Ok(self
            .forecaster
            .forecast(&history, &market, target_date, days_ahead))
    }

    /// Per-day, per-room-type price recommendations over a demand forecast
    pub fn recommend_prices(
        &self,
        property_id: &str,
        target_date: Date,
        days_ahead: u32,
    ) -> Result<Vec<DailyPricing>> {
        let forecast = self.forecast_demand(property_id, target_date, days_ahead)?;
        Ok(self.recommender.recommend(&forecast))
    }

    /// Compare recommended prices for `target_date` against the latest
    /// competitor rate quotes in the lookback window
    pub fn competitor_positioning(
        &self,
        property_id: &str,
        target_date: Date,
    ) -> Result<Vec<CompetitorGap>> {
        let pricing = self.recommend_prices(property_id, target_date, 1)?;

        let lookback = DateRange::lookback(target_date, self.config.lookback_days);
        let market = self.store.find_market_records(property_id, lookback)?;
        let rates = market
            .iter()
            .rev()
            .find(|m| !m.competitor_rates.is_empty())
            .map(|m| m.competitor_rates.clone())
            .unwrap_or_default();

        Ok(competitor_gap(&pricing[0], &rates))
    }

    /// Run a what-if scenario over the baseline forecast for the
    /// scenario's inclusive date range
    pub fn run_simulation(
        &self,
        property_id: &str,
        scenario: &WhatIfScenario,
    ) -> Result<SimulationResult> {
        scenario.validate()?;

        let range = DateRange::new(scenario.start_date, scenario.end_date);
        let baseline = self.forecast_demand(property_id, range.start, range.num_days() as u32)?;

        log::info!(
            "simulating {} over {} days (price {:+.1}%, marketing {:.0}, competitors {:+.1}%)",
            property_id,
            baseline.len(),
            scenario.price_change_percent,
            scenario.marketing_spend,
            scenario.competitor_price_change_percent
        );

        self.simulator.simulate(&baseline, scenario)
    }

    /// Summary KPIs over a historical date range
    pub fn kpi_summary(&self, property_id: &str, start: Date, end: Date) -> Result<KpiSummary> {
        self.require_property(property_id)?;
        if end < start {
            return Err(RevenuePulseError::InvalidInput(format!(
                "end date {} precedes start date {}",
                end, start
            )));
        }

        let records = self
            .store
            .find_revenue_records(property_id, DateRange::new(start, end))?;
        Ok(kpi::aggregate(&records))
    }

    fn require_property(&self, property_id: &str) -> Result<()> {
        match self.store.find_property(property_id) {
            Some(_) => Ok(()),
            None => Err(RevenuePulseError::PropertyNotFound(property_id.to_string())),
        }
    }
}
