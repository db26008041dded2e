//! # revenue-pulse
//!
//! Deterministic hotel revenue analytics: demand forecasting, pricing
//! recommendations, what-if scenario simulation and KPI aggregation over
//! historical revenue and market records.
//!
//! The pipeline is pure computation between a data-access collaborator
//! (the [`store::RecordStore`] trait) and whatever presentation layer
//! consumes the results. All components are stateless and synchronous;
//! identical inputs always yield identical outputs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use revenue_pulse::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryRecordStore::new());
//! let engine = AnalyticsEngine::with_defaults(store);
//!
//! let target = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let forecast = engine.forecast_demand("grand-plaza", target, DEFAULT_HORIZON_DAYS);
//! ```

pub mod engine;
pub mod error;
pub mod forecast;
pub mod kpi;
pub mod pricing;
pub mod records;
pub mod simulation;
pub mod store;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::engine::{AnalyticsEngine, EngineConfig};
    pub use crate::error::{Result, RevenuePulseError};
    pub use crate::forecast::{DemandForecaster, DemandPrediction};
    pub use crate::kpi::KpiSummary;
    pub use crate::pricing::{DailyPricing, PricingRecommender, RoomType, RoomTypeTable};
    pub use crate::records::{MarketRecord, RevenueRecord};
    pub use crate::simulation::{SimulationResult, WhatIfScenario, WhatIfSimulator};
    pub use crate::store::{InMemoryRecordStore, Property, RecordStore};
    pub use crate::types::*;
}
