//! What-if scenario simulation
//!
//! Applies hypothetical price, marketing and competitor deltas to a
//! baseline demand forecast and reports the resulting RevPAR change.

use crate::error::{Result, RevenuePulseError};
use crate::forecast::DemandPrediction;
use crate::types::{Date, Money, Percentage};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fractional occupancy change per 1% price change (price elasticity)
const PRICE_ELASTICITY: f64 = -0.5;

/// Fractional occupancy lift per 1000 of marketing spend
const MARKETING_LIFT_PER_1000: f64 = 0.02;

/// Marketing can lift demand by at most 10% regardless of spend
const MARKETING_LIFT_CAP: f64 = 0.10;

/// Fractional occupancy change per 1% competitor price change
const COMPETITOR_SENSITIVITY: f64 = 0.3;

/// Hypothetical scenario to evaluate against a baseline forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfScenario {
    pub start_date: Date,
    pub end_date: Date,
    /// Own price change in percent; may be negative
    #[serde(default)]
    pub price_change_percent: f64,
    /// Additional marketing spend, must be non-negative
    #[serde(default)]
    pub marketing_spend: Money,
    /// Competitor price change in percent; may be negative
    #[serde(default)]
    pub competitor_price_change_percent: f64,
}

impl WhatIfScenario {
    /// Check the scenario's field constraints
    pub fn validate(&self) -> Result<()> {
        if self.end_date < self.start_date {
            return Err(RevenuePulseError::InvalidInput(format!(
                "scenario end date {} precedes start date {}",
                self.end_date, self.start_date
            )));
        }
        if self.marketing_spend < 0.0 {
            return Err(RevenuePulseError::InvalidInput(format!(
                "marketing spend must be non-negative, got {}",
                self.marketing_spend
            )));
        }
        Ok(())
    }

    /// Combined fractional occupancy adjustment: price elasticity,
    /// capped marketing lift and competitor movement, summed (not
    /// compounded)
    pub fn occupancy_change(&self) -> f64 {
        let price_impact = self.price_change_percent / 100.0 * PRICE_ELASTICITY;
        let marketing_impact =
            (self.marketing_spend / 1000.0 * MARKETING_LIFT_PER_1000).min(MARKETING_LIFT_CAP);
        let competitor_impact =
            self.competitor_price_change_percent / 100.0 * COMPETITOR_SENSITIVITY;
        price_impact + marketing_impact + competitor_impact
    }
}

/// Baseline vs. simulated metrics for one forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedDay {
    pub date: Date,
    pub baseline_occupancy: Percentage,
    pub simulated_occupancy: Percentage,
    pub occupancy_delta: f64,
    pub baseline_adr: Money,
    pub simulated_adr: Money,
    pub adr_delta: f64,
    pub baseline_revpar: Money,
    pub simulated_revpar: Money,
    pub revpar_delta: f64,
}

/// Aggregate outcome of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub baseline_revpar: Money,
    pub simulated_revpar: Money,
    pub revpar_change: f64,
    pub revpar_change_percent: f64,
    /// Return on marketing spend in percent; `None` when nothing was
    /// spent (serialized as null, distinct from a zero ROI)
    pub roi: Option<f64>,
}

impl std::fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Simulation Summary:")?;
        writeln!(f, "  Baseline RevPAR:   {:.2}", self.baseline_revpar)?;
        writeln!(f, "  Simulated RevPAR:  {:.2}", self.simulated_revpar)?;
        writeln!(
            f,
            "  Change:            {:.2} ({:.2}%)",
            self.revpar_change, self.revpar_change_percent
        )?;
        match self.roi {
            Some(roi) => writeln!(f, "  Marketing ROI:     {:.2}%", roi)?,
            None => writeln!(f, "  Marketing ROI:     n/a")?,
        }
        Ok(())
    }
}

/// Complete simulation run output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Run identifier, fresh per invocation
    pub id: Uuid,
    pub scenario: WhatIfScenario,
    pub days: Vec<SimulatedDay>,
    pub summary: SimulationSummary,
}

/// Scenario simulator over baseline forecasts
#[derive(Debug, Clone, Default)]
pub struct WhatIfSimulator;

impl WhatIfSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Apply `scenario` to each baseline prediction and summarize.
    ///
    /// A zero-RevPAR baseline yields a defined 0% change rather than a
    /// non-finite value.
    pub fn simulate(
        &self,
        baseline: &[DemandPrediction],
        scenario: &WhatIfScenario,
    ) -> Result<SimulationResult> {
        scenario.validate()?;

        let occupancy_change = scenario.occupancy_change();
        let adr_multiplier = 1.0 + scenario.price_change_percent / 100.0;

        let days: Vec<SimulatedDay> = baseline
            .iter()
            .map(|p| {
                let simulated_occupancy =
                    (p.predicted_occupancy * (1.0 + occupancy_change)).clamp(0.0, 100.0);
                let simulated_adr = p.predicted_adr * adr_multiplier;
                let simulated_revpar = simulated_occupancy * simulated_adr / 100.0;

                SimulatedDay {
                    date: p.date,
                    baseline_occupancy: p.predicted_occupancy,
                    simulated_occupancy,
                    occupancy_delta: simulated_occupancy - p.predicted_occupancy,
                    baseline_adr: p.predicted_adr,
                    simulated_adr,
                    adr_delta: simulated_adr - p.predicted_adr,
                    baseline_revpar: p.predicted_revpar,
                    simulated_revpar,
                    revpar_delta: simulated_revpar - p.predicted_revpar,
                }
            })
            .collect();

        let baseline_total: Money = days.iter().map(|d| d.baseline_revpar).sum();
        let simulated_total: Money = days.iter().map(|d| d.simulated_revpar).sum();
        let change = simulated_total - baseline_total;

        let revpar_change_percent = if baseline_total == 0.0 {
            0.0
        } else {
            change / baseline_total * 100.0
        };

        let roi = if scenario.marketing_spend > 0.0 {
            Some(change / scenario.marketing_spend * 100.0)
        } else {
            None
        };

        Ok(SimulationResult {
            id: Uuid::new_v4(),
            scenario: scenario.clone(),
            days,
            summary: SimulationSummary {
                baseline_revpar: baseline_total,
                simulated_revpar: simulated_total,
                revpar_change: change,
                revpar_change_percent,
                roi,
            },
        })
    }
}
