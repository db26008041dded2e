//! KPI aggregation for dashboard display

use crate::records::RevenueRecord;
use crate::types::{Money, Percentage};
use serde::{Deserialize, Serialize};

/// Revenue totals by category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    pub room: Money,
    pub food_beverage: Money,
    pub spa: Money,
    pub retail: Money,
    pub other: Money,
}

/// Summary KPIs over a historical record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_revenue: Money,
    pub average_occupancy: Percentage,
    pub average_adr: Money,
    pub average_revpar: Money,
    pub revenue_breakdown: RevenueBreakdown,
}

impl KpiSummary {
    /// All-zero summary, shape-identical to a populated one
    pub fn zero() -> Self {
        Self {
            total_revenue: 0.0,
            average_occupancy: 0.0,
            average_adr: 0.0,
            average_revpar: 0.0,
            revenue_breakdown: RevenueBreakdown::default(),
        }
    }
}

/// Reduce a record set into summary totals and averages.
///
/// The empty set returns the explicit all-zero summary before any
/// division takes place, so no field is ever NaN.
pub fn aggregate(records: &[RevenueRecord]) -> KpiSummary {
    if records.is_empty() {
        return KpiSummary::zero();
    }

    let mut breakdown = RevenueBreakdown::default();
    let mut total_revenue = 0.0;
    let mut occupancy_sum = 0.0;
    let mut adr_sum = 0.0;
    let mut revpar_sum = 0.0;

    for record in records {
        breakdown.room += record.room_revenue;
        breakdown.food_beverage += record.food_beverage_revenue;
        breakdown.spa += record.spa_revenue;
        breakdown.retail += record.retail_revenue;
        breakdown.other += record.other_revenue;
        total_revenue += record.total_revenue;
        occupancy_sum += record.occupancy_rate;
        adr_sum += record.adr;
        revpar_sum += record.revpar;
    }

    let count = records.len() as f64;
    KpiSummary {
        total_revenue,
        average_occupancy: occupancy_sum / count,
        average_adr: adr_sum / count,
        average_revpar: revpar_sum / count,
        revenue_breakdown: breakdown,
    }
}
