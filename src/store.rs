//! Record store abstraction and in-memory implementation
//!
//! The analytics pipeline never touches the database directly; it consumes
//! a [`RecordStore`] that returns date-ordered record lists. "No data" is an
//! empty list, never an error.

use crate::error::Result;
use crate::records::{MarketRecord, RevenueRecord};
use crate::types::{Date, DateRange, Money, Percentage, PropertyId};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Property registry row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub total_rooms: u32,
}

/// Data-access collaborator consumed by the analytics engine
pub trait RecordStore: Send + Sync {
    /// Look up a property by id
    fn find_property(&self, property_id: &str) -> Option<Property>;

    /// Revenue records for a property inside a date range,
    /// ascending by date, possibly empty
    fn find_revenue_records(
        &self,
        property_id: &str,
        range: DateRange,
    ) -> Result<Vec<RevenueRecord>>;

    /// Market records for a property inside a date range,
    /// ascending by date, possibly empty
    fn find_market_records(&self, property_id: &str, range: DateRange)
        -> Result<Vec<MarketRecord>>;
}

/// In-memory record store for tests and demos
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    properties: HashMap<PropertyId, Property>,
    revenue: HashMap<PropertyId, Vec<RevenueRecord>>,
    market: HashMap<PropertyId, Vec<MarketRecord>>,
}

impl InMemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a property
    pub fn add_property(&mut self, property: Property) {
        self.properties.insert(property.id.clone(), property);
    }

    /// Insert a revenue record, keeping the per-property list date-ordered
    pub fn add_revenue_record(&mut self, record: RevenueRecord) {
        let records = self.revenue.entry(record.property_id.clone()).or_default();
        let idx = records.partition_point(|r| r.date <= record.date);
        records.insert(idx, record);
    }

    /// Insert a market record, keeping the per-property list date-ordered
    pub fn add_market_record(&mut self, record: MarketRecord) {
        let records = self.market.entry(record.property_id.clone()).or_default();
        let idx = records.partition_point(|r| r.date <= record.date);
        records.insert(idx, record);
    }

    /// Load revenue history rows from a CSV file into the store.
    ///
    /// Expected header: `date,room_revenue,food_beverage_revenue,
    /// spa_revenue,retail_revenue,other_revenue,occupancy_rate,adr`.
    /// Returns the number of rows loaded.
    pub fn load_revenue_csv(&mut self, property_id: &str, path: &Path) -> Result<usize> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut count = 0;

        for row in reader.deserialize() {
            let row: CsvRevenueRow = row?;
            self.add_revenue_record(RevenueRecord::from_parts(
                property_id,
                row.date,
                row.room_revenue,
                row.food_beverage_revenue,
                row.spa_revenue,
                row.retail_revenue,
                row.other_revenue,
                row.occupancy_rate,
                row.adr,
            ));
            count += 1;
        }

        log::debug!("loaded {} revenue rows for {}", count, property_id);
        Ok(count)
    }
}

/// Flat CSV row for revenue history import; segment and channel
/// breakdowns are not representable in the flat format and stay empty
#[derive(Debug, Deserialize)]
struct CsvRevenueRow {
    date: Date,
    room_revenue: Money,
    food_beverage_revenue: Money,
    spa_revenue: Money,
    retail_revenue: Money,
    other_revenue: Money,
    occupancy_rate: Percentage,
    adr: Money,
}

impl RecordStore for InMemoryRecordStore {
    fn find_property(&self, property_id: &str) -> Option<Property> {
        self.properties.get(property_id).cloned()
    }

    fn find_revenue_records(
        &self,
        property_id: &str,
        range: DateRange,
    ) -> Result<Vec<RevenueRecord>> {
        Ok(self
            .revenue
            .get(property_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| range.contains(r.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn find_market_records(
        &self,
        property_id: &str,
        range: DateRange,
    ) -> Result<Vec<MarketRecord>> {
        Ok(self
            .market
            .get(property_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| range.contains(r.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
