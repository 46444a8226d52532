use crate::shared::record_id::RecordIds;
use serde::{Deserialize, Serialize};

/// Строка отчёта о выручке за бизнес-день
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenueRow {
    #[serde(flatten)]
    pub ids: RecordIds,

    /// "YYYY-MM-DD"
    pub business_date: String,
    pub occupied_rooms: u32,
    pub available_rooms: u32,
    #[serde(default)]
    pub room_revenue: f64,
    #[serde(default)]
    pub other_revenue: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

impl DailyRevenueRow {
    pub fn total_revenue(&self) -> f64 {
        self.room_revenue + self.other_revenue
    }

    /// Occupancy in percent; 0 when the hotel reports no available rooms.
    pub fn occupancy_pct(&self) -> f64 {
        if self.available_rooms == 0 {
            return 0.0;
        }
        self.occupied_rooms as f64 * 100.0 / self.available_rooms as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupancy() {
        let row = DailyRevenueRow {
            ids: RecordIds::default(),
            business_date: "2024-03-01".into(),
            occupied_rooms: 45,
            available_rooms: 60,
            room_revenue: 100.0,
            other_revenue: 20.5,
            currency: None,
        };
        assert_eq!(row.occupancy_pct(), 75.0);
        assert_eq!(row.total_revenue(), 120.5);

        let empty = DailyRevenueRow {
            available_rooms: 0,
            ..row
        };
        assert_eq!(empty.occupancy_pct(), 0.0);
    }
}
