use std::rc::Rc;

use contracts::projections::p900_daily_revenue::dto::DailyRevenueRow;
use contracts::shared::record_id::RowId;

use crate::shared::config::ListDefaults;
use crate::shared::export::CsvExportable;
use crate::shared::format::format_date;
use crate::shared::http::{ApiError, HttpClient};
use crate::shared::list::{FilterRule, KpiSpec, ListConfig, ListController, ListRow};

pub const RESOURCE_PATH: &str = "/api/reports/daily-revenue";

/// Отчёт о выручке по дням, только чтение
pub fn list_config() -> ListConfig {
    ListConfig::new(RESOURCE_PATH)
        .filter("from", FilterRule::IsoDate)
        .filter("to", FilterRule::IsoDate)
        .kpi("Days", KpiSpec::Count)
        .kpi("Room revenue", KpiSpec::Sum("room_revenue".into()))
        .kpi("Total revenue", KpiSpec::Sum("total_revenue".into()))
        .kpi("Avg occupancy, %", KpiSpec::Average("occupancy_pct".into()))
}

pub fn controller(
    client: Rc<dyn HttpClient>,
    defaults: &ListDefaults,
) -> Result<ListController<DailyRevenueRow>, ApiError> {
    ListController::configure(client, list_config().with_list_defaults(defaults))
}

impl ListRow for DailyRevenueRow {
    /// Report rows may come without ids; business date is unique per row.
    fn row_id(&self) -> Option<RowId> {
        self.ids
            .row_id()
            .or_else(|| Some(RowId::plain(self.business_date.clone())))
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "business_date" => Some(self.business_date.clone()),
            "currency" => self.currency.clone(),
            _ => self.field_number(field).map(|n| n.to_string()),
        }
    }

    fn field_number(&self, field: &str) -> Option<f64> {
        match field {
            "occupied_rooms" => Some(self.occupied_rooms as f64),
            "available_rooms" => Some(self.available_rooms as f64),
            "room_revenue" => Some(self.room_revenue),
            "other_revenue" => Some(self.other_revenue),
            "total_revenue" => Some(self.total_revenue()),
            "occupancy_pct" => Some(self.occupancy_pct()),
            _ => None,
        }
    }
}

impl CsvExportable for DailyRevenueRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Date",
            "Occupied",
            "Available",
            "Occupancy, %",
            "Room revenue",
            "Other revenue",
            "Total",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            format_date(&self.business_date),
            self.occupied_rooms.to_string(),
            self.available_rooms.to_string(),
            format!("{:.1}", self.occupancy_pct()),
            format!("{:.2}", self.room_revenue),
            format!("{:.2}", self.other_revenue),
            format!("{:.2}", self.total_revenue()),
        ]
    }
}
