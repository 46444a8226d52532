use std::rc::Rc;

use contracts::domain::a001_reservation::dto::Reservation;
use contracts::enums::reservation_status::ReservationStatus;
use contracts::shared::record_id::RowId;

use crate::shared::config::ListDefaults;
use crate::shared::export::CsvExportable;
use crate::shared::format::{format_date, nights_between};
use crate::shared::http::{ApiError, HttpClient};
use crate::shared::list::{FilterRule, KpiSpec, ListConfig, ListController, ListRow};

pub const RESOURCE_PATH: &str = "/api/reservations";

/// Список броней: поиск, статус, период заезда, тип номера
pub fn list_config() -> ListConfig {
    ListConfig::new(RESOURCE_PATH)
        .search("q", ["confirmation_no", "guest_name", "room_no"])
        .filter(
            "status",
            FilterRule::one_of(ReservationStatus::all().into_iter().map(|s| s.code())),
        )
        .filter("from", FilterRule::IsoDate)
        .filter("to", FilterRule::IsoDate)
        .filter("room_type", FilterRule::Text)
        .required(["guest_name", "arrival", "departure", "room_type"])
        .kpi("Reservations", KpiSpec::Count)
        .kpi("Room nights", KpiSpec::Sum("nights".into()))
        .kpi("Revenue", KpiSpec::Sum("total_amount".into()))
        .kpi(
            "Confirmed",
            KpiSpec::CountWhere("status".into(), ReservationStatus::Confirmed.code().into()),
        )
}

pub fn controller(
    client: Rc<dyn HttpClient>,
    defaults: &ListDefaults,
) -> Result<ListController<Reservation>, ApiError> {
    ListController::configure(client, list_config().with_list_defaults(defaults))
}

impl ListRow for Reservation {
    fn row_id(&self) -> Option<RowId> {
        self.ids.row_id()
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "confirmation_no" => Some(self.confirmation_no.clone()),
            "guest_name" => Some(self.guest_name.clone()),
            "phone" => self.phone.clone(),
            "room_type" => Some(self.room_type.clone()),
            "room_no" => self.room_no.clone(),
            "arrival" => Some(self.arrival.clone()),
            "departure" => Some(self.departure.clone()),
            "status" => Some(self.status.code().to_string()),
            "source" => self.source.clone(),
            "currency" => self.currency.clone(),
            "nights" | "adults" | "children" | "rate" | "total_amount" => {
                self.field_number(field).map(|n| n.to_string())
            }
            _ => None,
        }
    }

    fn field_number(&self, field: &str) -> Option<f64> {
        match field {
            // сервер не всегда присылает nights — считаем по датам
            "nights" => self
                .nights
                .or_else(|| nights_between(&self.arrival, &self.departure))
                .map(|n| n as f64),
            "adults" => Some(self.adults as f64),
            "children" => Some(self.children as f64),
            "rate" => self.rate,
            "total_amount" => self.total_amount,
            _ => None,
        }
    }
}

impl CsvExportable for Reservation {
    fn headers() -> Vec<&'static str> {
        vec![
            "Confirmation",
            "Guest",
            "Room type",
            "Room",
            "Arrival",
            "Departure",
            "Nights",
            "Guests",
            "Status",
            "Total",
            "Currency",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.confirmation_no.clone(),
            self.guest_name.clone(),
            self.room_type.clone(),
            self.room_no.clone().unwrap_or_default(),
            format_date(&self.arrival),
            format_date(&self.departure),
            self.field_number("nights")
                .map(|n| n.to_string())
                .unwrap_or_default(),
            (self.adults + self.children).to_string(),
            self.status.display_name().to_string(),
            self.total_amount
                .map(|a| format!("{:.2}", a))
                .unwrap_or_default(),
            self.currency.clone().unwrap_or_default(),
        ]
    }
}
