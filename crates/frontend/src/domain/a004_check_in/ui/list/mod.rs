use std::rc::Rc;

use contracts::domain::a004_check_in::dto::CheckIn;
use contracts::shared::record_id::RowId;

use crate::shared::config::ListDefaults;
use crate::shared::export::CsvExportable;
use crate::shared::format::format_date;
use crate::shared::http::{ApiError, HttpClient};
use crate::shared::list::{FilterRule, KpiSpec, ListConfig, ListController, ListRow};

pub const RESOURCE_PATH: &str = "/api/check-ins";

pub fn list_config() -> ListConfig {
    ListConfig::new(RESOURCE_PATH)
        .search("q", ["confirmation_no", "guest_name", "room_no"])
        .filter("date", FilterRule::IsoDate)
        .filter("room_type", FilterRule::Text)
        .required(["confirmation_no", "room_no"])
        .kpi("Check-ins", KpiSpec::Count)
        .kpi("Balance due", KpiSpec::Sum("balance_due".into()))
        .kpi("Rooms", KpiSpec::DistinctCount("room_no".into()))
}

pub fn controller(
    client: Rc<dyn HttpClient>,
    defaults: &ListDefaults,
) -> Result<ListController<CheckIn>, ApiError> {
    ListController::configure(client, list_config().with_list_defaults(defaults))
}

impl ListRow for CheckIn {
    fn row_id(&self) -> Option<RowId> {
        self.ids.row_id()
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "confirmation_no" => Some(self.confirmation_no.clone()),
            "guest_name" => Some(self.guest_name.clone()),
            "room_no" => Some(self.room_no.clone()),
            "room_type" => self.room_type.clone(),
            "arrival" => Some(self.arrival.clone()),
            "departure" => Some(self.departure.clone()),
            "checked_in_at" => self.checked_in_at.clone(),
            "checked_out_at" => self.checked_out_at.clone(),
            "balance_due" => Some(self.balance_due.to_string()),
            "currency" => self.currency.clone(),
            "in_house" => Some(self.is_in_house().to_string()),
            _ => None,
        }
    }

    fn field_number(&self, field: &str) -> Option<f64> {
        match field {
            "balance_due" => Some(self.balance_due),
            _ => None,
        }
    }
}

impl CsvExportable for CheckIn {
    fn headers() -> Vec<&'static str> {
        vec![
            "Confirmation",
            "Guest",
            "Room",
            "Arrival",
            "Departure",
            "Checked in",
            "Balance due",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.confirmation_no.clone(),
            self.guest_name.clone(),
            self.room_no.clone(),
            format_date(&self.arrival),
            format_date(&self.departure),
            self.checked_in_at
                .as_deref()
                .map(format_date)
                .unwrap_or_default(),
            format!("{:.2}", self.balance_due),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::load_config;
    use crate::shared::http::testing::ScriptedClient;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use serde_json::json;

    fn guest(id: i64, room: &str, balance: f64) -> serde_json::Value {
        json!({
            "id": id,
            "confirmation_no": format!("RSV-{}", id),
            "guest_name": "Guest",
            "room_no": room,
            "arrival": "2024-03-01",
            "departure": "2024-03-03",
            "checked_in_at": "2024-03-01T14:10:00Z",
            "balance_due": balance
        })
    }

    #[test]
    fn test_arrivals_for_date() {
        let client = Rc::new(ScriptedClient::new());
        let list = controller(client.clone(), &load_config(None).unwrap().list).unwrap();
        let mut pool = LocalPool::new();

        pool.spawner()
            .spawn_local(list.set_filter("date", "2024-03-01").unwrap())
            .unwrap();
        pool.run_until_stalled();
        client.with_call(0, |call| {
            assert_eq!(call.path, "/api/check-ins");
            assert_eq!(call.query_value("date"), Some("2024-03-01"));
        });
        client.respond(
            0,
            Ok(json!([guest(1, "305", 120.0), guest(2, "305", 30.0), guest(3, "410", 0.0)])),
        );
        pool.run_until_stalled();

        let kpis = list.kpis();
        assert_eq!(kpis[0].value, 3.0);
        assert_eq!(kpis[1].value, 150.0);
        assert_eq!(kpis[2].value, 2.0);
        assert!(list.rows().iter().all(|r| r.is_in_house()));
    }

    #[test]
    fn test_check_out_replaces_row() {
        let client = Rc::new(ScriptedClient::new());
        let list = controller(client.clone(), &load_config(None).unwrap().list).unwrap();

        client.queue(Ok(json!({"data": [guest(1, "305", 120.0)]})));
        block_on(list.load());

        let mut checked_out = guest(1, "305", 0.0);
        checked_out["checked_out_at"] = json!("2024-03-03T11:00:00Z");
        client.queue(Ok(json!({ "data": checked_out })));
        let updated = block_on(list.update(
            &RowId::plain("1"),
            &json!({"checked_out_at": "2024-03-03T11:00:00Z"}),
        ))
        .unwrap()
        .unwrap();

        assert!(!updated.is_in_house());
        client.with_call(1, |call| assert_eq!(call.path, "/api/check-ins/1"));
        let rows = list.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].balance_due, 0.0);
    }
}
