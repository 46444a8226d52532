use std::rc::Rc;

use contracts::domain::a003_cancellation::dto::Cancellation;
use contracts::shared::record_id::RowId;

use crate::shared::config::ListDefaults;
use crate::shared::export::CsvExportable;
use crate::shared::format::format_date;
use crate::shared::http::{ApiError, HttpClient};
use crate::shared::list::{FilterRule, KpiSpec, ListConfig, ListController, ListRow};

pub const RESOURCE_PATH: &str = "/api/cancellations";

/// Отмены: период отмены и причина
pub fn list_config() -> ListConfig {
    ListConfig::new(RESOURCE_PATH)
        .search("q", ["confirmation_no", "guest_name"])
        .filter("from", FilterRule::IsoDate)
        .filter("to", FilterRule::IsoDate)
        .filter("reason", FilterRule::Text)
        .required(["confirmation_no", "reason"])
        .kpi("Cancellations", KpiSpec::Count)
        .kpi("Penalties", KpiSpec::Sum("penalty_amount".into()))
        .kpi("Refunds", KpiSpec::Sum("refund_amount".into()))
}

pub fn controller(
    client: Rc<dyn HttpClient>,
    defaults: &ListDefaults,
) -> Result<ListController<Cancellation>, ApiError> {
    ListController::configure(client, list_config().with_list_defaults(defaults))
}

impl ListRow for Cancellation {
    fn row_id(&self) -> Option<RowId> {
        self.ids.row_id()
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "confirmation_no" => Some(self.confirmation_no.clone()),
            "guest_name" => Some(self.guest_name.clone()),
            "arrival" => Some(self.arrival.clone()),
            "cancelled_at" => Some(self.cancelled_at.clone()),
            "reason" => Some(self.reason.clone()),
            "cancelled_by" => self.cancelled_by.clone(),
            "penalty_amount" => Some(self.penalty_amount.to_string()),
            "refund_amount" => Some(self.refund_amount.to_string()),
            "currency" => self.currency.clone(),
            _ => None,
        }
    }

    fn field_number(&self, field: &str) -> Option<f64> {
        match field {
            "penalty_amount" => Some(self.penalty_amount),
            "refund_amount" => Some(self.refund_amount),
            _ => None,
        }
    }
}

impl CsvExportable for Cancellation {
    fn headers() -> Vec<&'static str> {
        vec![
            "Confirmation",
            "Guest",
            "Arrival",
            "Cancelled",
            "Reason",
            "Penalty",
            "Refund",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.confirmation_no.clone(),
            self.guest_name.clone(),
            format_date(&self.arrival),
            format_date(&self.cancelled_at),
            self.reason.clone(),
            format!("{:.2}", self.penalty_amount),
            format!("{:.2}", self.refund_amount),
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

    #[test]
    fn test_remove_cancellation_updates_total_and_kpis() {
        let client = Rc::new(ScriptedClient::new());
        let list = controller(client.clone(), &load_config(None).unwrap().list).unwrap();
        let mut pool = LocalPool::new();

        pool.spawner().spawn_local(list.load()).unwrap();
        pool.run_until_stalled();
        client.respond(
            0,
            Ok(json!({
                "items": [
                    {"_id": "c1", "confirmation_no": "RSV-1", "guest_name": "A", "arrival": "2024-03-01",
                     "cancelled_at": "2024-02-20T09:00:00Z", "reason": "Flight cancelled",
                     "penalty_amount": 50.0, "refund_amount": 100.0},
                    {"_id": "c2", "confirmation_no": "RSV-2", "guest_name": "B", "arrival": "2024-03-05",
                     "cancelled_at": "2024-02-21T09:00:00Z", "reason": "Changed plans",
                     "penalty_amount": 0.0, "refund_amount": 200.0}
                ],
                "total": 42
            })),
        );
        pool.run_until_stalled();
        assert_eq!(list.kpis()[2].value, 300.0);

        client.queue(Ok(json!({"message": "deleted"})));
        block_on(list.remove(&RowId::underscore("c2"))).unwrap();
        client.with_call(1, |call| assert_eq!(call.path, "/api/cancellations/c2"));

        assert_eq!(list.total(), 41);
        assert_eq!(list.kpis()[1].value, 50.0);
        assert_eq!(list.kpis()[2].value, 100.0);
    }

    #[test]
    fn test_csv_row() {
        let row: Cancellation = serde_json::from_value(json!({
            "id": "x", "confirmation_no": "RSV-9", "guest_name": "C", "arrival": "2024-03-01",
            "cancelled_at": "2024-02-20T09:00:00Z", "reason": "Illness; doctor's note"
        }))
        .unwrap();
        let cells = row.to_csv_row();
        assert_eq!(cells[3], "20.02.2024");
        assert_eq!(cells[5], "0.00");
        assert_eq!(cells.len(), Cancellation::headers().len());
    }
}
