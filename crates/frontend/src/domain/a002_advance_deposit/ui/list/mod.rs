use std::rc::Rc;

use contracts::domain::a002_advance_deposit::dto::AdvanceDeposit;
use contracts::enums::deposit::{DepositMethod, DepositStatus};
use contracts::shared::record_id::RowId;

use crate::shared::config::ListDefaults;
use crate::shared::export::CsvExportable;
use crate::shared::format::format_date;
use crate::shared::http::{ApiError, HttpClient};
use crate::shared::list::{FilterRule, KpiSpec, ListConfig, ListController, ListRow};

pub const RESOURCE_PATH: &str = "/api/advance-deposits";

pub fn list_config() -> ListConfig {
    ListConfig::new(RESOURCE_PATH)
        .search("q", ["reservation_no", "guest_name", "receipt_no"])
        .filter(
            "method",
            FilterRule::one_of(DepositMethod::all().into_iter().map(|m| m.code())),
        )
        .filter(
            "status",
            FilterRule::one_of(DepositStatus::all().into_iter().map(|s| s.code())),
        )
        .filter("from", FilterRule::IsoDate)
        .filter("to", FilterRule::IsoDate)
        .required(["reservation_no", "amount", "method"])
        .kpi("Deposits", KpiSpec::Count)
        .kpi("Amount", KpiSpec::Sum("amount".into()))
        .kpi(
            "Refunded",
            KpiSpec::CountWhere("status".into(), DepositStatus::Refunded.code().into()),
        )
}

pub fn controller(
    client: Rc<dyn HttpClient>,
    defaults: &ListDefaults,
) -> Result<ListController<AdvanceDeposit>, ApiError> {
    ListController::configure(client, list_config().with_list_defaults(defaults))
}

impl ListRow for AdvanceDeposit {
    fn row_id(&self) -> Option<RowId> {
        self.ids.row_id()
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "reservation_no" => Some(self.reservation_no.clone()),
            "guest_name" => Some(self.guest_name.clone()),
            "receipt_no" => self.receipt_no.clone(),
            "amount" => Some(self.amount.to_string()),
            "currency" => self.currency.clone(),
            "method" => Some(self.method.code().to_string()),
            "status" => Some(self.status.code().to_string()),
            "received_at" => Some(self.received_at.clone()),
            "received_by" => self.received_by.clone(),
            _ => None,
        }
    }

    fn field_number(&self, field: &str) -> Option<f64> {
        match field {
            "amount" => Some(self.amount),
            _ => None,
        }
    }
}

impl CsvExportable for AdvanceDeposit {
    fn headers() -> Vec<&'static str> {
        vec![
            "Reservation",
            "Guest",
            "Receipt",
            "Received",
            "Method",
            "Status",
            "Amount",
            "Currency",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.reservation_no.clone(),
            self.guest_name.clone(),
            self.receipt_no.clone().unwrap_or_default(),
            format_date(&self.received_at),
            self.method.display_name().to_string(),
            self.status.display_name().to_string(),
            format!("{:.2}", self.amount),
            self.currency.clone().unwrap_or_default(),
        ]
    }
}
