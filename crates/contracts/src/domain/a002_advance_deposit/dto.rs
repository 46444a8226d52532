use crate::enums::deposit::{DepositMethod, DepositStatus};
use crate::shared::record_id::RecordIds;
use serde::{Deserialize, Serialize};

/// Advance deposit taken against a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceDeposit {
    #[serde(flatten)]
    pub ids: RecordIds,

    pub reservation_no: String,
    pub guest_name: String,
    #[serde(default)]
    pub receipt_no: Option<String>,

    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub method: DepositMethod,
    pub status: DepositStatus,

    /// ISO 8601 timestamp
    pub received_at: String,
    #[serde(default)]
    pub received_by: Option<String>,
}

/// Тело POST /api/advance-deposits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepositRequest {
    pub reservation_no: String,
    pub amount: f64,
    pub method: DepositMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}
