use crate::shared::record_id::RecordIds;
use serde::{Deserialize, Serialize};

/// Отменённая бронь
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cancellation {
    #[serde(flatten)]
    pub ids: RecordIds,

    pub confirmation_no: String,
    pub guest_name: String,
    pub arrival: String,
    /// ISO 8601 timestamp
    pub cancelled_at: String,
    pub reason: String,
    #[serde(default)]
    pub cancelled_by: Option<String>,

    #[serde(default)]
    pub penalty_amount: f64,
    #[serde(default)]
    pub refund_amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Тело POST /api/cancellations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCancellationRequest {
    pub confirmation_no: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty_amount: Option<f64>,
}
