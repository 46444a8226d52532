use crate::shared::record_id::RecordIds;
use serde::{Deserialize, Serialize};

/// Заезд гостя (check-in / check-out)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    #[serde(flatten)]
    pub ids: RecordIds,

    pub confirmation_no: String,
    pub guest_name: String,
    pub room_no: String,
    #[serde(default)]
    pub room_type: Option<String>,

    pub arrival: String,
    pub departure: String,
    #[serde(default)]
    pub checked_in_at: Option<String>,
    #[serde(default)]
    pub checked_out_at: Option<String>,

    /// Остаток к оплате по фолио
    #[serde(default)]
    pub balance_due: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

impl CheckIn {
    pub fn is_in_house(&self) -> bool {
        self.checked_in_at.is_some() && self.checked_out_at.is_none()
    }
}

/// Тело POST /api/check-ins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckInRequest {
    pub confirmation_no: String,
    pub room_no: String,
}
