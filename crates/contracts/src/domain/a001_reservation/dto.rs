use crate::enums::reservation_status::ReservationStatus;
use crate::shared::record_id::RecordIds;
use serde::{Deserialize, Serialize};

/// Строка списка броней
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(flatten)]
    pub ids: RecordIds,

    pub confirmation_no: String,
    pub guest_name: String,
    #[serde(default)]
    pub phone: Option<String>,

    pub room_type: String,
    #[serde(default)]
    pub room_no: Option<String>,

    // Dates as "YYYY-MM-DD"
    pub arrival: String,
    pub departure: String,
    #[serde(default)]
    pub nights: Option<i64>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,

    pub status: ReservationStatus,

    // Деньги
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_adults() -> u32 {
    1
}

/// Тело POST /api/reservations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub guest_name: String,
    pub room_type: String,
    pub arrival: String,
    pub departure: String,
    pub adults: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
