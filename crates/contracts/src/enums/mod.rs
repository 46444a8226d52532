pub mod deposit;
pub mod reservation_status;
