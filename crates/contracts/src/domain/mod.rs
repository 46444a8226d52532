pub mod a001_reservation;
pub mod a002_advance_deposit;
pub mod a003_cancellation;
pub mod a004_check_in;
