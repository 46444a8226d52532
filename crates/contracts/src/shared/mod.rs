pub mod api_error;
pub mod paged;
pub mod record_id;
