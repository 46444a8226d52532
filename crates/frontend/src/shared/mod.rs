pub mod config;
pub mod export;
pub mod format;
pub mod http;
pub mod list;
