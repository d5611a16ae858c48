//! Port traits at the I/O seams.

pub mod market_data_port;
pub mod sentiment_port;
pub mod store_port;
pub mod config_port;
pub mod report_port;
