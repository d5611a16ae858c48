//! Adapter implementations of the port traits.

pub mod upbit_adapter;
pub mod fear_greed_adapter;
pub mod file_store_adapter;
pub mod file_config_adapter;
pub mod console_report_adapter;

#[cfg(feature = "web")]
pub mod web;
