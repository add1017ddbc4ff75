//! Concrete adapter implementations for ports.

#[cfg(feature = "eodhd")]
pub mod eodhd_adapter;
pub mod file_config_adapter;
pub mod json_file_adapter;
pub mod json_report_adapter;
pub mod text_report_adapter;
