//! Core domain types and logic.

pub mod tristate;
pub mod session;
pub mod datetime_parse;
pub mod extract;
pub mod bar;
pub mod normalize;
pub mod earnings;
pub mod news;
pub mod gap;
pub mod verdict;
pub mod morning;
pub mod overnight;
pub mod settings;
pub mod config_validation;
pub mod dashboard;
pub mod error;
