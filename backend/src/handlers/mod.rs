//! HTTP request handlers

pub mod form;
pub mod health;
pub mod prediction;

pub use form::get_form;
pub use health::health_check;
pub use prediction::{download_report, get_summary, predict};
