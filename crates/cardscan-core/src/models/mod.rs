//! Data models: the extracted record and tuning configuration.

pub mod card;
pub mod config;
