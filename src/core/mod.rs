//! Configuration and inbound data model

pub mod config;
pub mod models;
