//! Data models for the scanvoice pipeline.

pub mod config;
pub mod record;
