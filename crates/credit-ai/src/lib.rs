pub mod advisory;
pub mod chat;
pub mod config;
pub mod error;
pub mod portfolio;
pub mod report;
pub mod scoring;
pub mod telemetry;
