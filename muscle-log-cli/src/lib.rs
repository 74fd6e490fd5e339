// Library exports for the Muscle Log client
// This allows testing of internal modules

pub mod api;
pub mod cache;
pub mod calendar;
pub mod chart;
pub mod commands;
pub mod config;
pub mod models;
pub mod session;
pub mod storage;
pub mod workout;
