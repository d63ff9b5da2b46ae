//! Petvitals - health-status classification and rolling trends for pet vitals.
//!
//! # Overview
//!
//! A pet's report carries four vitals (respiratory rate, heart rate, blood
//! pressure, BMI). Each is compared against its breed standard and bucketed
//! into a [`model::StatusTier`]; the four tiers of a period fold into one
//! [`model::OverallHealth`] label; a run of calendar periods becomes a chart
//! series.
//!
//! The classification core is pure and synchronous. Fetching is done by a
//! [`data_sources::ReportSource`], fanned out per period with failures
//! isolated to their own period.
//!
//! # Modules
//!
//! - [`model`]: Reports, breed standards, tiers, periods, chart payloads
//! - [`aggregation`]: Per-vital statuses and per-period labels
//! - [`window`]: Trend windows over calendar periods
//! - [`trend`]: Fan-out fetching and view-level assembly
//! - [`data_sources`]: Backend access
//! - [`api`]: HTTP API handlers
//! - [`config`]: Environment configuration
//! - [`error`]: Error types

pub mod aggregation;
pub mod api;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod model;
pub mod trend;
pub mod window;
