//! Adaptive scoring and branching engine for staged business maturity
//! assessments.
//!
//! Users answer question groups staged by difficulty bracket across several
//! business dimensions. The engine aggregates per-dimension scores into one
//! overall maturity score, resolves continuous scores to discrete brackets,
//! and decides which question group a dimension should serve next.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
