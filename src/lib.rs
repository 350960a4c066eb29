//! Payroll engine for hourly timesheets.
//!
//! This crate turns clocked work intervals into pay: it rounds clock times,
//! resolves weekly or monthly pay periods, splits each calendar week at the
//! 40-hour overtime threshold, and estimates federal, state and FICA
//! withholding to produce gross and net pay. An HTTP API exposes the same
//! calculations.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
