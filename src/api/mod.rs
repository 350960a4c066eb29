//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for rounding clock times,
//! resolving pay periods, and calculating pay and withholding.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, EstimateRequest, NetPayRequest, PayPeriodRequest, RoundRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, PayPeriodResponse, RoundResponse,
};
pub use state::AppState;
