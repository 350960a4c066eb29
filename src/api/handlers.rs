//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    TaxSettings, apply_clock_in_rounding, apply_clock_out_rounding, calculate_current_period_pay,
    calculate_pay_with, full_week_window, get_current_pay_period, get_weeks_in_pay_period,
    round_work_interval,
};
use crate::error::EngineError;
use crate::models::WorkInterval;

use super::request::{
    CalculationRequest, EstimateRequest, NetPayRequest, PayPeriodRequest, RoundRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, PayPeriodResponse, RoundResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/round", post(round_handler))
        .route("/pay-period", post(pay_period_handler))
        .route("/calculate", post(calculate_handler))
        .route("/estimate", post(estimate_handler))
        .route("/net-pay", post(net_pay_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Unwraps a JSON body or turns the rejection into a 400 response.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(error_response(ApiErrorResponse::bad_request(error)))
}

fn rejected(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    error_response(err.into())
}

/// Handler for POST /round.
///
/// Rounds a clock-in down and a clock-out up to the requested interval.
async fn round_handler(payload: Result<Json<RoundRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let response = RoundResponse {
        clock_in: apply_clock_in_rounding(request.clock_in, request.interval_minutes),
        clock_out: request
            .clock_out
            .map(|clock_out| apply_clock_out_rounding(clock_out, request.interval_minutes)),
    };
    info!(
        correlation_id = %correlation_id,
        interval_minutes = request.interval_minutes,
        "Rounded clock times"
    );
    json_response(StatusCode::OK, response)
}

/// Handler for POST /pay-period.
///
/// Resolves the period containing the given instant and its calendar weeks.
async fn pay_period_handler(payload: Result<Json<PayPeriodRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if !(1..=31).contains(&request.pay_period_end_day) {
        return rejected(
            correlation_id,
            EngineError::InvalidProfile {
                field: "pay_period_end_day".to_string(),
                message: "must be between 1 and 31".to_string(),
            },
        );
    }

    let pay_period = get_current_pay_period(
        request.date,
        request.pay_period_type,
        request.pay_period_end_day,
    );
    let (full_week_start, full_week_end) = full_week_window(&pay_period);
    let response = PayPeriodResponse {
        pay_period,
        weeks: get_weeks_in_pay_period(&pay_period),
        full_week_start,
        full_week_end,
    };
    info!(
        correlation_id = %correlation_id,
        start = %response.pay_period.start,
        end = %response.pay_period.end,
        weeks = response.weeks.len(),
        "Resolved pay period"
    );
    json_response(StatusCode::OK, response)
}

/// Handler for POST /calculate.
///
/// Applies the profile's clock rounding to the entries and reports pay for
/// the period containing `date`.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    if let Err(err) = request.validate() {
        return rejected(correlation_id, err);
    }

    let start_time = Instant::now();
    let profile = request.profile;
    let entries: Vec<WorkInterval> = if profile.rounding_interval_minutes > 0 {
        request
            .entries
            .iter()
            .map(|entry| round_work_interval(entry, profile.rounding_interval_minutes))
            .collect()
    } else {
        request.entries
    };

    let report = calculate_current_period_pay(state.estimator(), &profile, request.date, &entries);
    info!(
        correlation_id = %correlation_id,
        entries_count = entries.len(),
        gross_pay = %report.pay.gross_pay,
        net_pay = %report.pay.net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    json_response(
        StatusCode::OK,
        CalculationResponse {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            report,
        },
    )
}

/// Handler for POST /estimate.
///
/// Prices additional hours on top of hours already worked this week.
async fn estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    if let Err(err) = request.profile.validate() {
        return rejected(correlation_id, err);
    }
    if request.hours < Decimal::ZERO || request.weekly_hours_already < Decimal::ZERO {
        warn!(correlation_id = %correlation_id, "Negative hours in estimate");
        return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
            "hours and weekly_hours_already must not be negative",
        )));
    }

    let profile = &request.profile;
    let pay = calculate_pay_with(
        state.estimator(),
        request.hours,
        profile.hourly_rate,
        request.weekly_hours_already,
        profile.overtime_multiplier,
        &TaxSettings::from_profile(profile),
    );
    info!(
        correlation_id = %correlation_id,
        hours = %request.hours,
        gross_pay = %pay.gross_pay,
        "Estimate completed"
    );
    json_response(StatusCode::OK, pay)
}

/// Handler for POST /net-pay.
async fn net_pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<NetPayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let settings = TaxSettings {
        state: request.state.as_deref(),
        custom_state_tax_rate: request.custom_rate,
        filing_status: request.filing_status.unwrap_or_default(),
    };
    let breakdown =
        state
            .estimator()
            .calculate_net_pay(request.gross_pay, request.annual_gross_pay, &settings);
    info!(
        correlation_id = %correlation_id,
        gross_pay = %request.gross_pay,
        net_pay = %breakdown.net_pay,
        "Net pay estimated"
    );
    json_response(StatusCode::OK, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::NetPayBreakdown;
    use crate::config::ConfigLoader;
    use crate::models::PayCalculation;
    use axum::{body::Body, http::Request};
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config").expect("Failed to load config");
        AppState::new(config)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn post_json(uri: &str, body: &str) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    const WEEK_OF_NINE_HOUR_DAYS: &str = r#"{
        "profile": { "hourly_rate": "20", "pay_period_type": "weekly", "state": "TX" },
        "date": "2026-01-14T12:00:00",
        "entries": [
            { "start": "2026-01-12T08:00:00", "end": "2026-01-12T17:00:00" },
            { "start": "2026-01-13T08:00:00", "end": "2026-01-13T17:00:00" },
            { "start": "2026-01-14T08:00:00", "end": "2026-01-14T17:00:00" },
            { "start": "2026-01-15T08:00:00", "end": "2026-01-15T17:00:00" },
            { "start": "2026-01-16T08:00:00", "end": "2026-01-16T17:00:00" }
        ]
    }"#;

    #[tokio::test]
    async fn test_calculate_valid_request_returns_200() {
        let response = post_json("/calculate", WEEK_OF_NINE_HOUR_DAYS).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let result: CalculationResponse = read_body(response).await;
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(result.report.pay.regular_hours, dec("40"));
        assert_eq!(result.report.pay.overtime_hours, dec("5"));
        assert_eq!(result.report.pay.gross_pay, dec("950"));
        assert_eq!(result.report.weeks.len(), 1);
    }

    #[tokio::test]
    async fn test_calculate_applies_profile_rounding() {
        let body = r#"{
            "profile": { "hourly_rate": "20", "pay_period_type": "weekly", "rounding_interval_minutes": 15 },
            "date": "2026-01-14T12:00:00",
            "entries": [
                { "start": "2026-01-14T09:07:00", "end": "2026-01-14T16:50:00" }
            ]
        }"#;
        let response = post_json("/calculate", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        // 09:07 rounds down to 09:00, 16:50 rounds up to 17:00
        let result: CalculationResponse = read_body(response).await;
        assert_eq!(result.report.pay.regular_hours, dec("8"));
    }

    #[tokio::test]
    async fn test_calculate_malformed_json_returns_400() {
        let response = post_json("/calculate", "{invalid json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_calculate_missing_profile_returns_400() {
        let body = r#"{ "date": "2026-01-14T12:00:00", "entries": [] }"#;
        let response = post_json("/calculate", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(
            error.message.contains("missing field"),
            "Expected error message to mention missing field, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_calculate_reversed_interval_returns_400() {
        let body = r#"{
            "profile": { "hourly_rate": "20" },
            "date": "2026-01-14T12:00:00",
            "entries": [
                { "id": "late", "start": "2026-01-14T17:00:00", "end": "2026-01-14T09:00:00" }
            ]
        }"#;
        let response = post_json("/calculate", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "INVALID_WORK_INTERVAL");
        assert!(error.message.contains("late"));
    }

    #[tokio::test]
    async fn test_round_endpoint() {
        let body = r#"{
            "clock_in": "2026-01-15T09:07:00",
            "clock_out": "2026-01-15T17:02:00",
            "interval_minutes": 15
        }"#;
        let response = post_json("/round", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let result: RoundResponse = read_body(response).await;
        assert_eq!(result.clock_in.to_string(), "2026-01-15 09:00:00");
        assert_eq!(result.clock_out.unwrap().to_string(), "2026-01-15 17:15:00");
    }

    #[tokio::test]
    async fn test_pay_period_endpoint() {
        let body = r#"{ "date": "2026-03-15T08:00:00", "pay_period_end_day": 10 }"#;
        let response = post_json("/pay-period", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let result: PayPeriodResponse = read_body(response).await;
        assert_eq!(result.pay_period.start.to_string(), "2026-03-11 00:00:00");
        assert_eq!(result.pay_period.end.to_string(), "2026-04-10 23:59:59.999");
        assert_eq!(result.weeks.len(), 5);
        assert_eq!(result.full_week_start.to_string(), "2026-03-08 00:00:00");
        assert_eq!(result.full_week_end.to_string(), "2026-04-11 23:59:59.999");
    }

    #[tokio::test]
    async fn test_pay_period_rejects_bad_end_day() {
        let body = r#"{ "date": "2026-03-15T08:00:00", "pay_period_end_day": 0 }"#;
        let response = post_json("/pay-period", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "INVALID_PROFILE");
    }

    #[tokio::test]
    async fn test_estimate_endpoint() {
        let body = r#"{
            "profile": { "hourly_rate": "20", "state": "TX" },
            "hours": "8",
            "weekly_hours_already": "36"
        }"#;
        let response = post_json("/estimate", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let pay: PayCalculation = read_body(response).await;
        assert_eq!(pay.regular_hours, dec("4"));
        assert_eq!(pay.overtime_hours, dec("4"));
        assert_eq!(pay.gross_pay, dec("200"));
    }

    #[tokio::test]
    async fn test_estimate_rejects_negative_hours() {
        let body = r#"{ "profile": { "hourly_rate": "20" }, "hours": "-1" }"#;
        let response = post_json("/estimate", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_net_pay_endpoint() {
        let body = r#"{
            "gross_pay": "950",
            "annual_gross_pay": "22800",
            "state": "KS",
            "filing_status": "single"
        }"#;
        let response = post_json("/net-pay", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let result: NetPayBreakdown = read_body(response).await;
        assert_eq!(result.fica, result.social_security + result.medicare);
        assert_eq!(
            result.net_pay,
            dec("950") - result.federal_tax - result.state_tax - result.fica
        );
        assert!(result.state_tax > Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_net_pay_zero_annual_is_untaxed() {
        let body = r#"{ "gross_pay": "0", "annual_gross_pay": "0" }"#;
        let response = post_json("/net-pay", body).await;
        let result: NetPayBreakdown = read_body(response).await;
        assert_eq!(result.federal_tax, Decimal::ZERO);
        assert_eq!(result.net_pay, Decimal::ZERO);
    }
}
