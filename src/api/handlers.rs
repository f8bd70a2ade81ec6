//! HTTP request handlers for the Rate Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::try_calculate_rate_with_audit;
use crate::error::EngineResult;
use crate::models::{
    RateQuote, RateWindow, RateWindowDraft, StaffRole, StaffSession, StayQuote,
};

use super::request::{ActivationRequest, LoginRequest, RateCalculationRequest};
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Header carrying the staff session token.
pub const SESSION_HEADER: &str = "x-session-token";

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/rates/calculate", post(calculate_handler))
        .route(
            "/rate-windows",
            get(list_windows_handler).post(create_window_handler),
        )
        .route(
            "/rate-windows/:id",
            put(update_window_handler).delete(delete_window_handler),
        )
        .route("/rate-windows/:id/activation", post(activation_handler))
        .route("/sessions", post(login_handler))
        .route(
            "/sessions/current",
            get(current_session_handler).delete(logout_handler),
        )
        .with_state(state)
}

/// Handler for POST /rates/calculate.
///
/// Accepts a stay description and returns the adjusted rate with its
/// audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<RateCalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rate calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Rejected calculation request body"
            );
            return ApiErrorResponse::from(rejection).into_response();
        }
    };

    let start_time = Instant::now();
    match perform_calculation(&state, request).await {
        Ok(quote) => {
            info!(
                correlation_id = %correlation_id,
                room_type = %quote.context.room_type,
                client_type = %quote.context.client_type,
                adjustments = quote.result.adjustments.len(),
                final_rate = %quote.result.final_rate,
                duration_us = start_time.elapsed().as_micros(),
                "Rate calculation completed"
            );
            (StatusCode::OK, Json(quote)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rate calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Resolves the base tariff and windows for a request and runs the engine.
async fn perform_calculation(
    state: &AppState,
    request: RateCalculationRequest,
) -> EngineResult<RateQuote> {
    let mut context = request.to_context(request.base_tariff.unwrap_or(Decimal::ZERO));
    context.validate()?;
    request.check_inline_windows()?;

    if request.base_tariff.is_none() {
        context.base_tariff = state
            .config()
            .get_base_tariff(&context.room_type, context.date)?;
    }

    let (result, audit_trace) = match &request.windows {
        Some(windows) => try_calculate_rate_with_audit(&context, windows)?,
        None => {
            let registry = state.windows().read().await;
            try_calculate_rate_with_audit(&context, registry.list())?
        }
    };

    let stay = StayQuote::new(result, context.nights_count)?;

    Ok(RateQuote {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        context,
        result: stay.nightly,
        stay_total: stay.stay_total,
        audit_trace,
    })
}

/// Reads the session token header and checks the session holds `required`.
async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    required: StaffRole,
) -> ApiResult<StaffSession> {
    let token = session_token(headers)?;
    let session = state.sessions().write().await.validate(token, Utc::now())?;

    if let Err(err) = session.require_role(required) {
        warn!(
            staff_id = %session.staff_id,
            role = %session.role,
            required = %required,
            "Staff role insufficient"
        );
        return Err(err.into());
    }

    Ok(session)
}

fn session_token(headers: &HeaderMap) -> ApiResult<Uuid> {
    let value = headers
        .get(SESSION_HEADER)
        .ok_or_else(|| ApiErrorResponse::unauthorized("Missing x-session-token header"))?;

    value
        .to_str()
        .ok()
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .ok_or_else(|| ApiErrorResponse::unauthorized("Malformed session token"))
}

/// Handler for GET /rate-windows.
async fn list_windows_handler(State(state): State<AppState>) -> Json<Vec<RateWindow>> {
    let registry = state.windows().read().await;
    Json(registry.list().to_vec())
}

/// Handler for POST /rate-windows. Requires a manager session.
async fn create_window_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RateWindowDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RateWindow>)> {
    let session = authorize(&state, &headers, StaffRole::Manager).await?;
    let Json(draft) = payload?;

    let window = state.windows().write().await.create(draft)?;
    info!(staff_id = %session.staff_id, window_id = %window.id, "Rate window created via API");
    Ok((StatusCode::CREATED, Json(window)))
}

/// Handler for PUT /rate-windows/:id. Requires a manager session.
async fn update_window_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<RateWindowDraft>, JsonRejection>,
) -> ApiResult<Json<RateWindow>> {
    let session = authorize(&state, &headers, StaffRole::Manager).await?;
    let Json(draft) = payload?;

    let window = state.windows().write().await.update(&id, draft)?;
    info!(staff_id = %session.staff_id, window_id = %id, "Rate window updated via API");
    Ok(Json(window))
}

/// Handler for DELETE /rate-windows/:id. Requires a manager session.
async fn delete_window_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let session = authorize(&state, &headers, StaffRole::Manager).await?;

    state.windows().write().await.delete(&id)?;
    info!(staff_id = %session.staff_id, window_id = %id, "Rate window deleted via API");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /rate-windows/:id/activation. Requires a supervisor session.
async fn activation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<ActivationRequest>, JsonRejection>,
) -> ApiResult<Json<RateWindow>> {
    let session = authorize(&state, &headers, StaffRole::Supervisor).await?;
    let Json(request) = payload?;

    let window = state
        .windows()
        .write()
        .await
        .set_active(&id, request.is_active)?;
    info!(
        staff_id = %session.staff_id,
        window_id = %id,
        is_active = request.is_active,
        "Rate window activation changed via API"
    );
    Ok(Json(window))
}

/// Handler for POST /sessions.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StaffSession>)> {
    let Json(request) = payload?;

    let member = match state.config().authenticate_staff(&request.staff_id, &request.pin) {
        Ok(member) => member,
        Err(err) => {
            warn!(staff_id = %request.staff_id, "Staff login rejected");
            return Err(err.into());
        }
    };

    let session = state.sessions().write().await.login(member, Utc::now());
    Ok((StatusCode::CREATED, Json(session)))
}

/// Handler for GET /sessions/current.
async fn current_session_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<StaffSession>> {
    let session = authorize(&state, &headers, StaffRole::Server).await?;
    Ok(Json(session))
}

/// Handler for DELETE /sessions/current.
async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let token = session_token(&headers)?;
    state.sessions().write().await.logout(token)?;
    Ok(StatusCode::NO_CONTENT)
}
