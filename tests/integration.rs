//! Integration tests for the Rate Engine.
//!
//! This test suite drives the HTTP router end to end against the Grand
//! Hotel configuration:
//! - Rate calculation with configured tariffs and windows
//! - Inline windows and base tariff overrides
//! - Rate window administration behind staff sessions
//! - Session lifecycle
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use rate_engine::api::{AppState, SESSION_HEADER, create_router};
use rate_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/grand_hotel").expect("Failed to load config");
    AppState::new(config).expect("Failed to build state")
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal serialized as a JSON string.
fn json_decimal(value: &Value) -> Decimal {
    decimal(value.as_str().expect("decimal should serialize as a string"))
}

async fn send(
    router: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(SESSION_HEADER, token);
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    send(router, "POST", "/rates/calculate", None, Some(body)).await
}

async fn login(router: Router, staff_id: &str, pin: &str) -> String {
    let (status, session) = send(
        router,
        "POST",
        "/sessions",
        None,
        Some(json!({ "staff_id": staff_id, "pin": pin })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "login failed: {}", session);
    session["token"].as_str().unwrap().to_string()
}

fn stay_request(date: &str, room_type: &str, client_type: &str, nights: u32) -> Value {
    json!({
        "date": date,
        "room_type": room_type,
        "client_type": client_type,
        "nights_count": nights
    })
}

fn window_draft(name: &str, value: &str, priority: i32) -> Value {
    json!({
        "name": name,
        "start_date": "2026-01-01",
        "end_date": "2026-12-31",
        "rate_type": "percentage",
        "adjustment_value": value,
        "applicable_days": ["sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday"],
        "client_types": ["individual"],
        "priority": priority
    })
}

fn adjustment_ids(result: &Value) -> Vec<String> {
    result["result"]["adjustments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["window_id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Rate Calculation
// =============================================================================

#[tokio::test]
async fn test_high_season_weekday_stay() {
    let router = create_router(create_test_state());

    // 2026-07-14 is a Tuesday
    let (status, result) =
        post_calculate(router, stay_request("2026-07-14", "STD", "individual", 3)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_decimal(&result["context"]["base_tariff"]), decimal("55000"));
    assert_eq!(adjustment_ids(&result), vec!["rw_high_season"]);
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("66000"));
    assert_eq!(json_decimal(&result["result"]["total_surcharge"]), decimal("11000"));
    assert_eq!(json_decimal(&result["result"]["total_discount"]), decimal("0"));
    assert_eq!(json_decimal(&result["stay_total"]), decimal("198000"));
}

#[tokio::test]
async fn test_weekend_long_stay_compounds_in_priority_order() {
    let router = create_router(create_test_state());

    // 2026-07-18 is a Saturday
    let (status, result) =
        post_calculate(router, stay_request("2026-07-18", "STD", "individual", 7)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        adjustment_ids(&result),
        vec!["rw_high_season", "rw_weekend_leisure", "rw_long_stay"]
    );

    let amounts: Vec<Decimal> = result["result"]["adjustments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| json_decimal(&a["amount"]))
        .collect();
    // 55000 +20% = 66000, -10% = 59400, -15% = 50490
    assert_eq!(amounts, vec![decimal("11000"), decimal("-6600"), decimal("-8910")]);
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("50490"));
    assert_eq!(json_decimal(&result["result"]["total_surcharge"]), decimal("11000"));
    assert_eq!(json_decimal(&result["result"]["total_discount"]), decimal("15510"));
}

#[tokio::test]
async fn test_corporate_weekday_fixed_discount() {
    let router = create_router(create_test_state());

    // 2026-03-11 is a Wednesday
    let (status, result) =
        post_calculate(router, stay_request("2026-03-11", "DLX", "corporate", 1)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(adjustment_ids(&result), vec!["rw_corporate"]);
    assert_eq!(result["result"]["adjustments"][0]["type"], "fixed");
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("75000"));
}

#[tokio::test]
async fn test_corporate_discount_excludes_suites() {
    let router = create_router(create_test_state());

    let (status, result) =
        post_calculate(router, stay_request("2026-03-11", "STE", "corporate", 1)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(adjustment_ids(&result).is_empty());
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("150000"));
}

#[tokio::test]
async fn test_suite_promotion_within_max_stay() {
    let router = create_router(create_test_state());

    let (status, result) =
        post_calculate(router, stay_request("2026-04-15", "STE", "individual", 2)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(adjustment_ids(&result), vec!["rw_suite_promo"]);
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("130000"));
    assert_eq!(json_decimal(&result["stay_total"]), decimal("260000"));
}

#[tokio::test]
async fn test_suite_promotion_skipped_beyond_max_stay() {
    let router = create_router(create_test_state());

    let (status, result) =
        post_calculate(router, stay_request("2026-04-15", "STE", "individual", 6)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(adjustment_ids(&result).is_empty());

    let skipped = result["audit_trace"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["window_id"] == "rw_suite_promo")
        .unwrap()
        .clone();
    assert_eq!(skipped["outcome"], "skipped");
    assert_eq!(skipped["output"]["reason"], "above_max_stay");
}

#[tokio::test]
async fn test_inactive_window_never_applies() {
    let router = create_router(create_test_state());

    let (_, result) =
        post_calculate(router, stay_request("2026-02-03", "STD", "individual", 1)).await;

    assert!(!adjustment_ids(&result).contains(&"rw_legacy_promo".to_string()));
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("50000"));
}

#[tokio::test]
async fn test_audit_trace_lists_every_window() {
    let router = create_router(create_test_state());

    let (_, result) =
        post_calculate(router, stay_request("2026-07-18", "STD", "individual", 7)).await;

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 6);

    let applied = steps.iter().filter(|s| s["outcome"] == "applied").count();
    assert_eq!(applied, 3);
    assert!(result["audit_trace"]["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_base_tariff_override_and_inline_windows() {
    let router = create_router(create_test_state());

    let body = json!({
        "date": "2026-07-14",
        "room_type": "STD",
        "client_type": "individual",
        "nights_count": 2,
        "base_tariff": "1000",
        "windows": [
            {
                "id": "w_fixed",
                "name": "Fixed first",
                "start_date": "2026-07-01",
                "end_date": "2026-07-31",
                "rate_type": "fixed",
                "adjustment_value": "-200",
                "applicable_days": ["tuesday"],
                "client_types": ["individual"],
                "priority": 10
            },
            {
                "id": "w_pct",
                "name": "Percent second",
                "start_date": "2026-07-01",
                "end_date": "2026-07-31",
                "rate_type": "percentage",
                "adjustment_value": "10",
                "applicable_days": ["tuesday"],
                "client_types": ["individual"],
                "priority": 5
            }
        ]
    });

    let (status, result) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(adjustment_ids(&result), vec!["w_fixed", "w_pct"]);
    // 1000 - 200 = 800, +10% = 880
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("880"));
    assert_eq!(json_decimal(&result["stay_total"]), decimal("1760"));
}

#[tokio::test]
async fn test_inline_discounts_floor_at_zero() {
    let router = create_router(create_test_state());

    let body = json!({
        "date": "2026-07-14",
        "room_type": "STD",
        "client_type": "individual",
        "nights_count": 1,
        "base_tariff": "100",
        "windows": [{
            "id": "w_huge",
            "name": "Huge discount",
            "start_date": "2026-07-01",
            "end_date": "2026-07-31",
            "rate_type": "fixed",
            "adjustment_value": "-500",
            "applicable_days": ["tuesday"],
            "client_types": ["individual"]
        }]
    });

    let (status, result) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("0"));
    assert_eq!(json_decimal(&result["result"]["total_discount"]), decimal("500"));
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "FINAL_RATE_FLOORED"));
}

// =============================================================================
// Calculation Error Cases
// =============================================================================

#[tokio::test]
async fn test_unknown_room_type_returns_400() {
    let router = create_router(create_test_state());

    let (status, error) =
        post_calculate(router, stay_request("2026-07-14", "PENTHOUSE", "individual", 1)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "ROOM_TYPE_NOT_FOUND");
}

#[tokio::test]
async fn test_date_before_first_tariff_returns_400() {
    let router = create_router(create_test_state());

    let (status, error) =
        post_calculate(router, stay_request("2025-12-31", "STD", "individual", 1)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "TARIFF_NOT_FOUND");
}

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let router = create_router(create_test_state());

    let (status, error) = post_calculate(
        router,
        json!({ "date": "2026-07-14", "room_type": "STD", "nights_count": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_negative_base_tariff_returns_validation_error() {
    let router = create_router(create_test_state());

    let body = json!({
        "date": "2026-07-14",
        "room_type": "STD",
        "client_type": "individual",
        "nights_count": 1,
        "base_tariff": "-1"
    });
    let (status, error) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

fn tuesday_percentage(id: &str, value: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Tuesday {}", id),
        "start_date": "2026-07-01",
        "end_date": "2026-07-31",
        "rate_type": "percentage",
        "adjustment_value": value,
        "applicable_days": ["tuesday"],
        "client_types": ["individual"],
        "priority": 1
    })
}

#[tokio::test]
async fn test_oversized_base_tariff_returns_validation_error() {
    let router = create_router(create_test_state());

    let body = json!({
        "date": "2026-07-14",
        "room_type": "STD",
        "client_type": "individual",
        "nights_count": 3,
        "base_tariff": "79228162514264337593543950335"
    });
    let (status, error) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_oversized_inline_adjustment_returns_400() {
    let router = create_router(create_test_state());

    let body = json!({
        "date": "2026-07-14",
        "room_type": "STD",
        "client_type": "individual",
        "nights_count": 1,
        "base_tariff": "50000",
        "windows": [tuesday_percentage("w_huge", "1000000000000000000000000")]
    });
    let (status, error) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_RATE_WINDOW");
}

#[tokio::test]
async fn test_compounding_overflow_returns_calculation_error() {
    let router = create_router(create_test_state());

    // Each window multiplies the running rate by 10001
    let windows: Vec<Value> = (0..5)
        .map(|i| tuesday_percentage(&format!("w_{}", i), "1000000"))
        .collect();
    let body = json!({
        "date": "2026-07-14",
        "room_type": "STD",
        "client_type": "individual",
        "nights_count": 3,
        "base_tariff": "1000000000000000",
        "windows": windows
    });
    let (status, error) = post_calculate(router.clone(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "CALCULATION_ERROR");

    // The server keeps answering afterwards
    let (status, _) =
        post_calculate(router, stay_request("2026-07-14", "STD", "individual", 3)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_stay_total_overflow_returns_calculation_error() {
    let router = create_router(create_test_state());

    let body = json!({
        "date": "2026-07-14",
        "room_type": "STD",
        "client_type": "individual",
        "nights_count": 4000000000u32,
        "base_tariff": "1000000000000000",
        "windows": [tuesday_percentage("w_up", "1000000000000")]
    });
    let (status, error) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "CALCULATION_ERROR");
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_login_with_bad_pin_returns_401() {
    let router = create_router(create_test_state());

    let (status, error) = send(
        router,
        "POST",
        "/sessions",
        None,
        Some(json!({ "staff_id": "staff_mgr", "pin": "0000" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_session_lifecycle() {
    let router = create_router(create_test_state());

    let token = login(router.clone(), "staff_cash", "2222").await;

    let (status, session) =
        send(router.clone(), "GET", "/sessions/current", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["staff_id"], "staff_cash");
    assert_eq!(session["role"], "cashier");

    let (status, _) =
        send(router.clone(), "DELETE", "/sessions/current", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, error) = send(router, "GET", "/sessions/current", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_session_pin_never_serialized() {
    let router = create_router(create_test_state());

    let (_, session) = send(
        router,
        "POST",
        "/sessions",
        None,
        Some(json!({ "staff_id": "staff_mgr", "pin": "4321" })),
    )
    .await;

    assert!(session.get("pin").is_none());
    assert_eq!(session["role"], "manager");
}

// =============================================================================
// Rate Window Administration
// =============================================================================

#[tokio::test]
async fn test_create_window_without_token_returns_401() {
    let router = create_router(create_test_state());

    let (status, error) = send(
        router,
        "POST",
        "/rate-windows",
        None,
        Some(window_draft("Flash sale", "-5", 2)),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_create_window_as_cashier_returns_403() {
    let router = create_router(create_test_state());
    let token = login(router.clone(), "staff_cash", "2222").await;

    let (status, error) = send(
        router,
        "POST",
        "/rate-windows",
        Some(&token),
        Some(window_draft("Flash sale", "-5", 2)),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_created_window_affects_calculations() {
    let router = create_router(create_test_state());
    let token = login(router.clone(), "staff_mgr", "4321").await;

    let (status, created) = send(
        router.clone(),
        "POST",
        "/rate-windows",
        Some(&token),
        Some(window_draft("Flash sale", "-10", 2)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    // 2026-02-03 is a Tuesday: only the new window applies
    let (_, result) = post_calculate(
        router.clone(),
        stay_request("2026-02-03", "STD", "individual", 1),
    )
    .await;
    assert_eq!(adjustment_ids(&result), vec![id.clone()]);
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("45000"));

    let (status, _) = send(
        router.clone(),
        "DELETE",
        &format!("/rate-windows/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, result) =
        post_calculate(router, stay_request("2026-02-03", "STD", "individual", 1)).await;
    assert!(adjustment_ids(&result).is_empty());
}

#[tokio::test]
async fn test_create_inverted_window_returns_400() {
    let router = create_router(create_test_state());
    let token = login(router.clone(), "staff_admin", "9999").await;

    let mut draft = window_draft("Backwards", "-5", 1);
    draft["start_date"] = json!("2026-09-01");
    draft["end_date"] = json!("2026-08-01");

    let (status, error) = send(router, "POST", "/rate-windows", Some(&token), Some(draft)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_RATE_WINDOW");
}

#[tokio::test]
async fn test_update_window_keeps_id_and_position() {
    let router = create_router(create_test_state());
    let token = login(router.clone(), "staff_mgr", "4321").await;

    let mut draft = window_draft("High season", "25", 10);
    draft["start_date"] = json!("2026-07-01");
    draft["end_date"] = json!("2026-08-31");
    draft["client_types"] = json!(["individual", "corporate", "group"]);

    let (status, updated) = send(
        router.clone(),
        "PUT",
        "/rate-windows/rw_high_season",
        Some(&token),
        Some(draft),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], "rw_high_season");

    let (_, windows) = send(router.clone(), "GET", "/rate-windows", None, None).await;
    assert_eq!(windows[0]["id"], "rw_high_season");
    assert_eq!(json_decimal(&windows[0]["adjustment_value"]), decimal("25"));

    let (_, result) =
        post_calculate(router, stay_request("2026-07-14", "STD", "individual", 1)).await;
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("68750"));
}

#[tokio::test]
async fn test_update_unknown_window_returns_404() {
    let router = create_router(create_test_state());
    let token = login(router.clone(), "staff_mgr", "4321").await;

    let (status, error) = send(
        router,
        "PUT",
        "/rate-windows/rw_missing",
        Some(&token),
        Some(window_draft("Ghost", "-5", 1)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "RATE_WINDOW_NOT_FOUND");
}

#[tokio::test]
async fn test_supervisor_can_reactivate_window() {
    let router = create_router(create_test_state());
    let token = login(router.clone(), "staff_sup", "3333").await;

    let (status, window) = send(
        router.clone(),
        "POST",
        "/rate-windows/rw_legacy_promo/activation",
        Some(&token),
        Some(json!({ "is_active": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(window["is_active"], true);

    // The legacy promo outranks every other window once active
    let (_, result) =
        post_calculate(router, stay_request("2026-02-03", "STD", "individual", 1)).await;
    assert_eq!(adjustment_ids(&result), vec!["rw_legacy_promo"]);
    assert_eq!(json_decimal(&result["result"]["final_rate"]), decimal("25000"));
}

#[tokio::test]
async fn test_server_cannot_change_activation() {
    let router = create_router(create_test_state());
    let token = login(router.clone(), "staff_srv", "1111").await;

    let (status, _) = send(
        router,
        "POST",
        "/rate-windows/rw_weekend_leisure/activation",
        Some(&token),
        Some(json!({ "is_active": false })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
