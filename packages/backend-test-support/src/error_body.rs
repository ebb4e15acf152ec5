//! Assertions on the backend's error contract:
//! `{ "error": true, "message", "code", "trace_id" }` plus an `x-trace-id`
//! header equal to the body's `trace_id`.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the backend's error body, kept independent of backend types.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub error: bool,
    pub message: String,
    pub code: String,
    pub trace_id: String,
}

/// Check status, header/body trace id parity and `code`; returns the parsed
/// body for further assertions.
pub fn assert_error_body_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status, "unexpected status");

    let parsed: ErrorBodyLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "error body should be JSON ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });
    assert!(parsed.error, "error flag should be true");
    assert_eq!(parsed.code, expected_code);

    let header_trace_id = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert_eq!(
        parsed.trace_id, header_trace_id,
        "trace_id in body should match x-trace-id header"
    );

    if expected_status == StatusCode::UNAUTHORIZED {
        assert_eq!(
            headers
                .get("www-authenticate")
                .and_then(|v| v.to_str().ok()),
            Some("Bearer"),
            "401 responses carry WWW-Authenticate: Bearer"
        );
    }

    parsed
}

/// Read a service response and run `assert_error_body_from_parts` on it.
pub async fn assert_error_response<B>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorBodyLike
where
    B: MessageBody,
{
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_error_body_from_parts(status, &headers, &body, expected_status, expected_code)
}
