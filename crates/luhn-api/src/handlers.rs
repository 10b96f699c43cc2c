//! # Request Handlers
//!
//! Axum request handlers for the verify API.
//! The body is decoded here and the candidate handed to `luhn_core` untouched.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use luhn_core::{inspect, VerifyError, VerifyResult};
use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::fmt;
use tracing::{info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Verify request
///
/// The `ccn` key is matched ignoring ASCII case and the last matching key
/// wins. A `null` value leaves the previous one in place.
///
/// No `Debug`: the raw card number must not reach the logs.
pub struct VerifyRequest {
    /// Candidate card number, hyphens allowed
    pub ccn: Option<String>,
}

impl<'de> Deserialize<'de> for VerifyRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RequestVisitor;

        impl<'de> Visitor<'de> for RequestVisitor {
            type Value = VerifyRequest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with a string `ccn` field")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut ccn = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("ccn") {
                        if let Some(value) = map.next_value::<Option<String>>()? {
                            ccn = Some(value);
                        }
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(VerifyRequest { ccn })
            }
        }

        deserializer.deserialize_map(RequestVisitor)
    }
}

impl VerifyRequest {
    /// The candidate to validate; absent or `null` is the empty candidate
    pub fn candidate(&self) -> &str {
        self.ccn.as_deref().unwrap_or_default()
    }
}

/// Verify response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyResponse {
    pub valid: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn verify_error_to_response(err: VerifyError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Decode a verify request from a raw body, whatever its content type
pub fn decode_request(body: &[u8]) -> VerifyResult<VerifyRequest> {
    serde_json::from_slice(body).map_err(|e| VerifyError::InvalidPayload(e.to_string()))
}

fn encode_response(response: &VerifyResponse) -> VerifyResult<Vec<u8>> {
    serde_json::to_vec(response).map_err(|e| VerifyError::Serialization(e.to_string()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "luhn-verify",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.uptime_secs()
    }))
}

/// Validate a card number with the Luhn checksum
///
/// Accepts `{"ccn": "5333-6195-0371-5702"}` and answers `{"valid": true}`.
#[instrument(skip(body), fields(request_id = %uuid::Uuid::new_v4(), bytes = body.len()))]
pub async fn verify(body: Bytes) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let request = decode_request(&body).map_err(|e| {
        warn!("Rejected verify request: {}", e);
        verify_error_to_response(e)
    })?;

    let valid = match inspect(request.candidate()) {
        Ok(card) => {
            info!(card = %card, "Card number valid");
            true
        }
        Err(reason) => {
            info!(%reason, "Card number not valid");
            false
        }
    };

    let payload = encode_response(&VerifyResponse { valid }).map_err(|e| {
        warn!("Failed to encode verify response: {}", e);
        verify_error_to_response(e)
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], payload).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_verify_error_conversion() {
        let (status, json) = verify_error_to_response(VerifyError::InvalidPayload("eof".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.code, 400);

        let (status, _json) = verify_error_to_response(VerifyError::Serialization("x".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_decode_request_field_names() {
        let request = decode_request(br#"{"ccn": "5333-6195-0371-5702"}"#).unwrap();
        assert_eq!(request.candidate(), "5333-6195-0371-5702");

        let request = decode_request(br#"{"CCN": "4222222222222"}"#).unwrap();
        assert_eq!(request.candidate(), "4222222222222");

        let request = decode_request(br#"{"cCn": "4222222222222"}"#).unwrap();
        assert_eq!(request.candidate(), "4222222222222");
    }

    #[test]
    fn test_decode_request_last_matching_key_wins() {
        let request = decode_request(br#"{"ccn": "1", "CCN": "4222222222222"}"#).unwrap();
        assert_eq!(request.candidate(), "4222222222222");

        let request = decode_request(br#"{"CCN": "4222222222222", "ccn": "1"}"#).unwrap();
        assert_eq!(request.candidate(), "1");

        let request = decode_request(br#"{"ccn": "4222222222222", "Ccn": null}"#).unwrap();
        assert_eq!(request.candidate(), "4222222222222");
    }

    #[test]
    fn test_decode_request_missing_or_null_field() {
        assert_eq!(decode_request(b"{}").unwrap().candidate(), "");
        assert_eq!(decode_request(br#"{"ccn": null}"#).unwrap().candidate(), "");
        assert_eq!(
            decode_request(br#"{"ccn": "1", "other": 5}"#).unwrap().candidate(),
            "1"
        );
    }

    #[test]
    fn test_decode_request_does_not_trim() {
        let request = decode_request(br#"{"ccn": " 4222222222222 "}"#).unwrap();
        assert_eq!(request.candidate(), " 4222222222222 ");
    }

    #[test]
    fn test_decode_request_rejects_bad_shapes() {
        let bodies: [&[u8]; 8] = [
            b"",
            b"null",
            b"not json",
            br#"{"ccn": "4222222222222"} trailing"#,
            br#"{"ccn": 5333619503715702}"#,
            br#"{"ccn": ["5333"]}"#,
            br#"{"ccn": "1", "cCN": 42}"#,
            br#""5333619503715702""#,
        ];
        for body in bodies {
            let err = decode_request(body).err().unwrap();
            assert!(err.is_client_error());
        }
    }

    #[test]
    fn test_encode_response() {
        let bytes = encode_response(&VerifyResponse { valid: true }).unwrap();
        assert_eq!(bytes, br#"{"valid":true}"#);
    }
}
