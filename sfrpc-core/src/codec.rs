//! Encoding of request envelopes and decoding of response bodies
//!
//! The decoding half implements the classification order every response goes
//! through:
//!
//! 1. [`check_status`]: an "Unauthorized" status short-circuits before the
//!    body is touched.
//! 2. The transport reads the full body.
//! 3. [`decode_response_body`] parses the body as an [`ApiErrorEnvelope`]; a
//!    non-zero `error.code` becomes `Error::Api` and the result shape is never
//!    attempted.
//! 4. Otherwise the body is parsed into [`Decoded<R>`]; failure is
//!    `Error::Decode` with the raw body attached.
//! 5. The decoded value is returned together with the echoed id.
//!
//! Steps 1 and 3–5 are pure functions over strings and bytes so they can be
//! tested without a transport.
//!
//! # Examples
//!
//! ```rust
//! use sfrpc_core::{codec, Decoded, Request};
//! use serde_json::json;
//!
//! let request = Request::new("ListActiveVolumes", 1, json!({"limit": 10}));
//! let json = codec::encode_request(&request).unwrap();
//! assert!(json.contains("\"method\":\"ListActiveVolumes\""));
//!
//! let decoded: Decoded<serde_json::Value> =
//!     codec::decode_response_body(br#"{"id":1,"result":{"volumes":[]}}"#).unwrap();
//! assert_eq!(decoded.id, Some(1));
//! ```

use crate::error::{Error, Result};
use crate::types::{ApiErrorEnvelope, Decoded, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Encode any serializable message to a JSON string
///
/// # Errors
///
/// Returns `Error::Serialization` if the message cannot be serialized.
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode a JSON string into a specific type
///
/// # Errors
///
/// Returns `Error::Serialization` if the JSON doesn't match the type.
pub fn decode_as<'de, T: Deserialize<'de>>(data: &'de str) -> Result<T> {
    serde_json::from_str(data).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a request envelope: `{"method":..,"id":..,"params":..}`
pub fn encode_request(req: &Request) -> Result<String> {
    encode(req)
}

/// Decode a request envelope
///
/// The `url` and `debug` fields are not on the wire and come back defaulted.
pub fn decode_request(data: &str) -> Result<Request> {
    decode_as(data)
}

/// Build and encode an envelope in one step
///
/// # Errors
///
/// Returns `Error::Serialization` when `params` cannot be serialized.
pub fn build_envelope<P: Serialize + ?Sized>(method: &str, id: i64, params: &P) -> Result<String> {
    let request = Request::from_params(method, id, params)?;
    encode_request(&request)
}

/// Classify a status line
///
/// Any status whose text contains "unauthorized", in any case, is an
/// authorization failure. Every other status, including non-2xx ones, is
/// passed on so the body can be inspected.
pub fn check_status(status: &str) -> Result<()> {
    if status.to_ascii_lowercase().contains("unauthorized") {
        return Err(Error::Unauthorized {
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Try the error envelope on a body
///
/// `None` means the body is not shaped like an error envelope at all (not a
/// JSON object, or an `error` member of the wrong type).
pub fn decode_error_envelope(body: &[u8]) -> Option<ApiErrorEnvelope> {
    serde_json::from_slice(body).ok()
}

/// Classify and decode a fully-read response body
///
/// # Errors
///
/// - `Error::Api` when the body carries an `error` object with a non-zero code
/// - `Error::Decode` when the body does not match `{"id":..,"result":R}`
pub fn decode_response_body<R: DeserializeOwned>(body: &[u8]) -> Result<Decoded<R>> {
    if let Some(api_error) = decode_error_envelope(body).and_then(ApiErrorEnvelope::into_api_error)
    {
        return Err(Error::Api(api_error));
    }

    serde_json::from_slice(body).map_err(|e| Error::Decode {
        reason: e.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
    })
}
