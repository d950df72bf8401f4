//! Response decoding over a transport response
//!
//! Runs the classification order on a [`RawResponse`]:
//!
//! 1. authorization failure from the status line, body left unread
//! 2. read the full body
//! 3. embedded API error (non-zero `error.code`)
//! 4. caller's result shape, or `Error::Decode` with the raw body
//! 5. value plus echoed correlation id
//!
//! The `RawResponse` is consumed by value, so its body and connection are
//! released whichever step returns.

use crate::transport::RawResponse;
use serde::de::DeserializeOwned;
use sfrpc_core::{codec, Decoded, Error, Request, Result};

/// Classify a raw response to `request` and decode its `result` into `R`
///
/// Raw bodies may hold account secrets, so nothing about the response is
/// logged unless the request has `debug` set.
pub async fn decode_response<R: DeserializeOwned>(
    raw: RawResponse,
    request: &Request,
) -> Result<Decoded<R>> {
    if let Err(e) = codec::check_status(raw.status()) {
        if request.debug {
            tracing::debug!(
                method = %request.method,
                status = %raw.status(),
                "Endpoint rejected credentials"
            );
        }
        return Err(e);
    }

    let body = raw.into_body().await?;
    if request.debug {
        tracing::debug!(
            method = %request.method,
            body = %String::from_utf8_lossy(&body),
            "Response received"
        );
    }

    codec::decode_response_body(&body).inspect_err(|e| {
        if !request.debug {
            return;
        }
        match e {
            Error::Api(api) => {
                tracing::debug!(code = api.code, name = %api.name, "API error in response")
            }
            Error::Decode { reason, .. } => {
                tracing::debug!(%reason, "Response did not match result shape")
            }
            _ => {}
        }
    })
}
