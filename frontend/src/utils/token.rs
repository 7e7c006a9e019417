use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is empty")]
    Empty,
    #[error("token does not have three segments")]
    Malformed,
    #[error("token payload is not valid base64url")]
    Encoding,
    #[error("token payload is not a JSON object")]
    Payload,
    #[error("token has no `exp` claim")]
    MissingExpiry,
}

/// Decodes the payload segment of a JWT without verifying the signature.
pub fn decode_payload(token: &str) -> Result<Value, TokenError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Empty);
    }
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };
    let decoded = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| TokenError::Encoding)?;
    let value: Value = serde_json::from_slice(&decoded).map_err(|_| TokenError::Payload)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(TokenError::Payload)
    }
}

/// `exp` claim in seconds since the epoch.
pub fn expires_at(token: &str) -> Result<i64, TokenError> {
    decode_payload(token)?
        .get("exp")
        .and_then(|exp| exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64)))
        .ok_or(TokenError::MissingExpiry)
}

/// A token that cannot be decoded counts as expired.
pub fn is_expired_at(token: &str, now_secs: i64) -> bool {
    match expires_at(token) {
        Ok(exp) => exp <= now_secs,
        Err(err) => {
            log::debug!("treating token as expired: {}", err);
            true
        }
    }
}

#[cfg(test)]
pub(crate) fn encode_for_test(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}
