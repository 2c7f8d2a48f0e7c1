//! Response handling shared by the REST clients.

use intervue_core::http::HttpResponse;
use intervue_core::{IntervueError, Result};
use serde::de::DeserializeOwned;

/// Turns a non-success response into [`IntervueError::Api`], embedding the
/// decoded error body (or `{}` when it is not JSON).
pub(crate) fn ensure_success(provider: &'static str, response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let body = response.error_body();
    Err(IntervueError::api(
        provider,
        response.status,
        response.status_text,
        body.to_string(),
    ))
}

pub(crate) fn decode_json<T: DeserializeOwned>(provider: &'static str, response: &HttpResponse) -> Result<T> {
    serde_json::from_str(&response.body)
        .map_err(|err| IntervueError::decode(format!("Failed to parse {provider} response: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_embeds_status_text_and_body() {
        let response = HttpResponse::new(404, "Not Found", r#"{"message":"replica missing"}"#);
        let err = ensure_success("Tavus", response).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Tavus API error: 404 Not Found. {"message":"replica missing"}"#
        );
    }

    #[test]
    fn test_error_with_unparseable_body_embeds_empty_object() {
        let response = HttpResponse::new(503, "Service Unavailable", "upstream timeout");
        let err = ensure_success("Tavus", response).unwrap_err();
        assert_eq!(err.to_string(), "Tavus API error: 503 Service Unavailable. {}");
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let response = HttpResponse::new(200, "OK", "{\"data\": [");
        let err = decode_json::<serde_json::Value>("Tavus", &response).unwrap_err();
        assert!(matches!(err, IntervueError::Decode(_)));
    }
}
