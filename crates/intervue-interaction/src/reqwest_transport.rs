//! `reqwest`-backed [`HttpTransport`].

use async_trait::async_trait;
use intervue_core::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use intervue_core::{IntervueError, Result};
use reqwest::Client;

/// Production transport. One request, one response; no retries or timeouts
/// beyond what the platform imposes.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing client (shared connection pool, custom TLS, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            IntervueError::transport(format!(
                "{} {} failed: {err}",
                request.method.as_str(),
                redact_query(&request.url)
            ))
        })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let body = response
            .text()
            .await
            .map_err(|err| IntervueError::transport(format!("Failed to read response body: {err}")))?;

        Ok(HttpResponse::new(status.as_u16(), status_text, body))
    }
}

// Some providers take the key as a query parameter; keep it out of errors.
fn redact_query(url: &str) -> &str {
    url.split_once('?').map(|(base, _)| base).unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_query_strips_key() {
        assert_eq!(
            redact_query("https://example.com/models/m:generateContent?key=secret"),
            "https://example.com/models/m:generateContent"
        );
        assert_eq!(redact_query("https://example.com/v2/replicas"), "https://example.com/v2/replicas");
    }
}
