//! Blocking HTTP capabilities used by discovery and download

use std::io::Read;

use thiserror::Error;
use tracing::debug;

/// Status and fully buffered body of a response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (DNS, TLS, connection reset, ...)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Fetch an HTML page with a browser-like user agent
pub trait PageFetcher {
    fn fetch_page(&self, url: &str, user_agent: &str) -> Result<HttpResponse, TransportError>;
}

/// Fetch raw bytes
pub trait ByteFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// Both fetch capabilities on one shared ureq agent.
///
/// Non-2xx statuses come back as responses so callers can pick the error kind.
pub struct UreqHttp {
    agent: ureq::Agent,
}

impl UreqHttp {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new(),
        }
    }

    fn get(&self, url: &str, user_agent: Option<&str>) -> Result<HttpResponse, TransportError> {
        let mut request = self.agent.get(url);
        if let Some(user_agent) = user_agent {
            request = request.set("User-Agent", user_agent);
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => {
                return Err(TransportError(transport.to_string()))
            }
        };

        let status = response.status();
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| TransportError(e.to_string()))?;

        debug!(url, status, bytes = body.len(), "GET");
        Ok(HttpResponse { status, body })
    }
}

impl Default for UreqHttp {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for UreqHttp {
    fn fetch_page(&self, url: &str, user_agent: &str) -> Result<HttpResponse, TransportError> {
        self.get(url, Some(user_agent))
    }
}

impl ByteFetcher for UreqHttp {
    fn fetch_bytes(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.get(url, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let response = |status| HttpResponse { status, body: Vec::new() };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(301).is_success());
        assert!(!response(404).is_success());
        assert!(!response(503).is_success());
    }
}
