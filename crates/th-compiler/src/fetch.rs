//! Source retrieval seam
//!
//! The pipeline never talks to the network itself. Anything that can turn a
//! URL into text implements [`Fetch`]; the CLI plugs in an HTTP client, tests
//! plug in closures over static strings.

use serde::Serialize;

/// Error type for fetching a source list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Request timed out: {url}")]
    Timeout { url: String },
    #[error("Failed to connect: {url}")]
    Connect { url: String },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
    #[error("Request to {url} failed: {message}")]
    Other { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url }
            | FetchError::Connect { url }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. }
            | FetchError::Other { url, .. } => url,
        }
    }
}

/// Retrieves the full text body behind a URL.
pub trait Fetch {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> Result<String, FetchError>,
{
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self(url)
    }
}

/// A source that could not be fetched, as reported in the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub url: String,
    pub error: String,
}

impl From<&FetchError> for SourceFailure {
    fn from(err: &FetchError) -> Self {
        Self {
            url: err.url().to_string(),
            error: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_implement_fetch() {
        let fetcher = |url: &str| -> Result<String, FetchError> {
            if url == "mem://ok" {
                Ok("line\n".to_string())
            } else {
                Err(FetchError::Status { url: url.to_string(), status: 404 })
            }
        };

        assert_eq!(fetcher.fetch_text("mem://ok").as_deref(), Ok("line\n"));
        let err = fetcher.fetch_text("mem://missing").unwrap_err();
        assert_eq!(err.url(), "mem://missing");
        assert_eq!(err.to_string(), "HTTP 404 from mem://missing");
    }

    #[test]
    fn source_failure_keeps_url_and_message() {
        let err = FetchError::Timeout { url: "https://cdn.example/list.txt".to_string() };
        let failure = SourceFailure::from(&err);
        assert_eq!(failure.url, "https://cdn.example/list.txt");
        assert_eq!(failure.error, "Request timed out: https://cdn.example/list.txt");
    }
}
