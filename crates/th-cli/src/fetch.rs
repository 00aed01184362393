use std::time::Duration;

use th_compiler::{Fetch, FetchError};

/// Blocking HTTP fetcher with a fixed per-request timeout and no retries.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("trackerhosts/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| categorize_error(url, &e))?;

        response.text().map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn categorize_error(url: &str, error: &reqwest::Error) -> FetchError {
    let url = url.to_string();

    if let Some(status) = error.status() {
        return FetchError::Status {
            url,
            status: status.as_u16(),
        };
    }

    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect { url }
    } else if error.is_body() || error.is_decode() {
        FetchError::Body {
            url,
            message: error.to_string(),
        }
    } else {
        FetchError::Other {
            url,
            message: error.to_string(),
        }
    }
}
