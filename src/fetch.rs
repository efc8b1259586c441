use reqwest::StatusCode;

use crate::config::Config;

const MAX_REDIRECTS: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("URL did not return HTML")]
    NotHtml,
    #[error("Upstream returned {0}")]
    Upstream(StatusCode),
    #[error("{0}")]
    Request(String),
}

pub fn build_client(config: &Config) -> Result<reqwest::Client, FetchError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        reqwest::header::HeaderValue::from_static("en-US,en;q=0.9"),
    );

    let mut builder = reqwest::ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .redirect(redirect_policy(config.clone()))
        .user_agent(config.user_agent.as_str())
        .default_headers(headers);

    if config.insecure_ssl {
        tracing::warn!("TLS certificate verification is disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| FetchError::Request(e.to_string()))
}

/// Every hop must stay on an allowed http(s) host.
fn redirect_policy(config: Config) -> reqwest::redirect::Policy {
    reqwest::redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        let url = attempt.url();
        let host = url.host_str().unwrap_or("");
        if !matches!(url.scheme(), "http" | "https") || host.is_empty() || !config.host_allowed(host) {
            tracing::warn!("refusing redirect to {}", url);
            let msg = format!("redirect to disallowed URL {}", url);
            return attempt.error(msg);
        }
        attempt.follow()
    })
}

pub async fn fetch_html(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_redirect() {
            FetchError::Request(format!("RedirectError: {}", e))
        } else if e.is_timeout() {
            FetchError::Request(format!("TimeoutError: {}", e))
        } else if e.is_connect() {
            FetchError::Request(format!("ConnectError: {}", e))
        } else {
            FetchError::Request(format!("RequestError: {}", e))
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Upstream(status));
    }

    if !is_html(
        response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
    ) {
        return Err(FetchError::NotHtml);
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Request(e.to_string()))
}

fn is_html(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_lowercase().contains("text/html"))
        .unwrap_or(false)
}
