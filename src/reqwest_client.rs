use std::fmt::Display;

use http_cache_reqwest::{CACacheManager, Cache, CacheMode, HttpCache, HttpCacheOptions};
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use url::Url;

use crate::{
    config::Config,
    executor::{ApiRequest, RequestExecutor},
    mediawiki_api::build_url,
};

/// The production executor: reqwest with middleware which caches based on HTTP headers.
#[derive(Debug, Clone)]
pub struct RustClient {
    client: ClientWithMiddleware,
    endpoint: Url,
}

/// Custom error to include all potential transport related errors.
#[derive(Debug)]
pub enum RequestError {
    Middleware(reqwest_middleware::Error),
    Reqwest(reqwest::Error),
    Url(url::ParseError),
    /// The wiki answered, but with an `error` object instead of data.
    Api {
        code: String,
        info: String,
    },
    /// Anything else an executor wants to report (used by non-http executors).
    Client(String),
}

impl RustClient {
    /// Create a new client for the given configuration.
    ///
    /// # Arguments
    /// - config -> Language, endpoint, user agent, cache path and timeout to use.
    ///
    /// # Returns
    /// - Ok(RustClient) -> ready to execute requests against [Config::endpoint]
    /// - Err(RequestError) -> the endpoint did not parse or reqwest refused the settings.
    pub fn new(config: &Config) -> Result<Self, RequestError> {
        let mut inner = reqwest::ClientBuilder::new().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            inner = inner.timeout(timeout);
        }

        let mut builder = reqwest_middleware::ClientBuilder::new(inner.build()?);
        if let Some(cache_path) = &config.cache_path {
            builder = builder.with(Cache(HttpCache {
                mode: CacheMode::Default,
                manager: CACacheManager::new(cache_path.clone(), true),
                options: HttpCacheOptions::default(),
            }));
        }

        Ok(Self {
            client: builder.build(),
            endpoint: config.endpoint()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl RequestExecutor for RustClient {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, RequestError> {
        let url = build_url(&self.endpoint, request);
        log::debug!("GET {}", url);

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        check_api_error(body)
    }
}

/// MediaWiki reports most failures as a 200 with an `error` object. Pull those out.
fn check_api_error(body: Value) -> Result<Value, RequestError> {
    if let Some(error) = body.get("error") {
        let field = |name: &str| {
            error
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        return Err(RequestError::Api {
            code: field("code"),
            info: field("info"),
        });
    }
    if let Some(warnings) = body.get("warnings") {
        log::warn!("API warnings: {}", warnings);
    }
    Ok(body)
}

impl Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::Middleware(e) => write!(f, "middleware error: {}", e),
            RequestError::Reqwest(e) => write!(f, "http error: {}", e),
            RequestError::Url(e) => write!(f, "invalid api url: {}", e),
            RequestError::Api { code, info } => write!(f, "api error {}: {}", code, info),
            RequestError::Client(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Middleware(e) => Some(e),
            RequestError::Reqwest(e) => Some(e),
            RequestError::Url(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        Self::Reqwest(value)
    }
}
impl From<reqwest_middleware::Error> for RequestError {
    fn from(value: reqwest_middleware::Error) -> Self {
        Self::Middleware(value)
    }
}
impl From<url::ParseError> for RequestError {
    fn from(value: url::ParseError) -> Self {
        Self::Url(value)
    }
}
