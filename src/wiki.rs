use std::sync::Arc;

use crate::{
    config::Config,
    errors::Result,
    executor::RequestExecutor,
    reqwest_client::{RequestError, RustClient},
    resolver::{self, Resolution, ResolutionRequest},
    suggest::{self, SearchResults},
};

/// Entry point: one executor shared by every page resolved through it.
pub struct Wiki<E = RustClient> {
    executor: Arc<E>,
}

impl<E> Clone for Wiki<E> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
        }
    }
}

impl Wiki<RustClient> {
    /// Connect to the wiki described by `config`.
    ///
    /// # Arguments
    /// - config -> Language, endpoint, user agent and cache settings.
    ///
    /// # Returns
    /// - Ok(Wiki) -> Ready to resolve pages. Nothing has been sent yet.
    /// - Err(RequestError) -> The endpoint was not a url, or the http client could not be built.
    pub fn new(config: &Config) -> std::result::Result<Self, RequestError> {
        Ok(Self::with_executor(RustClient::new(config)?))
    }
}

impl<E: RequestExecutor> Wiki<E> {
    /// Use a custom executor, a recording or in-memory one for example.
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }

    pub fn executor(&self) -> Arc<E> {
        self.executor.clone()
    }

    /// Resolve a title or page id. See [ResolutionRequest] for the knobs.
    pub async fn resolve(&self, request: &ResolutionRequest) -> Result<Resolution<E>> {
        resolver::resolve(&self.executor, request).await
    }

    /// Resolve `title` with the default options (suggest, follow redirects, no preload).
    pub async fn page(&self, title: &str) -> Result<Resolution<E>> {
        self.resolve(&ResolutionRequest::title(title)).await
    }

    pub async fn page_by_id(&self, page_id: u64) -> Result<Resolution<E>> {
        self.resolve(&ResolutionRequest::page_id(page_id)).await
    }

    /// The search backend's spelling correction for `title`, if any.
    pub async fn suggest(&self, title: &str) -> Result<Option<String>> {
        suggest::suggest(self.executor.as_ref(), title).await
    }

    /// Up to `limit` titles matching `query`. The limit is clamped to what the api accepts.
    pub async fn search(&self, query: &str, limit: u16) -> Result<SearchResults> {
        suggest::search(self.executor.as_ref(), query, limit).await
    }
}
