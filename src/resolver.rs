//! Turning a title or page id into exactly one article.
//!
//! The outcomes are: a [Page], a [DisambiguationResult], or an error
//! ([WikiError::NotFound], [WikiError::RedirectBlocked], transport). The whole
//! state machine lives in [resolve]; disambiguation is classified once, after
//! the identity is stable.

use std::{fmt::Display, sync::Arc};

use async_recursion::async_recursion;

use crate::{
    definitions::PageEntry,
    errors::{Result, WikiError},
    executor::{ApiRequest, Facet, Operation, RequestExecutor},
    fetch::{fetch, fetch_parse},
    page::{Page, PageIdentity},
    parsers::{disambiguation, props, text},
    suggest::suggest,
};

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageRef {
    Title(String),
    PageId(u64),
}

impl Display for PageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageRef::Title(title) => write!(f, "{}", title),
            PageRef::PageId(id) => write!(f, "#{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Ask the search backend for a spelling correction first. Titles only.
    pub auto_suggest: bool,
    /// Follow a redirect instead of failing with [WikiError::RedirectBlocked].
    pub redirect_allowed: bool,
    /// Fetch the common facets before handing the page back.
    pub preload: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            auto_suggest: true,
            redirect_allowed: true,
            preload: false,
        }
    }
}

/// A title or page id plus how to treat it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub target: PageRef,
    pub options: ResolveOptions,
}

impl ResolutionRequest {
    pub fn title<S: Into<String>>(title: S) -> Self {
        Self {
            target: PageRef::Title(title.into()),
            options: ResolveOptions::default(),
        }
    }

    pub fn page_id(page_id: u64) -> Self {
        Self {
            target: PageRef::PageId(page_id),
            options: ResolveOptions::default(),
        }
    }

    pub fn auto_suggest(mut self, auto_suggest: bool) -> Self {
        self.options.auto_suggest = auto_suggest;
        self
    }

    pub fn redirect(mut self, allowed: bool) -> Self {
        self.options.redirect_allowed = allowed;
        self
    }

    pub fn preload(mut self, preload: bool) -> Self {
        self.options.preload = preload;
        self
    }
}

/// The title landed on a disambiguation page. Pick a candidate and resolve again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisambiguationResult {
    pub title: String,
    pub page_id: u64,
    /// Linked titles in page order.
    pub candidates: Vec<String>,
}

#[derive(Debug)]
pub enum Resolution<E> {
    Page(Page<E>),
    Disambiguation(DisambiguationResult),
}

impl<E> Resolution<E> {
    pub fn into_page(self) -> Option<Page<E>> {
        match self {
            Resolution::Page(page) => Some(page),
            Resolution::Disambiguation(_) => None,
        }
    }

    pub fn as_page(&self) -> Option<&Page<E>> {
        match self {
            Resolution::Page(page) => Some(page),
            Resolution::Disambiguation(_) => None,
        }
    }

    pub fn disambiguation(&self) -> Option<&DisambiguationResult> {
        match self {
            Resolution::Disambiguation(result) => Some(result),
            Resolution::Page(_) => None,
        }
    }

    pub fn is_disambiguation(&self) -> bool {
        matches!(self, Resolution::Disambiguation(_))
    }
}

/// Resolve `request` against `executor`.
///
/// # Arguments
/// - executor -> shared with the returned page so facets can be fetched later.
/// - request -> title or id, and the options to honour.
///
/// # Returns
/// - Ok(Resolution::Page) -> a stable identity, facets not yet loaded (unless preloading)
/// - Ok(Resolution::Disambiguation) -> the candidates to choose from
/// - Err(WikiError) -> not found, redirect blocked, or the transport failed
///
/// A preload that hits a bad response shape is logged and the page is still
/// returned; the facet is fetched again on first access.
pub(crate) async fn resolve<E: RequestExecutor>(
    executor: &Arc<E>,
    request: &ResolutionRequest,
) -> Result<Resolution<E>> {
    let options = request.options;
    let entry = match &request.target {
        PageRef::PageId(page_id) => {
            resolve_id(executor.as_ref(), *page_id, options.redirect_allowed).await?
        }
        PageRef::Title(title) => {
            let mut working = title.clone();
            if options.auto_suggest {
                if let Some(suggestion) = suggest(executor.as_ref(), &working).await? {
                    log::info!("Using suggestion {:?} for {:?}", suggestion, working);
                    working = suggestion;
                }
            }
            resolve_title(executor.as_ref(), working, options.redirect_allowed, true).await?
        }
    };

    // resolve_* only hand back entries with an id
    let page_id = entry
        .pageid
        .ok_or_else(|| WikiError::NotFound(request.target.clone()))?;

    if props::is_disambiguation(&entry) {
        log::info!("{:?} is a disambiguation page", entry.title);
        let html = text::html(fetch_parse(executor.as_ref(), Facet::Html, page_id).await?)?;
        return Ok(Resolution::Disambiguation(DisambiguationResult {
            title: entry.title,
            page_id,
            candidates: disambiguation::candidates(&html)?,
        }));
    }

    let page = Page::new(
        PageIdentity {
            title: entry.title,
            page_id,
            url: entry.fullurl,
        },
        executor.clone(),
    );
    log::info!("Resolved {} to {}", request.target, page);

    // facets that fail here are retried on first access, only transport failures abort
    if options.preload {
        match page.preload().await {
            Err(e @ WikiError::Request(_)) => return Err(e),
            Err(e) => log::warn!("Preloading {} stopped early: {}", page, e),
            Ok(()) => {}
        }
    }
    Ok(Resolution::Page(page))
}

/// Look a page id up. The server follows a redirect stub by itself, so the
/// redirect report is the only trace of it.
async fn resolve_id<E: RequestExecutor>(
    executor: &E,
    page_id: u64,
    redirect_allowed: bool,
) -> Result<PageEntry> {
    let response = fetch(executor, &ApiRequest::new(Operation::ResolveId(page_id))).await?;
    if let Some(redirect) = response.query.redirects.first() {
        if !redirect_allowed {
            return Err(WikiError::RedirectBlocked {
                from: redirect.from.clone(),
                target: redirect.to.clone(),
            });
        }
        log::debug!("Page id {} redirects {:?} -> {:?}", page_id, redirect.from, redirect.to);
    }
    existing(response.query.pages, PageRef::PageId(page_id))
}

/// Look `title` up, applying normalization, then at most one redirect hop.
///
/// `follow` is false on the hop itself: the server already resolves redirect
/// chains, so whatever it returns for the target is taken as final.
#[async_recursion]
async fn resolve_title<E: RequestExecutor>(
    executor: &E,
    title: String,
    redirect_allowed: bool,
    follow: bool,
) -> Result<PageEntry> {
    let response = fetch(executor, &ApiRequest::new(Operation::ResolveTitle(title.clone()))).await?;
    let mut working = title;

    if let Some(normalized) = response.query.normalized.first() {
        if normalized.from != working {
            log::warn!(
                "Normalization of {:?} reported for {:?}",
                normalized.from,
                working
            );
        }
        log::debug!("Normalized {:?} -> {:?}", working, normalized.to);
        working = normalized.to.clone();
    }

    if follow && let Some(redirect) = response.query.redirects.first() {
        if redirect.from != working {
            log::warn!("Redirect from {:?} reported for {:?}", redirect.from, working);
        }
        if !redirect_allowed {
            return Err(WikiError::RedirectBlocked {
                from: working,
                target: redirect.to.clone(),
            });
        }
        log::debug!("Following redirect {:?} -> {:?}", working, redirect.to);
        return resolve_title(executor, redirect.to.clone(), redirect_allowed, false).await;
    }

    existing(response.query.pages, PageRef::Title(working))
}

/// The first page of a response, or NotFound if it does not exist.
fn existing(pages: Vec<PageEntry>, target: PageRef) -> Result<PageEntry> {
    pages
        .into_iter()
        .next()
        .filter(|page| !page.missing && !page.invalid && page.pageid.is_some())
        .ok_or(WikiError::NotFound(target))
}
