//! The seam between the resolver and whatever actually talks to the wiki.
//!
//! Everything above this module speaks in logical operations ([Operation]);
//! turning those into query strings, sending them and caching responses is
//! the job of a [RequestExecutor]. The crate ships [crate::RustClient] for
//! real traffic, tests use an in-memory double.

use std::{collections::BTreeMap, fmt::Display, future::Future};

use serde_json::Value;

use crate::reqwest_client::RequestError;

/// One independently fetchable piece of article data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Content,
    Summary,
    Html,
    Images,
    References,
    Links,
    Categories,
    Sections,
    Coordinates,
    LanguageLinks,
    PageProps,
}

impl Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Facet::Content => "content",
                Facet::Summary => "summary",
                Facet::Html => "html",
                Facet::Images => "images",
                Facet::References => "references",
                Facet::Links => "links",
                Facet::Categories => "categories",
                Facet::Sections => "sections",
                Facet::Coordinates => "coordinates",
                Facet::LanguageLinks => "langlinks",
                Facet::PageProps => "pageprops",
            }
        )
    }
}

/// The logical calls the core ever makes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Page info for a title, following normalization and reporting redirects.
    ResolveTitle(String),
    /// Page info for a page id.
    ResolveId(u64),
    /// The search backend's spelling suggestion for a title.
    SuggestTitle(String),
    /// Full text search, returning at most `limit` titles.
    Search { query: String, limit: u16 },
    /// A single facet of an already resolved page.
    Fetch(Facet, u64),
}

/// A logical request plus the continuation token of the previous batch, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiRequest {
    pub operation: Operation,
    /// Empty on the first batch. Otherwise the API's `continue` object, verbatim.
    pub continuation: BTreeMap<String, String>,
}

impl ApiRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            continuation: BTreeMap::new(),
        }
    }

    /// Same operation, next batch.
    pub fn continued(&self, continuation: BTreeMap<String, String>) -> Self {
        Self {
            operation: self.operation.clone(),
            continuation,
        }
    }
}

/// Executes one logical API call and hands back the decoded response document.
///
/// Implementations own the wire format, transport, response caching and any
/// retry policy. They must not interpret the body beyond detecting API level
/// errors; the resolver does the rest.
pub trait RequestExecutor: Send + Sync {
    fn execute(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<Value, RequestError>> + Send;
}
