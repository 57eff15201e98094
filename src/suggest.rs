//! Spelling suggestions and plain search, straight from the search backend.

use crate::{
    errors::Result,
    executor::{ApiRequest, Operation, RequestExecutor},
    fetch::fetch,
};

/// Top hits of a search, plus the backend's "did you mean".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub titles: Vec<String>,
    pub suggestion: Option<String>,
}

/// The corrected spelling of `title`, if the search backend offers one.
///
/// No suggestion is `Ok(None)`; only transport or response problems are errors.
pub(crate) async fn suggest<E: RequestExecutor>(executor: &E, title: &str) -> Result<Option<String>> {
    let request = ApiRequest::new(Operation::SuggestTitle(title.to_owned()));
    let response = fetch(executor, &request).await?;
    Ok(suggestion_of(response.query.searchinfo))
}

/// Titles matching `query`, best first, at most `limit` of them.
pub(crate) async fn search<E: RequestExecutor>(
    executor: &E,
    query: &str,
    limit: u16,
) -> Result<SearchResults> {
    let request = ApiRequest::new(Operation::Search {
        query: query.to_owned(),
        limit,
    });
    let response = fetch(executor, &request).await?;
    Ok(SearchResults {
        titles: response
            .query
            .search
            .into_iter()
            .map(|hit| hit.title)
            .collect(),
        suggestion: suggestion_of(response.query.searchinfo),
    })
}

fn suggestion_of(info: Option<crate::definitions::SearchInfo>) -> Option<String> {
    info.and_then(|info| info.suggestion)
        .filter(|suggestion| !suggestion.trim().is_empty())
}
