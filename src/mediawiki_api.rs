//! Translation of logical [Operation]s into MediaWiki `api.php` query parameters.
//!
//! Everything is requested as `format=json&formatversion=2`, so pages come back
//! as an array and flags such as `missing` are real booleans.

use itertools::Itertools;
use url::Url;

use crate::executor::{ApiRequest, Facet, Operation};

/// Largest page size the search module accepts for anonymous clients.
pub const MAX_SEARCH_LIMIT: u16 = 500;

/// Build the full url for a request against `endpoint`.
pub fn build_url(endpoint: &Url, request: &ApiRequest) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .extend_pairs(query_params(request))
        .finish();
    url
}

/// Every query pair for `request`, continuation included.
pub fn query_params(request: &ApiRequest) -> Vec<(String, String)> {
    let mut params: Vec<(&str, String)> = vec![
        ("format", "json".into()),
        ("formatversion", "2".into()),
    ];

    match &request.operation {
        Operation::ResolveTitle(title) => {
            params.extend(page_info());
            params.push(("titles", title.clone()));
        }
        Operation::ResolveId(page_id) => {
            params.extend(page_info());
            params.push(("pageids", page_id.to_string()));
        }
        Operation::SuggestTitle(title) => {
            params.extend(search(title, 1));
        }
        Operation::Search { query, limit } => {
            params.extend(search(query, *limit));
        }
        Operation::Fetch(facet, page_id) => {
            params.extend(facet_params(*facet, *page_id));
        }
    }

    params
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .chain(request.continuation.clone())
        .collect()
}

/// Multi-value parameters are pipe separated.
fn piped(values: &[&str]) -> String {
    values.iter().join("|")
}

/// Info about a page, enough to classify it: canonical title, url, redirect and
/// disambiguation markers.
fn page_info() -> Vec<(&'static str, String)> {
    vec![
        ("action", "query".into()),
        ("prop", piped(&["info", "pageprops"])),
        ("inprop", "url".into()),
        ("ppprop", "disambiguation".into()),
        ("redirects", "1".into()),
    ]
}

fn search(query: &str, limit: u16) -> Vec<(&'static str, String)> {
    vec![
        ("action", "query".into()),
        ("list", "search".into()),
        ("srsearch", query.to_owned()),
        ("srinfo", "suggestion".into()),
        ("srprop", "".into()),
        ("srlimit", limit.clamp(1, MAX_SEARCH_LIMIT).to_string()),
    ]
}

fn facet_params(facet: Facet, page_id: u64) -> Vec<(&'static str, String)> {
    let page_id = page_id.to_string();
    let mut params = match facet {
        // the parse module addresses pages differently from the query module
        Facet::Html => {
            return vec![
                ("action", "parse".into()),
                ("pageid", page_id),
                ("prop", "text".into()),
            ];
        }
        Facet::Sections => {
            return vec![
                ("action", "parse".into()),
                ("pageid", page_id),
                ("prop", "sections".into()),
            ];
        }
        Facet::Content => vec![
            ("prop", piped(&["extracts", "revisions"])),
            ("explaintext", "1".into()),
            ("rvprop", "ids".into()),
        ],
        Facet::Summary => vec![
            ("prop", "extracts".into()),
            ("explaintext", "1".into()),
            ("exintro", "1".into()),
        ],
        Facet::Images => vec![
            ("generator", "images".into()),
            ("gimlimit", "max".into()),
            ("prop", "imageinfo".into()),
            ("iiprop", "url".into()),
        ],
        Facet::References => vec![
            ("prop", "extlinks".into()),
            ("ellimit", "max".into()),
        ],
        Facet::Links => vec![
            ("prop", "links".into()),
            ("plnamespace", "0".into()),
            ("pllimit", "max".into()),
        ],
        Facet::Categories => vec![
            ("prop", "categories".into()),
            ("cllimit", "max".into()),
        ],
        Facet::Coordinates => vec![
            ("prop", "coordinates".into()),
            ("colimit", "max".into()),
        ],
        Facet::LanguageLinks => vec![
            ("prop", "langlinks".into()),
            ("lllimit", "max".into()),
        ],
        Facet::PageProps => vec![("prop", "pageprops".into())],
    };
    params.push(("action", "query".into()));
    params.push(("pageids", page_id));
    params
}
