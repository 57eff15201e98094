//! The unordered list facets: images, references, links and categories.
//!
//! All of them keep API order and drop duplicates. Order is not something callers
//! should rely on; batches arriving via continuation can shuffle it.

use itertools::Itertools;

use crate::definitions::PageEntry;

/// Image file urls. `generator=images` returns one page per file.
pub fn images(pages: &[PageEntry]) -> Vec<String> {
    pages
        .iter()
        .filter_map(|page| page.imageinfo.first())
        .map(|info| info.url.clone())
        .unique()
        .collect()
}

/// External links, with protocol-relative urls given an `http:` scheme.
pub fn references(pages: &[PageEntry]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| &page.extlinks)
        .map(|link| with_protocol(&link.url))
        .unique()
        .collect()
}

/// Titles of linked articles.
pub fn links(pages: &[PageEntry]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| &page.links)
        .map(|link| link.title.clone())
        .unique()
        .collect()
}

/// Category names without their namespace prefix (`Category:Foo` -> `Foo`).
pub fn categories(pages: &[PageEntry]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| &page.categories)
        .map(|category| strip_namespace(&category.title).to_owned())
        .unique()
        .collect()
}

fn with_protocol(url: &str) -> String {
    if url.starts_with("http") {
        url.to_owned()
    } else {
        format!("http:{}", url)
    }
}

/// Every category lives in the category namespace, whatever the language calls it.
fn strip_namespace(title: &str) -> &str {
    title
        .split_once(':')
        .map(|(_, name)| name)
        .unwrap_or(title)
}
