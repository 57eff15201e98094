use std::collections::BTreeMap;

use serde_json::Value;

use crate::definitions::PageEntry;

/// Language code -> title of the article in that language edition.
pub fn lang_links(pages: &[PageEntry]) -> BTreeMap<String, String> {
    pages
        .iter()
        .flat_map(|page| &page.langlinks)
        .map(|link| (link.lang.clone(), link.title.clone()))
        .collect()
}

/// Raw page properties. Values that are not strings are kept as their json text.
pub fn pageprops(pages: &[PageEntry]) -> BTreeMap<String, String> {
    pages
        .iter()
        .filter_map(|page| page.pageprops.as_ref())
        .flatten()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Whether the page props mark a disambiguation page.
pub fn is_disambiguation(page: &PageEntry) -> bool {
    page.pageprops
        .as_ref()
        .is_some_and(|props| props.contains_key("disambiguation"))
}
