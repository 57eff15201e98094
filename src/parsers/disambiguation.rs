use itertools::Itertools;
use scraper::{Html, Selector};

use crate::errors::WikiError;

fn selector(css: &str) -> Result<Selector, WikiError> {
    Selector::parse(css).map_err(|e| WikiError::malformed(format!("selector {:?}: {:?}", css, e)))
}

/// Candidate titles listed on a rendered disambiguation page.
///
/// Every list item with a link contributes the text of its first link. Table of
/// contents entries (`tocsection-*` classes) are skipped.
pub fn candidates(html: &str) -> Result<Vec<String>, WikiError> {
    let document = Html::parse_fragment(html);
    let items = selector("li")?;
    let link = selector("a")?;

    Ok(document
        .select(&items)
        .filter(|li| {
            !li.value()
                .attr("class")
                .is_some_and(|class| class.contains("tocsection"))
        })
        .filter_map(|li| li.select(&link).next())
        .map(|a| a.text().collect::<String>().trim().to_owned())
        .filter(|title| !title.is_empty())
        .unique()
        .collect())
}
