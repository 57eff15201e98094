use crate::{
    definitions::{PageEntry, ParseBody, Revision},
    errors::WikiError,
};

/// The extract of the page, exactly as the server formatted it.
///
/// No trimming happens here; trailing newlines are part of the server's output.
pub fn extract(pages: &[PageEntry]) -> Result<String, WikiError> {
    pages
        .iter()
        .find_map(|page| page.extract.clone())
        .ok_or_else(|| WikiError::malformed("response carried no extract"))
}

/// Latest revision ids reported alongside the content.
pub fn revision(pages: &[PageEntry]) -> Option<Revision> {
    pages.iter().find_map(|page| page.revisions.first().copied())
}

/// Rendered html of a `action=parse&prop=text` response.
pub fn html(parse: Option<ParseBody>) -> Result<String, WikiError> {
    parse
        .and_then(|body| body.text)
        .ok_or_else(|| WikiError::malformed("parse response carried no text"))
}
