//! Errors surfaced by resolution and facet loading.
//!
//! Only genuine failures live here. A disambiguation page is a normal
//! [crate::Resolution], and lookups that simply find nothing (a section, a
//! language edition, coordinates) return `None`.

use std::{error::Error, fmt};

use crate::{reqwest_client::RequestError, resolver::PageRef};

pub type Result<T> = std::result::Result<T, WikiError>;

#[derive(Debug)]
pub enum WikiError {
    /// Nothing exists under this title or id.
    NotFound(PageRef),
    /// The title is a redirect and the caller asked not to follow redirects.
    /// `target` is where it would have gone, so it can be resolved explicitly.
    RedirectBlocked { from: String, target: String },
    /// Transport failure, passed through untouched from the executor.
    Request(RequestError),
    /// The response parsed as json but not into the shape we asked for.
    Malformed(String),
}

impl WikiError {
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        WikiError::Malformed(msg.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            WikiError::NotFound(_) => "NotFound",
            WikiError::RedirectBlocked { .. } => "RedirectBlocked",
            WikiError::Request(_) => "Request",
            WikiError::Malformed(_) => "Malformed",
        }
    }
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::NotFound(PageRef::Title(title)) => {
                write!(f, "{:?} does not match any pages", title)
            }
            WikiError::NotFound(PageRef::PageId(id)) => {
                write!(f, "page id {} does not match any pages", id)
            }
            WikiError::RedirectBlocked { from, target } => {
                write!(f, "{:?} redirects to {:?} and redirects are disabled", from, target)
            }
            WikiError::Request(e) => write!(f, "request failed: {}", e),
            WikiError::Malformed(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl Error for WikiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WikiError::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RequestError> for WikiError {
    fn from(value: RequestError) -> Self {
        Self::Request(value)
    }
}

impl From<serde_json::Error> for WikiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}
