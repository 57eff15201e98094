//! Resolve encyclopedia titles (or page ids) to exactly one canonical article, then
//! load that article's facets on demand over the MediaWiki action api.
//!
//! ```no_run
//! use wiki_resolver::{Config, ResolutionRequest, Wiki};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let wiki = Wiki::new(&Config::from_env()?)?;
//! match wiki.resolve(&ResolutionRequest::title("Celtuce")).await? {
//!     wiki_resolver::Resolution::Page(page) => println!("{}", page.summary().await?),
//!     wiki_resolver::Resolution::Disambiguation(d) => println!("{:?}", d.candidates),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
mod definitions;
pub mod errors;
pub mod executor;
mod fetch;
mod mediawiki_api;
pub mod page;
mod parsers;
pub mod reqwest_client;
pub mod resolver;
mod suggest;
#[cfg(test)]
mod testing;
mod wiki;

pub use config::{Config, ConfigBuilder};
pub use errors::WikiError;
pub use executor::{ApiRequest, Facet, Operation, RequestExecutor};
pub use page::{Page, PageIdentity};
pub use parsers::{Coordinates, SectionNode};
pub use reqwest_client::{RequestError, RustClient};
pub use resolver::{DisambiguationResult, PageRef, Resolution, ResolutionRequest, ResolveOptions};
pub use suggest::SearchResults;
pub use wiki::Wiki;
