//! A resolved article and its lazily loaded facets.
//!
//! Each facet has its own [OnceCell]. The first caller fetches and parses, every
//! later caller (including ones racing the first) gets the stored value. A fetch
//! that fails leaves the cell empty, so asking again retries.

use std::{collections::BTreeMap, fmt, hash::Hash, sync::Arc};

use tokio::sync::OnceCell;

use crate::{
    definitions::{PageEntry, Revision},
    errors::{Result, WikiError},
    executor::{Facet, Operation, RequestExecutor},
    fetch::{fetch_pages, fetch_parse},
    parsers::{
        Coordinates, SectionNode, SectionText, coordinates, lists, props,
        sections::{self, flatten, section_tree},
        text,
    },
};

/// The stable identity of an article. Equal when the page ids are.
#[derive(Debug, Clone)]
pub struct PageIdentity {
    /// Canonical title, after normalization and redirects.
    pub title: String,
    pub page_id: u64,
    /// Canonical article url as reported by the wiki.
    pub url: Option<String>,
}

impl PartialEq for PageIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.page_id == other.page_id
    }
}
impl Eq for PageIdentity {}
impl Hash for PageIdentity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.page_id.hash(state);
    }
}

struct Content {
    text: String,
    revision: Option<Revision>,
}

struct Sections {
    tree: Vec<SectionNode>,
    titles: Vec<String>,
}

#[derive(Default)]
struct FacetCache {
    content: OnceCell<Content>,
    /// Derived from `content`, never fetched on its own.
    section_texts: OnceCell<Vec<SectionText>>,
    summary: OnceCell<String>,
    html: OnceCell<String>,
    images: OnceCell<Vec<String>>,
    references: OnceCell<Vec<String>>,
    links: OnceCell<Vec<String>>,
    categories: OnceCell<Vec<String>>,
    sections: OnceCell<Sections>,
    coordinates: OnceCell<Option<Coordinates>>,
    lang_links: OnceCell<BTreeMap<String, String>>,
    pageprops: OnceCell<BTreeMap<String, String>>,
}

pub struct Page<E> {
    identity: PageIdentity,
    executor: Arc<E>,
    cache: FacetCache,
}

impl<E> Page<E> {
    pub fn identity(&self) -> &PageIdentity {
        &self.identity
    }

    pub fn title(&self) -> &str {
        &self.identity.title
    }

    pub fn page_id(&self) -> u64 {
        self.identity.page_id
    }

    pub fn url(&self) -> Option<&str> {
        self.identity.url.as_deref()
    }
}

impl<E: RequestExecutor> Page<E> {
    pub(crate) fn new(identity: PageIdentity, executor: Arc<E>) -> Self {
        Self {
            identity,
            executor,
            cache: FacetCache::default(),
        }
    }

    async fn query_facet(&self, facet: Facet) -> Result<Vec<PageEntry>> {
        log::debug!("Loading {} of {:?}", facet, self.identity.title);
        fetch_pages(
            self.executor.as_ref(),
            Operation::Fetch(facet, self.identity.page_id),
        )
        .await
    }

    async fn load_content(&self) -> Result<&Content> {
        self.cache
            .content
            .get_or_try_init(|| async {
                let pages = self.query_facet(Facet::Content).await?;
                Ok::<_, WikiError>(Content {
                    text: text::extract(&pages)?,
                    revision: text::revision(&pages),
                })
            })
            .await
    }

    /// Plain text of the whole article.
    pub async fn content(&self) -> Result<&str> {
        Ok(&self.load_content().await?.text)
    }

    /// Id of the revision `content` was taken from.
    pub async fn revision_id(&self) -> Result<Option<u64>> {
        Ok(self.load_content().await?.revision.map(|r| r.revid))
    }

    /// Id of the revision before [Page::revision_id].
    pub async fn parent_id(&self) -> Result<Option<u64>> {
        Ok(self.load_content().await?.revision.map(|r| r.parentid))
    }

    /// Plain text of the lead section. Trailing newlines are left as the server sent them.
    pub async fn summary(&self) -> Result<&str> {
        self.cache
            .summary
            .get_or_try_init(|| async {
                text::extract(&self.query_facet(Facet::Summary).await?)
            })
            .await
            .map(String::as_str)
    }

    /// Rendered html of the article body.
    pub async fn html(&self) -> Result<&str> {
        self.cache
            .html
            .get_or_try_init(|| async {
                log::debug!("Loading html of {:?}", self.identity.title);
                text::html(fetch_parse(self.executor.as_ref(), Facet::Html, self.identity.page_id).await?)
            })
            .await
            .map(String::as_str)
    }

    /// Urls of every image on the page.
    pub async fn images(&self) -> Result<&[String]> {
        self.cache
            .images
            .get_or_try_init(|| async {
                Ok::<_, WikiError>(lists::images(&self.query_facet(Facet::Images).await?))
            })
            .await
            .map(Vec::as_slice)
    }

    /// External links on the page.
    pub async fn references(&self) -> Result<&[String]> {
        self.cache
            .references
            .get_or_try_init(|| async {
                Ok::<_, WikiError>(lists::references(&self.query_facet(Facet::References).await?))
            })
            .await
            .map(Vec::as_slice)
    }

    /// Titles of the articles this page links to.
    pub async fn links(&self) -> Result<&[String]> {
        self.cache
            .links
            .get_or_try_init(|| async {
                Ok::<_, WikiError>(lists::links(&self.query_facet(Facet::Links).await?))
            })
            .await
            .map(Vec::as_slice)
    }

    /// Category names, without the namespace prefix.
    pub async fn categories(&self) -> Result<&[String]> {
        self.cache
            .categories
            .get_or_try_init(|| async {
                Ok::<_, WikiError>(lists::categories(&self.query_facet(Facet::Categories).await?))
            })
            .await
            .map(Vec::as_slice)
    }

    async fn load_sections(&self) -> Result<&Sections> {
        self.cache
            .sections
            .get_or_try_init(|| async {
                log::debug!("Loading sections of {:?}", self.identity.title);
                let raw = fetch_parse(self.executor.as_ref(), Facet::Sections, self.identity.page_id)
                    .await?
                    .map(|body| body.sections)
                    .unwrap_or_default();
                let tree = section_tree(&raw);
                let titles = flatten(&tree);
                Ok::<_, WikiError>(Sections { tree, titles })
            })
            .await
    }

    /// Section titles in document order, subsections straight after their parent.
    pub async fn sections(&self) -> Result<&[String]> {
        Ok(&self.load_sections().await?.titles)
    }

    /// The sections as a tree.
    pub async fn section_tree(&self) -> Result<&[SectionNode]> {
        Ok(&self.load_sections().await?.tree)
    }

    /// Text of the section called exactly `title` (case-sensitive).
    ///
    /// # Returns
    /// - Ok(Some) -> the section body, up to the next heading
    /// - Ok(None) -> the article has no such section
    /// - Err -> loading the content failed
    pub async fn section(&self, title: &str) -> Result<Option<&str>> {
        let texts = self
            .cache
            .section_texts
            .get_or_try_init(|| async { Ok::<_, WikiError>(sections::section_texts(self.content().await?)) })
            .await?;
        Ok(texts
            .iter()
            .find(|section| section.title == title)
            .map(|section| section.text.as_str()))
    }

    /// Where the article is, if it is anywhere.
    pub async fn coordinates(&self) -> Result<Option<Coordinates>> {
        self.cache
            .coordinates
            .get_or_try_init(|| async {
                coordinates::coordinates(&self.query_facet(Facet::Coordinates).await?)
            })
            .await
            .copied()
    }

    /// Every language edition of this article: language code -> localized title.
    pub async fn lang_links(&self) -> Result<&BTreeMap<String, String>> {
        self.cache
            .lang_links
            .get_or_try_init(|| async {
                Ok::<_, WikiError>(props::lang_links(&self.query_facet(Facet::LanguageLinks).await?))
            })
            .await
    }

    /// Title of this article in the `lang` edition, `None` if that edition has none.
    pub async fn lang_title(&self, lang: &str) -> Result<Option<&str>> {
        Ok(self.lang_links().await?.get(lang).map(String::as_str))
    }

    /// Raw page properties.
    pub async fn pageprops(&self) -> Result<&BTreeMap<String, String>> {
        self.cache
            .pageprops
            .get_or_try_init(|| async {
                Ok::<_, WikiError>(props::pageprops(&self.query_facet(Facet::PageProps).await?))
            })
            .await
    }

    /// Warm the common facets concurrently.
    pub(crate) async fn preload(&self) -> Result<()> {
        log::debug!("Preloading {:?}", self.identity.title);
        futures::try_join!(
            self.content(),
            self.summary(),
            self.images(),
            self.references(),
            self.links(),
            self.categories(),
            self.sections(),
        )?;
        Ok(())
    }
}

impl<E> PartialEq for Page<E> {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl<E> fmt::Debug for Page<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("title", &self.identity.title)
            .field("page_id", &self.identity.page_id)
            .finish_non_exhaustive()
    }
}

impl<E> fmt::Display for Page<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Page {:?} ({})>", self.identity.title, self.identity.page_id)
    }
}
