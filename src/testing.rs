//! In-memory executor for tests: canned json per request, call counting per operation.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde_json::{Value, json};

use crate::{
    Wiki,
    executor::{ApiRequest, Facet, Operation, RequestExecutor},
    reqwest_client::RequestError,
};

#[derive(Debug, Default)]
pub(crate) struct MockExecutor {
    responses: HashMap<ApiRequest, Value>,
    calls: Mutex<HashMap<Operation, usize>>,
    /// Operations that fail this many more times before answering.
    outages: Mutex<HashMap<Operation, usize>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the first batch of `operation` with `body`.
    pub fn with(self, operation: Operation, body: Value) -> Self {
        self.with_request(ApiRequest::new(operation), body)
    }

    /// Answer an exact request (continuation included) with `body`.
    pub fn with_request(mut self, request: ApiRequest, body: Value) -> Self {
        self.responses.insert(request, body);
        self
    }

    /// Make the next `times` calls of `operation` fail at the transport level.
    pub fn fail(self, operation: Operation, times: usize) -> Self {
        self.outages
            .lock()
            .expect("outages poisoned")
            .insert(operation, times);
        self
    }

    pub fn calls(&self, operation: &Operation) -> usize {
        self.calls
            .lock()
            .expect("calls poisoned")
            .get(operation)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().expect("calls poisoned").values().sum()
    }
}

impl RequestExecutor for MockExecutor {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, RequestError> {
        *self
            .calls
            .lock()
            .expect("calls poisoned")
            .entry(request.operation.clone())
            .or_default() += 1;

        if let Some(left) = self
            .outages
            .lock()
            .expect("outages poisoned")
            .get_mut(&request.operation)
            && *left > 0
        {
            *left -= 1;
            return Err(RequestError::Client("simulated outage".into()));
        }

        self.responses
            .get(request)
            .cloned()
            .ok_or_else(|| RequestError::Client(format!("no canned response for {:?}", request)))
    }
}

pub(crate) const CELTUCE: u64 = 1868108;
pub(crate) const CYCLONE: u64 = 21196082;
pub(crate) const GREAT_WALL: u64 = 5094570;
pub(crate) const CITATION_NEEDED: u64 = 7412236;
/// Id of the `Template:cn` redirect stub itself.
pub(crate) const CN_STUB: u64 = 7412310;
pub(crate) const COMMUNIST_PARTY: u64 = 5993;
pub(crate) const BUTTERFLY: u64 = 48338;
pub(crate) const TEMPLATE: u64 = 30573;

pub(crate) const CELTUCE_CONTENT: &str = "Celtuce (Lactuca sativa var. asparagina, augustana, or angustata), also called stem lettuce, celery lettuce, asparagus lettuce, or Chinese lettuce, is a cultivar of lettuce grown primarily for its thick stem, used as a vegetable.\n\n\n== Cultivation ==\nCeltuce is popular in China.\n";
pub(crate) const CELTUCE_SUMMARY: &str = "Celtuce (Lactuca sativa var. asparagina, augustana, or angustata), also called stem lettuce, celery lettuce, asparagus lettuce, or Chinese lettuce, is a cultivar of lettuce grown primarily for its thick stem, used as a vegetable.\n";
pub(crate) const CYCLONE_CONTENT: &str = "Tropical Depression Ten was the tenth tropical cyclone of the record-breaking 2005 Atlantic hurricane season.\n\n\n== Meteorological history ==\nOn August 8, a tropical wave emerged from the west coast of Africa.\n\n\n== Impact ==\nBecause Tropical Depression Ten never approached land as a tropical cyclone, no tropical storm watches and warnings were issued for any land masses.\n\n\n== See also ==\nList of storms in the 2005 Atlantic hurricane season\n";

fn page_info(page_id: u64, title: &str) -> Value {
    json!({
        "pageid": page_id,
        "ns": 0,
        "title": title,
        "contentmodel": "wikitext",
        "fullurl": format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_")),
    })
}

fn query(pages: Value) -> Value {
    json!({"batchcomplete": true, "query": {"pages": pages}})
}

fn no_suggestion() -> Value {
    json!({"batchcomplete": true, "query": {"searchinfo": {"totalhits": 1}, "search": [{"ns": 0, "title": "x"}]}})
}

/// A tiny wiki with the articles the tests talk about.
pub(crate) fn fixture_executor() -> MockExecutor {
    let mut executor = MockExecutor::new();

    for (id, title) in [
        (CELTUCE, "Celtuce"),
        (CYCLONE, "Tropical Depression Ten (2005)"),
        (GREAT_WALL, "Great Wall of China"),
    ] {
        executor = executor
            .with(
                Operation::ResolveTitle(title.into()),
                query(json!([page_info(id, title)])),
            )
            .with(Operation::ResolveId(id), query(json!([page_info(id, title)])))
            .with(Operation::SuggestTitle(title.into()), no_suggestion());
    }

    executor
        // redirects and normalization
        .with(
            Operation::ResolveTitle("Template:cn".into()),
            json!({"query": {
                "redirects": [{"from": "Template:cn", "to": "Template:Citation needed"}],
                "pages": [page_info(CITATION_NEEDED, "Template:Citation needed")]
            }}),
        )
        .with(
            Operation::ResolveId(CN_STUB),
            json!({"query": {
                "redirects": [{"from": "Template:cn", "to": "Template:Citation needed"}],
                "pages": [page_info(CITATION_NEEDED, "Template:Citation needed")]
            }}),
        )
        .with(
            Operation::ResolveTitle("Template:Citation needed".into()),
            query(json!([page_info(CITATION_NEEDED, "Template:Citation needed")])),
        )
        .with(
            Operation::ResolveTitle("Communist Party".into()),
            json!({"query": {
                "redirects": [{"from": "Communist Party", "to": "Communist party"}],
                "pages": [page_info(COMMUNIST_PARTY, "Communist party")]
            }}),
        )
        .with(
            Operation::ResolveTitle("communist Party".into()),
            json!({"query": {
                "normalized": [{"fromencoded": false, "from": "communist Party", "to": "Communist Party"}],
                "redirects": [{"from": "Communist Party", "to": "Communist party"}],
                "pages": [page_info(COMMUNIST_PARTY, "Communist party")]
            }}),
        )
        .with(
            Operation::ResolveTitle("Communist party".into()),
            query(json!([page_info(COMMUNIST_PARTY, "Communist party")])),
        )
        .with(
            Operation::ResolveTitle("celtuce".into()),
            json!({"query": {
                "normalized": [{"fromencoded": false, "from": "celtuce", "to": "Celtuce"}],
                "pages": [page_info(CELTUCE, "Celtuce")]
            }}),
        )
        // missing pages and suggestions
        .with(
            Operation::ResolveTitle("purpleberrynotexist".into()),
            query(json!([{"ns": 0, "title": "Purpleberrynotexist", "missing": true}])),
        )
        .with(
            Operation::ResolveTitle("butteryfly".into()),
            query(json!([{"ns": 0, "title": "Butteryfly", "missing": true}])),
        )
        .with(
            Operation::SuggestTitle("butteryfly".into()),
            json!({"query": {"searchinfo": {"totalhits": 0, "suggestion": "butterfly", "suggestionsnippet": "butterfly"}, "search": []}}),
        )
        .with(
            Operation::ResolveTitle("butterfly".into()),
            json!({"query": {
                "normalized": [{"fromencoded": false, "from": "butterfly", "to": "Butterfly"}],
                "pages": [page_info(BUTTERFLY, "Butterfly")]
            }}),
        )
        .with(
            Operation::ResolveId(999_999_999),
            query(json!([{"pageid": 999_999_999, "missing": true}])),
        )
        // disambiguation
        .with(
            Operation::ResolveTitle("Template".into()),
            query(json!([{
                "pageid": TEMPLATE, "ns": 0, "title": "Template",
                "fullurl": "https://en.wikipedia.org/wiki/Template",
                "pageprops": {"disambiguation": ""}
            }])),
        )
        .with(
            Operation::Fetch(Facet::Html, TEMPLATE),
            json!({"parse": {"title": "Template", "pageid": TEMPLATE, "text": concat!(
                "<div class=\"mw-parser-output\"><p><b>Template</b> may refer to:</p>",
                "<div id=\"toc\"><ul><li class=\"toclevel-1 tocsection-1\"><a href=\"#Computing\">Computing</a></li></ul></div>",
                "<ul>",
                "<li><a href=\"/wiki/Template_(file_format)\">Template (file format)</a></li>",
                "<li><a href=\"/wiki/Template_(C%2B%2B)\">Template (C++)</a></li>",
                "<li><a href=\"/wiki/Template_metaprogramming\">Template metaprogramming</a></li>",
                "<li><a href=\"/wiki/Template_method_pattern\">Template method pattern</a></li>",
                "<li><a href=\"/wiki/Template_processor\">Template processor</a></li>",
                "<li><a href=\"/wiki/Template_(word_processing)\">Template (word processing)</a></li>",
                "<li><a href=\"/wiki/Web_template\">Web template</a></li>",
                "<li><a href=\"/wiki/Template_(racing)\">Template (racing)</a></li>",
                "<li><a href=\"/wiki/Template_(novel)\">Template (novel)</a></li>",
                "</ul></div>"
            )}}),
        )
        // facets
        .with(
            Operation::Fetch(Facet::Content, CELTUCE),
            query(json!([{"pageid": CELTUCE, "title": "Celtuce", "extract": CELTUCE_CONTENT,
                "revisions": [{"revid": 575687826, "parentid": 574302108}]}])),
        )
        .with(
            Operation::Fetch(Facet::Content, CYCLONE),
            query(json!([{"pageid": CYCLONE, "title": "Tropical Depression Ten (2005)", "extract": CYCLONE_CONTENT,
                "revisions": [{"revid": 572715399, "parentid": 539367750}]}])),
        )
        .with(
            Operation::Fetch(Facet::Summary, CELTUCE),
            query(json!([{"pageid": CELTUCE, "title": "Celtuce", "extract": CELTUCE_SUMMARY}])),
        )
        .with(
            Operation::Fetch(Facet::Html, CELTUCE),
            json!({"parse": {"title": "Celtuce", "pageid": CELTUCE, "text": "<div class=\"mw-parser-output\"><p><b>Celtuce</b> is a cultivar of lettuce.</p></div>"}}),
        )
        .with(
            Operation::Fetch(Facet::Images, CELTUCE),
            query(json!([
                {"ns": 6, "title": "File:Celtuce.jpg", "imageinfo": [{"url": "https://upload.wikimedia.org/wikipedia/commons/7/79/Celtuce.jpg"}]},
                {"ns": 6, "title": "File:Lettuce Flower.jpg", "imageinfo": [{"url": "https://upload.wikimedia.org/wikipedia/commons/4/4f/Lettuce_Flower.jpg"}]}
            ])),
        )
        .with(
            Operation::Fetch(Facet::References, CELTUCE),
            query(json!([{"pageid": CELTUCE, "title": "Celtuce", "extlinks": [
                {"url": "//ndb.nal.usda.gov/ndb/foods/show/3023"},
                {"url": "http://www.sunset.com/garden/edible/celtuce"}
            ]}])),
        )
        .with(
            Operation::Fetch(Facet::Links, CELTUCE),
            query(json!([{"pageid": CELTUCE, "title": "Celtuce", "links": [
                {"ns": 0, "title": "Lettuce"}, {"ns": 0, "title": "Asparagus"}, {"ns": 0, "title": "Cultivar"}
            ]}])),
        )
        .with(
            Operation::Fetch(Facet::Categories, CELTUCE),
            query(json!([{"pageid": CELTUCE, "title": "Celtuce", "categories": [
                {"ns": 14, "title": "Category:Leaf vegetables"}, {"ns": 14, "title": "Category:Stem vegetables"}
            ]}])),
        )
        .with(
            Operation::Fetch(Facet::Sections, CYCLONE),
            json!({"parse": {"title": "Tropical Depression Ten (2005)", "pageid": CYCLONE, "sections": [
                {"toclevel": 1, "level": "2", "line": "Meteorological history", "number": "1", "index": "1"},
                {"toclevel": 1, "level": "2", "line": "Impact", "number": "2", "index": "2"},
                {"toclevel": 1, "level": "2", "line": "See also", "number": "3", "index": "3"}
            ]}}),
        )
        .with(
            Operation::Fetch(Facet::Sections, CELTUCE),
            json!({"parse": {"title": "Celtuce", "pageid": CELTUCE, "sections": [
                {"toclevel": 1, "level": "2", "line": "Cultivation", "number": "1", "index": "1"}
            ]}}),
        )
        .with(
            Operation::Fetch(Facet::Coordinates, GREAT_WALL),
            query(json!([{"pageid": GREAT_WALL, "title": "Great Wall of China", "coordinates": [
                {"lat": 40.68, "lon": 117.23, "primary": true, "globe": "earth"}
            ]}])),
        )
        .with(
            Operation::Fetch(Facet::Coordinates, CELTUCE),
            query(json!([{"pageid": CELTUCE, "title": "Celtuce"}])),
        )
        .with(
            Operation::Fetch(Facet::LanguageLinks, CELTUCE),
            query(json!([{"pageid": CELTUCE, "title": "Celtuce", "langlinks": [
                {"lang": "es", "title": "Lactuca sativa var. augustana"},
                {"lang": "zh", "title": "莴笋"}
            ]}])),
        )
        .with(
            Operation::Fetch(Facet::LanguageLinks, CYCLONE),
            query(json!([{"pageid": CYCLONE, "title": "Tropical Depression Ten (2005)", "langlinks": [
                {"lang": "ru", "title": "Тропическая депрессия Десять (2005)"}
            ]}])),
        )
        .with(
            Operation::Fetch(Facet::PageProps, CELTUCE),
            query(json!([{"pageid": CELTUCE, "title": "Celtuce", "pageprops": {
                "page_image_free": "Celtuce.jpg", "wikibase_item": "Q1243089"
            }}])),
        )
}

pub(crate) fn fixture_wiki() -> (Wiki<MockExecutor>, Arc<MockExecutor>) {
    let wiki = Wiki::with_executor(fixture_executor());
    let executor = wiki.executor();
    (wiki, executor)
}

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
