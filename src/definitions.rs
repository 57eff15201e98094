//! Typed views over the JSON the API sends back (`formatversion=2`).
//!
//! Only the fields the resolver and facet parsers read are modelled; serde drops
//! the rest. Anything optional on the wire is `Option` or `#[serde(default)]`.

use serde::Deserialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Default)]
pub struct ApiResponse {
    #[serde(default)]
    pub query: QueryBody,
    pub parse: Option<ParseBody>,
    /// Present when a list did not fit in one batch.
    #[serde(rename = "continue")]
    pub continuation: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct QueryBody {
    #[serde(default)]
    pub normalized: Vec<TitleMapping>,
    #[serde(default)]
    pub redirects: Vec<TitleMapping>,
    #[serde(default)]
    pub pages: Vec<PageEntry>,
    pub searchinfo: Option<SearchInfo>,
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

/// One `from -> to` step, used for both normalization and redirects.
#[derive(Debug, Deserialize, Clone)]
pub struct TitleMapping {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct PageEntry {
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    pub fullurl: Option<String>,
    pub pageprops: Option<BTreeMap<String, Value>>,
    pub extract: Option<String>,
    #[serde(default)]
    pub revisions: Vec<Revision>,
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
    #[serde(default)]
    pub extlinks: Vec<ExternalLink>,
    #[serde(default)]
    pub links: Vec<TitleEntry>,
    #[serde(default)]
    pub categories: Vec<TitleEntry>,
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub langlinks: Vec<LangLink>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Revision {
    pub revid: u64,
    #[serde(default)]
    pub parentid: u64,
}

#[derive(Debug, Deserialize)]
pub struct ImageInfo {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ExternalLink {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleEntry {
    pub title: String,
}

/// Raw json numbers. With `arbitrary_precision` they keep the exact wire text.
#[derive(Debug, Deserialize)]
pub struct Coordinate {
    pub lat: Number,
    pub lon: Number,
    #[serde(default)]
    pub primary: bool,
}

#[derive(Debug, Deserialize)]
pub struct LangLink {
    pub lang: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchInfo {
    pub suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ParseBody {
    pub text: Option<String>,
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawSection {
    pub toclevel: u32,
    pub line: String,
    #[serde(default)]
    pub number: String,
}

impl ApiResponse {
    /// The `continue` object as plain strings, ready to be sent back.
    pub fn continuation_params(&self) -> Option<BTreeMap<String, String>> {
        self.continuation.as_ref().map(|token| {
            token
                .iter()
                .map(|(k, v)| {
                    let v = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), v)
                })
                .collect()
        })
    }
}
