use std::{path::PathBuf, time::Duration};

use derive_builder::Builder;
use url::{ParseError, Url};

/// Default endpoint. `{lang}` is swapped for [Config::language].
pub const WIKIPEDIA_API: &str = "https://{lang}.wikipedia.org/w/api.php";
const DEFAULT_USER_AGENT: &str = concat!(
    "wiki_resolver/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/wiki-resolver/wiki_resolver)"
);

/// Everything the production executor needs to know about where and how to talk.
///
/// Build one with [ConfigBuilder], [Config::default] or [Config::from_env].
#[derive(Debug, Clone, Builder)]
#[builder(default, setter(into))]
pub struct Config {
    /// Language edition, e.g. `en`, `de`, `ru`.
    pub language: String,
    /// Endpoint template. May contain `{lang}`.
    pub api_url: String,
    pub user_agent: String,
    /// Where the http cache lives. `None` turns disk caching off.
    pub cache_path: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            api_url: WIKIPEDIA_API.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_path: Some(PathBuf::from("./.cache")),
            timeout: None,
        }
    }
}

impl Config {
    /// Defaults, overlaid with `WIKI_*` environment variables.
    ///
    /// Recognised variables: `WIKI_LANGUAGE`, `WIKI_API_URL`, `WIKI_USER_AGENT`,
    /// `WIKI_CACHE_PATH` (empty string disables the cache) and `WIKI_TIMEOUT_SECS`.
    /// Call `dotenv::dotenv()` beforehand if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigBuilderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigBuilderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ConfigBuilder::default();
        if let Some(language) = lookup("WIKI_LANGUAGE") {
            builder.language(language.trim().to_lowercase());
        }
        if let Some(api_url) = lookup("WIKI_API_URL") {
            builder.api_url(api_url);
        }
        if let Some(user_agent) = lookup("WIKI_USER_AGENT") {
            builder.user_agent(user_agent);
        }
        if let Some(path) = lookup("WIKI_CACHE_PATH") {
            builder.cache_path(if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            });
        }
        if let Some(secs) = lookup("WIKI_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                ConfigBuilderError::ValidationError(format!(
                    "WIKI_TIMEOUT_SECS is not a number ({:?}): {}",
                    secs, e
                ))
            })?;
            builder.timeout(Some(Duration::from_secs(secs)));
        }
        builder.build()
    }

    /// The api.php url for the configured language.
    pub fn endpoint(&self) -> Result<Url, ParseError> {
        Url::parse(&self.api_url.replace("{lang}", &self.language))
    }
}
