//! Shareable search links
//!
//! The site mirrors the active query into `/?query=...` so a search can be
//! bookmarked or passed around. The container only ever pushes into a sink;
//! it never reads the link back.

use std::sync::Mutex;

use reqwest::Url;
use tracing::debug;

/// Default public site
pub const DEFAULT_SITE_URL: &str = "https://launch-semantic-search-capstone-yt.vercel.app";

/// One-way notification of debounced query changes
pub trait QuerySink: Send + Sync {
    fn query_changed(&self, query: &str);
}

/// Builds `{site}/?query=...` links and remembers the latest one
pub struct ShareLink {
    base: Url,
    current: Mutex<Url>,
}

impl ShareLink {
    pub fn new(site_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(site_url)
            .map_err(|e| anyhow::anyhow!("Invalid site URL {:?}: {}", site_url, e))?;
        Ok(Self {
            current: Mutex::new(base.clone()),
            base,
        })
    }

    /// Link for a query; the bare site for an empty one
    pub fn url_for(&self, query: &str) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        if !query.is_empty() {
            url.query_pairs_mut().append_pair("query", query);
        }
        url
    }

    /// Link for the most recent debounced query
    pub fn current(&self) -> Url {
        self.current
            .lock()
            .map(|u| u.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }
}

impl QuerySink for ShareLink {
    fn query_changed(&self, query: &str) {
        let url = self.url_for(query);
        debug!("share link -> {}", url);
        match self.current.lock() {
            Ok(mut current) => *current = url,
            Err(poisoned) => *poisoned.into_inner() = url,
        }
    }
}
