//! One-shot search command
//!
//! Drives the same state container the live view uses: the query goes in as
//! an immediate search key, we wait for the store to stop loading, then render
//! whichever view the final state selects.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::search::view::{self, choose_example};
use crate::search::{HttpBackend, QuerySink, SearchStore, ShareLink};
use crate::ui::render;

pub async fn run(config: Config, query: &str, limit: usize, json: bool) -> Result<()> {
    let backend = HttpBackend::with_endpoint(&config.search.endpoint, config.timeout())?;
    debug!("searching {} for {:?}", backend.endpoint(), query);
    let share = Arc::new(ShareLink::new(&config.site.url)?);
    let store = SearchStore::with_sink(
        backend,
        config.debounce(),
        Some(share.clone() as Arc<dyn QuerySink>),
    );
    let mut states = store.subscribe();

    choose_example(&store, query);

    let spinner = (!json && !query.is_empty()).then(|| spinner(query));
    let state = states
        .wait_for(|s| !s.is_loading)
        .await
        .context("Search state closed before the query finished")?
        .clone();
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    store.close();

    if json {
        if state.error {
            anyhow::bail!("{}", render::ERROR_TEXT);
        }
        let mut results = state.results.unwrap_or_default();
        results.truncate(limit);
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let mut out = io::stdout().lock();
    render::print_header(&mut out, query)?;
    render::render_view(&mut out, &view::select(&state), Some(limit))?;
    if !query.is_empty() && !state.error {
        writeln!(out)?;
        writeln!(out, "  Share: {}", share.current())?;
    }
    writeln!(out)?;
    Ok(())
}

fn spinner(query: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg}") {
        bar.set_style(style.tick_strings(&render::SPINNER));
    }
    bar.set_message(format!("Searching for \"{}\"...", query));
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
