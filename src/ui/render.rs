//! Plain terminal rendering of the results view

use std::io::{self, Write};

use crate::search::view::ResultsView;
use crate::search::SearchResult;

// ANSI color codes
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const PRIMARY: &str = "\x1b[38;2;100;181;246m";      // #64B5F6
    pub const SUCCESS: &str = "\x1b[38;2;165;214;167m";      // #A5D6A7
    pub const WARNING: &str = "\x1b[38;2;255;202;40m";       // #FFCA28
    pub const ERROR: &str = "\x1b[38;2;239;154;154m";        // #EF9A9A
    pub const MUTED: &str = "\x1b[38;2;84;110;122m";         // #546E7A
    pub const FG: &str = "\x1b[38;2;212;212;215m";           // #D4D4D7
    pub const HIGHLIGHT: &str = "\x1b[38;2;255;183;77m";     // Orange highlight
}

mod symbols {
    pub const SEARCH: &str = "󰍉";
    pub const VIDEO: &str = "󰗃";
    pub const MATCH: &str = "󰄬";
    pub const ERROR: &str = "󰅚";
}

/// Braille spinner frames shared by the one-shot spinner and the live view
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const PROMPT_TEXT: &str = "Search any topic in the Launch School Presentations from 2020-2023.";
pub const NO_RESULTS_TEXT: &str = "No results found. Try broadening your search.";
pub const ERROR_TEXT: &str = "Error loading results";

/// Longest snippet shown per result
const SNIPPET_CHARS: usize = 160;

pub fn print_header(out: &mut impl Write, query: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}{}  {} Capstone Semantic Search{}",
        colors::PRIMARY, colors::BOLD, symbols::SEARCH, colors::RESET
    )?;
    if !query.is_empty() {
        writeln!(
            out,
            "{}  │ Query: {}\"{}\"{}",
            colors::MUTED, colors::HIGHLIGHT, query, colors::RESET
        )?;
    }
    writeln!(out, "{}  ╰{}─{}", colors::MUTED, "─".repeat(50), colors::RESET)?;
    writeln!(out)
}

/// Write one view; `limit` caps how many results are listed
pub fn render_view(out: &mut impl Write, view: &ResultsView<'_>, limit: Option<usize>) -> io::Result<()> {
    match view {
        ResultsView::Error => writeln!(
            out,
            "{}  {} {}{}",
            colors::ERROR, symbols::ERROR, ERROR_TEXT, colors::RESET
        ),
        ResultsView::Prompt(examples) => render_prompt(out, examples),
        ResultsView::Loading => writeln!(out, "{}  Searching...{}", colors::MUTED, colors::RESET),
        ResultsView::NoResults => writeln!(
            out,
            "{}  {} {}{}",
            colors::WARNING, symbols::SEARCH, NO_RESULTS_TEXT, colors::RESET
        ),
        ResultsView::Results(results) => {
            let shown = limit.unwrap_or(results.len()).min(results.len());
            render_results(out, &results[..shown], results.len())
        }
    }
}

fn render_prompt(out: &mut impl Write, examples: &[&str]) -> io::Result<()> {
    writeln!(out, "{}  {}{}", colors::FG, PROMPT_TEXT, colors::RESET)?;
    writeln!(out)?;
    writeln!(out, "{}  Examples:{}", colors::MUTED, colors::RESET)?;
    for (i, example) in examples.iter().enumerate() {
        writeln!(
            out,
            "{}  {}. {}{}{}",
            colors::MUTED,
            i + 1,
            colors::PRIMARY,
            example,
            colors::RESET
        )?;
    }
    Ok(())
}

fn render_results(out: &mut impl Write, results: &[SearchResult], total: usize) -> io::Result<()> {
    writeln!(
        out,
        "{}{}  {} {} results{}",
        colors::SUCCESS,
        colors::BOLD,
        symbols::MATCH,
        total,
        colors::RESET
    )?;
    writeln!(out)?;

    for (i, result) in results.iter().enumerate() {
        let meta = &result.metadata;
        let title = if meta.title.is_empty() { meta.video_id.as_str() } else { meta.title.as_str() };

        writeln!(
            out,
            "{}  {}. {} {}{}{} @ {} ({:.2}){}",
            colors::MUTED,
            i + 1,
            symbols::VIDEO,
            colors::FG,
            title,
            colors::MUTED,
            result.timestamp(),
            result.score,
            colors::RESET
        )?;
        writeln!(out, "{}      {}{}", colors::PRIMARY, result.watch_url(), colors::RESET)?;

        let snippet = snippet(&meta.text);
        if !snippet.is_empty() {
            writeln!(out, "{}      {}{}", colors::MUTED, snippet, colors::RESET)?;
        }
        writeln!(out)?;
    }

    if results.len() < total {
        writeln!(
            out,
            "{}  ... {} more{}",
            colors::MUTED,
            total - results.len(),
            colors::RESET
        )?;
    }
    Ok(())
}

fn snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > SNIPPET_CHARS {
        let cut: String = flat.chars().take(SNIPPET_CHARS).collect();
        format!("{}...", cut.trim_end())
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::store::testing::result;
    use crate::search::view::PROMPT_EXAMPLES;

    fn render(view: ResultsView<'_>, limit: Option<usize>) -> String {
        let mut out = Vec::new();
        render_view(&mut out, &view, limit).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_error_message_only() {
        let text = render(ResultsView::Error, None);
        assert!(text.contains(ERROR_TEXT));
        assert!(!text.contains("youtube"));
    }

    #[test]
    fn test_prompt_lists_examples() {
        let text = render(ResultsView::Prompt(PROMPT_EXAMPLES), None);
        assert!(text.contains(PROMPT_TEXT));
        for example in PROMPT_EXAMPLES {
            assert!(text.contains(example));
        }
    }

    #[test]
    fn test_no_results_message() {
        assert!(render(ResultsView::NoResults, None).contains(NO_RESULTS_TEXT));
    }

    #[test]
    fn test_results_in_order_with_limit() {
        let results = vec![result("first"), result("second"), result("third")];
        let text = render(ResultsView::Results(&results), Some(2));

        let first = text.find("Talk about first").unwrap();
        let second = text.find("Talk about second").unwrap();
        assert!(first < second);
        assert!(!text.contains("Talk about third"));
        assert!(text.contains("3 results"));
        assert!(text.contains("... 1 more"));
        assert!(text.contains("https://www.youtube.com/watch?v=first&t=42s"));
    }

    #[test]
    fn test_snippet_truncates_and_flattens() {
        assert_eq!(snippet("a\n  b\tc"), "a b c");
        let long = "word ".repeat(100);
        let cut = snippet(&long);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() <= SNIPPET_CHARS + 3);
    }
}
