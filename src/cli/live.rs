//! Live search view
//!
//! Full-screen incremental search. Every keystroke goes through the debounced
//! `set_query`; Enter promotes the input immediately. F1-F4 run the matching
//! example query, so every printable key stays typeable.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::Config;
use crate::search::view::{self, choose_example, ResultsView, PROMPT_EXAMPLES};
use crate::search::backend::SearchBackend;
use crate::search::store::SearchState;
use crate::search::{HttpBackend, QuerySink, SearchStore, ShareLink};
use crate::ui::render::{ERROR_TEXT, NO_RESULTS_TEXT, PROMPT_TEXT, SPINNER};
use crate::ui::theme::colors;

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

pub async fn run(config: Config) -> Result<()> {
    let backend = HttpBackend::with_endpoint(&config.search.endpoint, config.timeout())?;
    let share = Arc::new(ShareLink::new(&config.site.url)?);
    let store = SearchStore::with_sink(
        backend,
        config.debounce(),
        Some(share.clone() as Arc<dyn QuerySink>),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &store, &share).await;

    store.close();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop<W: io::Write, B: SearchBackend>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    store: &SearchStore<B>,
    share: &ShareLink,
) -> Result<()> {
    let (tx, mut keys) = mpsc::channel(64);
    std::thread::spawn(move || read_keys(tx));

    let mut states = store.subscribe();
    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    let mut tick = 0usize;

    loop {
        let state = states.borrow_and_update().clone();
        let link = share.current().to_string();
        terminal.draw(|f| draw(f, &state, &link, tick))?;

        tokio::select! {
            key = keys.recv() => {
                let Some(key) = key else { break };
                if handle_key(store, key) == Flow::Quit {
                    break;
                }
            }
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = ticker.tick() => {
                tick = tick.wrapping_add(1);
            }
        }
    }

    Ok(())
}

/// Runs on its own thread; crossterm's reader is blocking
fn read_keys(tx: mpsc::Sender<KeyEvent>) {
    while !tx.is_closed() {
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.blocking_send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("terminal read failed: {}", e);
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                debug!("terminal poll failed: {}", e);
                break;
            }
        }
    }
}

fn handle_key<B: SearchBackend>(store: &SearchStore<B>, key: KeyEvent) -> Flow {
    if key.kind != KeyEventKind::Press {
        return Flow::Continue;
    }

    let query = store.snapshot().query;
    match key.code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
        KeyCode::F(n) => {
            if let Some(example) = example_for(n) {
                choose_example(store, example);
            }
        }
        KeyCode::Char(c) => {
            let mut next = query;
            next.push(c);
            store.set_query(next);
        }
        KeyCode::Backspace => {
            let mut next = query;
            next.pop();
            store.set_query(next);
        }
        KeyCode::Enter => store.set_debounced_query(query),
        _ => {}
    }
    Flow::Continue
}

/// F1 is the first prompt example
fn example_for(key: u8) -> Option<&'static str> {
    let index = usize::from(key).checked_sub(1)?;
    PROMPT_EXAMPLES.get(index).copied()
}

fn draw(f: &mut Frame, state: &SearchState, share_link: &str, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(1)])
        .split(f.size());

    let input = Paragraph::new(state.query.as_str())
        .style(Style::default().fg(rgb(colors::FG)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(rgb(colors::PRIMARY)))
                .title(" Search Capstone presentations "),
        );
    f.render_widget(input, chunks[0]);
    f.set_cursor(
        chunks[0].x + 1 + state.query.chars().count() as u16,
        chunks[0].y + 1,
    );

    let muted = Style::default().fg(rgb(colors::MUTED));
    let results_area = chunks[1];
    match view::select(state) {
        ResultsView::Error => {
            let message = Paragraph::new(ERROR_TEXT).style(Style::default().fg(rgb(colors::ERROR)));
            f.render_widget(message, results_area);
        }
        ResultsView::Prompt(examples) => {
            let mut lines = vec![
                Line::from(Span::styled(PROMPT_TEXT, Style::default().fg(rgb(colors::FG)))),
                Line::from(""),
                Line::from(Span::styled("Examples:", muted)),
            ];
            for (i, example) in examples.iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  F{}  ", i + 1), muted),
                    Span::styled(*example, Style::default().fg(rgb(colors::PRIMARY))),
                ]));
            }
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), results_area);
        }
        ResultsView::Loading => {
            let text = format!(
                "{} Searching for \"{}\"...",
                SPINNER[tick % SPINNER.len()],
                state.debounced_query
            );
            f.render_widget(Paragraph::new(text).style(muted), results_area);
        }
        ResultsView::NoResults => {
            let message = Paragraph::new(NO_RESULTS_TEXT).style(Style::default().fg(rgb(colors::WARNING)));
            f.render_widget(message, results_area);
        }
        ResultsView::Results(results) => {
            let items: Vec<ListItem> = results
                .iter()
                .map(|r| {
                    let title = if r.metadata.title.is_empty() {
                        r.metadata.video_id.clone()
                    } else {
                        r.metadata.title.clone()
                    };
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(
                                title,
                                Style::default().fg(rgb(colors::FG)).add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(format!("  @ {}  ({:.2})", r.timestamp(), r.score), muted),
                        ]),
                        Line::from(Span::styled(r.watch_url(), Style::default().fg(rgb(colors::PRIMARY)))),
                        Line::from(Span::styled(r.metadata.text.clone(), muted)),
                        Line::from(""),
                    ])
                })
                .collect();
            let title = format!(" {} results ", results.len());
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(rgb(colors::SUCCESS)))
                    .title(title),
            );
            f.render_widget(list, results_area);
        }
    }

    let footer = Paragraph::new(format!(
        "esc quit · enter search now · F1-F4 examples · {}",
        share_link
    ))
    .style(muted);
    f.render_widget(footer, chunks[2]);
}
